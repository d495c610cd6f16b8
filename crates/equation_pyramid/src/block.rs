//! Block model: a single pyramid cell.
//!
//! A block is either a plain signed number or an operator paired with a
//! magnitude. Whatever its kind, evaluation only ever reads the block's
//! [`magnitude`](Block::magnitude) and, when it is not in the first role,
//! its [`effective_operator`](Block::effective_operator).

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Number of blocks in every pyramid.
pub const BLOCK_COUNT: usize = 10;

/// Labels assigned to blocks by position (index 0 is `a`, index 9 is `j`).
pub const LABELS: [char; BLOCK_COUNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j'];

/// Returns the label for a block position, if the position exists.
pub fn label_for(index: usize) -> Option<char> {
    LABELS.get(index).copied()
}

/// Returns the position labelled `label` (case-insensitive).
pub fn index_for(label: char) -> Option<usize> {
    let lower = label.to_ascii_lowercase();
    LABELS.iter().position(|&l| l == lower)
}

/// Arithmetic operator carried by an operator block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition.
    Add,
    /// Subtraction.
    Subtract,
    /// Multiplication.
    Multiply,
    /// Division.
    Divide,
}

impl Operator {
    /// Symbol used when rendering a block.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }

    /// Parses an operator from its display symbol (ASCII `*` and `/` accepted).
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '×' | '*' | 'x' => Some(Operator::Multiply),
            '÷' | '/' => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Applies the operator. Returns `None` when dividing by zero.
    pub fn apply(self, lhs: f64, rhs: f64) -> Option<f64> {
        match self {
            Operator::Add => Some(lhs + rhs),
            Operator::Subtract => Some(lhs - rhs),
            Operator::Multiply => Some(lhs * rhs),
            Operator::Divide if rhs == 0.0 => None,
            Operator::Divide => Some(lhs / rhs),
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// What a block holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BlockKind {
    /// A signed number with no operator of its own.
    Number {
        /// The signed value.
        value: i32,
    },
    /// An operator applied with a non-negative magnitude.
    Operator {
        /// The operator.
        operator: Operator,
        /// The magnitude the operator is applied with.
        magnitude: u32,
    },
}

/// One pyramid cell.
///
/// Blocks are selected by index, never by value: two blocks with identical
/// contents are still distinct cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    label: char,
    #[serde(flatten)]
    kind: BlockKind,
}

impl Block {
    /// Creates a block with an explicit label and kind.
    pub fn new(label: char, kind: BlockKind) -> Self {
        Self { label, kind }
    }

    /// Creates a number block.
    #[instrument(level = "trace")]
    pub fn number(label: char, value: i32) -> Self {
        Self::new(label, BlockKind::Number { value })
    }

    /// Creates an operator block.
    #[instrument(level = "trace")]
    pub fn operator(label: char, operator: Operator, magnitude: u32) -> Self {
        Self::new(
            label,
            BlockKind::Operator {
                operator,
                magnitude,
            },
        )
    }

    /// Returns the block's label.
    pub fn label(&self) -> char {
        self.label
    }

    /// Returns what the block holds.
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Returns `true` for operator blocks.
    pub fn is_operator(&self) -> bool {
        matches!(self.kind, BlockKind::Operator { .. })
    }

    /// The operator this block carries, if it is an operator block.
    pub fn operator_kind(&self) -> Option<Operator> {
        match self.kind {
            BlockKind::Operator { operator, .. } => Some(operator),
            BlockKind::Number { .. } => None,
        }
    }

    /// The operator applied when this block is in the second or third role.
    ///
    /// Number blocks act as an implicit addition.
    pub fn effective_operator(&self) -> Operator {
        self.operator_kind().unwrap_or(Operator::Add)
    }

    /// Unsigned magnitude used in evaluation.
    pub fn magnitude(&self) -> u32 {
        match self.kind {
            BlockKind::Number { value } => value.unsigned_abs(),
            BlockKind::Operator { magnitude, .. } => magnitude,
        }
    }

    /// Human-readable value, e.g. `+3`, `-4`, `×5`, `÷2`.
    pub fn display_value(&self) -> String {
        match self.kind {
            BlockKind::Number { value } => format!("{:+}", value),
            BlockKind::Operator {
                operator,
                magnitude,
            } => format!("{}{}", operator.symbol(), magnitude),
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.label, self.display_value())
    }
}
