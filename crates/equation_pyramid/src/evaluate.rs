//! Equation evaluation.
//!
//! Three selected blocks play the first, second and third roles in the
//! order they were selected. The first block contributes only its
//! magnitude. The second block's operator is applied to that value and its
//! magnitude, then the third block's operator is applied to the running
//! value. There is no precedence between the two steps: `a + b × c` is
//! `(a + b) × c`.

use crate::block::Block;
use crate::pyramid::Pyramid;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// Number of blocks in a selection.
pub const SELECTION_SIZE: usize = 3;

/// Reason a selection is not a valid equation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EvaluationError {
    /// The selection did not contain exactly three blocks.
    #[display("Exactly 3 blocks must be selected (got {})", _0)]
    WrongSelectionCount(usize),

    /// A selected index does not name a block in the pyramid.
    #[display("No block at position {}", _0)]
    IndexOutOfRange(usize),

    /// The same block was selected more than once.
    #[display("Block at position {} selected more than once", _0)]
    DuplicateIndex(usize),

    /// A division step had a zero magnitude on its right-hand side.
    #[display("Division by zero at block {}", _0)]
    DivisionByZero(char),
}

impl std::error::Error for EvaluationError {}

/// A successfully evaluated selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equation {
    indices: [usize; SELECTION_SIZE],
    result: f64,
    text: String,
}

impl Equation {
    /// Selected indices in role order.
    pub fn indices(&self) -> [usize; SELECTION_SIZE] {
        self.indices
    }

    /// Result rounded to two decimal places.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Rendered equation, e.g. `a(+7) b(+3) c(×2) = 20`.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the rounded result equals `target` exactly.
    pub fn matches(&self, target: i32) -> bool {
        self.result == f64::from(target)
    }
}

impl std::fmt::Display for Equation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Rounds to two decimal places, normalising negative zero.
fn round_to_hundredths(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

/// Resolves and validates a selection into three blocks.
fn select<'a>(
    selected: &[usize],
    pyramid: &'a Pyramid,
) -> Result<([usize; SELECTION_SIZE], [&'a Block; SELECTION_SIZE]), EvaluationError> {
    let indices: [usize; SELECTION_SIZE] = selected
        .try_into()
        .map_err(|_| EvaluationError::WrongSelectionCount(selected.len()))?;

    for (pos, &index) in indices.iter().enumerate() {
        if indices[..pos].contains(&index) {
            return Err(EvaluationError::DuplicateIndex(index));
        }
    }

    let block = |index: usize| {
        pyramid
            .get(index)
            .ok_or(EvaluationError::IndexOutOfRange(index))
    };
    let blocks = [block(indices[0])?, block(indices[1])?, block(indices[2])?];

    Ok((indices, blocks))
}

/// Evaluates the blocks at `selected`, in selection order.
///
/// # Errors
///
/// Returns [`EvaluationError`] if the selection is not three distinct
/// positions in the pyramid or a division step divides by zero.
#[instrument(level = "trace", skip(pyramid))]
pub fn evaluate_equation(
    selected: &[usize],
    pyramid: &Pyramid,
) -> Result<Equation, EvaluationError> {
    let (indices, [first, second, third]) = select(selected, pyramid)?;

    let mut value = f64::from(first.magnitude());
    for block in [second, third] {
        value = block
            .effective_operator()
            .apply(value, f64::from(block.magnitude()))
            .ok_or(EvaluationError::DivisionByZero(block.label()))?;
    }

    let result = round_to_hundredths(value);
    let text = format!("{} {} {} = {}", first, second, third, result);
    trace!(%text, "Evaluated selection");

    Ok(Equation {
        indices,
        result,
        text,
    })
}
