//! Equation Pyramid puzzle engine.
//!
//! Players pick three of the ten labelled blocks in a pyramid so that the
//! resulting equation equals a target number. This crate holds the pure
//! logic behind that game and performs no I/O.
//!
//! # Architecture
//!
//! - **Blocks**: a plain signed number or an operator with a magnitude
//! - **Pyramid**: ten blocks labelled `a..j` in rows of 1, 2, 3 and 4
//! - **Evaluator**: applies the second and third blocks' operators strictly
//!   left to right, ignoring the first block's own operator
//! - **Finder**: searches all 720 ordered triples for the target
//! - **Generator**: random pyramids and targets, kept only when solvable,
//!   with a bounded number of attempts
//! - **Letters**: maps typed labels to block positions
//! - **Round**: tracks discoveries, treating reorderings as one combination
//!
//! # Example
//!
//! ```
//! use equation_pyramid::{GeneratorConfig, PyramidGenerator, find_valid_combinations};
//!
//! # fn main() -> Result<(), equation_pyramid::ConfigError> {
//! let mut generator = PyramidGenerator::seeded(GeneratorConfig::default(), 42)?;
//! let puzzle = generator.generate();
//!
//! let solutions = find_valid_combinations(puzzle.pyramid(), puzzle.target());
//! assert!(!solutions.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod block;
mod combinations;
mod config;
mod evaluate;
mod generator;
mod invariants;
mod letters;
mod pyramid;
mod round;

// Crate-level exports - Block model
pub use block::{BLOCK_COUNT, Block, BlockKind, LABELS, Operator, index_for, label_for};

// Crate-level exports - Pyramid and puzzle
pub use pyramid::{InvalidPuzzle, Puzzle, Pyramid, ROW_SIZES};

// Crate-level exports - Evaluation
pub use evaluate::{Equation, EvaluationError, SELECTION_SIZE, evaluate_equation};

// Crate-level exports - Combination search
pub use combinations::{
    Combination, CombinationKey, distinct_count, find_valid_combinations, ordered_triples,
};

// Crate-level exports - Letter input
pub use letters::{LetterError, parse_letter_input, selection_from_letters};

// Crate-level exports - Generation
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{
    GenerationReport, OPERATOR_BLOCKS, Outcome, PyramidGenerator, generate_pyramid,
};

// Crate-level exports - Invariants
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, LabelsInOrder, PuzzleInvariants, Solvable,
    TenBlocks,
};

// Crate-level exports - Round tracking
pub use round::{Round, Submission};
