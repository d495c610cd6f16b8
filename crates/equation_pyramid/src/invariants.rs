//! First-class invariants for generated puzzles.
//!
//! Every puzzle handed to a caller must satisfy [`PuzzleInvariants`]. The
//! generator checks them before returning, and tests check them directly.

use crate::block::{BLOCK_COUNT, LABELS};
use crate::combinations::find_valid_combinations;
use crate::pyramid::Puzzle;

/// One rule a puzzle of type `S` has to obey.
pub trait Invariant<S> {
    /// Whether `state` obeys the rule.
    fn holds(state: &S) -> bool;

    /// The rule, phrased for error messages.
    fn description() -> &'static str;
}

/// A rule that a puzzle broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// The broken rule, as given by [`Invariant::description`].
    pub description: String,
}

impl InvariantViolation {
    /// Records a broken rule.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several rules checked in one pass.
///
/// Tuples of [`Invariant`]s get this for free.
pub trait InvariantSet<S> {
    /// Every broken rule, in tuple order. `Ok(())` when none are broken.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The pyramid has exactly ten blocks.
pub struct TenBlocks;

impl Invariant<Puzzle> for TenBlocks {
    fn holds(puzzle: &Puzzle) -> bool {
        puzzle.pyramid().blocks().len() == BLOCK_COUNT
    }

    fn description() -> &'static str {
        "Pyramid must contain exactly 10 blocks"
    }
}

/// Labels are `a..j` in position order, each used once.
pub struct LabelsInOrder;

impl Invariant<Puzzle> for LabelsInOrder {
    fn holds(puzzle: &Puzzle) -> bool {
        puzzle
            .pyramid()
            .blocks()
            .iter()
            .map(|b| b.label())
            .eq(LABELS.iter().copied())
    }

    fn description() -> &'static str {
        "Block labels must be a through j in position order"
    }
}

/// At least one combination reaches the target.
pub struct Solvable;

impl Invariant<Puzzle> for Solvable {
    fn holds(puzzle: &Puzzle) -> bool {
        !find_valid_combinations(puzzle.pyramid(), puzzle.target()).is_empty()
    }

    fn description() -> &'static str {
        "Target must be reachable by at least one combination"
    }
}

/// Every invariant a puzzle handed to players must satisfy.
pub type PuzzleInvariants = (TenBlocks, LabelsInOrder, Solvable);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{Block, BlockKind};
    use crate::pyramid::Pyramid;

    #[test]
    fn test_canonical_puzzle_holds() {
        assert!(PuzzleInvariants::check_all(&Puzzle::canonical()).is_ok());
    }

    #[test]
    fn test_unsolvable_reported() {
        let puzzle = Puzzle::new(Pyramid::canonical(), 1000);
        let violations = PuzzleInvariants::check_all(&puzzle).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            <Solvable as Invariant<Puzzle>>::description()
        );
    }

    #[test]
    fn test_mislabelled_reported() {
        let mut blocks = *Pyramid::canonical().blocks();
        blocks[4] = Block::new('a', BlockKind::Number { value: 5 });
        let puzzle = Puzzle::new(Pyramid::from_blocks(blocks), 6);
        assert!(!LabelsInOrder::holds(&puzzle));
    }

    #[test]
    fn test_violations_follow_tuple_order() {
        let mut blocks = *Pyramid::canonical().blocks();
        blocks[4] = Block::new('a', BlockKind::Number { value: 5 });
        let puzzle = Puzzle::new(Pyramid::from_blocks(blocks), 1000);
        let broken: Vec<String> = PuzzleInvariants::check_all(&puzzle)
            .unwrap_err()
            .into_iter()
            .map(|v| v.description)
            .collect();
        assert_eq!(
            broken,
            [
                <LabelsInOrder as Invariant<Puzzle>>::description(),
                <Solvable as Invariant<Puzzle>>::description(),
            ]
        );
    }
}
