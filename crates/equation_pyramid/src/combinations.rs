//! Exhaustive search for combinations that reach a target.

use crate::block::BLOCK_COUNT;
use crate::evaluate::{SELECTION_SIZE, evaluate_equation};
use crate::pyramid::Pyramid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// An ordered selection whose evaluation equals the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, derive_new::new)]
pub struct Combination {
    indices: [usize; SELECTION_SIZE],
    result: f64,
}

impl Combination {
    /// Indices in role order.
    pub fn indices(&self) -> [usize; SELECTION_SIZE] {
        self.indices
    }

    /// Evaluated result.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// Order-independent identity of the selected blocks.
    pub fn key(&self) -> CombinationKey {
        CombinationKey::from_indices(self.indices)
    }
}

/// The set of blocks in a selection, ignoring role order.
///
/// Two selections of the same three blocks in different orders share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombinationKey([usize; SELECTION_SIZE]);

impl CombinationKey {
    /// Builds a key from indices in any order.
    pub fn from_indices(mut indices: [usize; SELECTION_SIZE]) -> Self {
        indices.sort_unstable();
        Self(indices)
    }

    /// Indices in ascending order.
    pub fn indices(&self) -> [usize; SELECTION_SIZE] {
        self.0
    }
}

/// Iterates over every ordered triple of pairwise-distinct block positions.
///
/// Yields `10 × 9 × 8 = 720` triples, lexicographically ordered.
pub fn ordered_triples() -> impl Iterator<Item = [usize; SELECTION_SIZE]> {
    (0..BLOCK_COUNT).flat_map(|i| {
        (0..BLOCK_COUNT).flat_map(move |j| {
            (0..BLOCK_COUNT)
                .filter(move |&k| i != j && j != k && i != k)
                .map(move |k| [i, j, k])
        })
    })
}

/// Finds every ordered triple whose evaluation equals `target`.
///
/// Selections that fail to evaluate (division by zero) are skipped. Several
/// orderings of the same blocks may appear; deduplicating them is up to the
/// caller (see [`distinct_count`]).
#[instrument(skip(pyramid))]
pub fn find_valid_combinations(pyramid: &Pyramid, target: i32) -> Vec<Combination> {
    let found: Vec<Combination> = ordered_triples()
        .filter_map(|indices| evaluate_equation(&indices, pyramid).ok())
        .filter(|equation| equation.matches(target))
        .map(|equation| Combination::new(equation.indices(), equation.result()))
        .collect();

    debug!(count = found.len(), "Combination search complete");
    found
}

/// Number of distinct block sets among `combinations`.
pub fn distinct_count(combinations: &[Combination]) -> usize {
    combinations
        .iter()
        .map(Combination::key)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, Operator};

    #[test]
    fn test_triple_count() {
        assert_eq!(ordered_triples().count(), 720);
        assert!(ordered_triples().all(|[i, j, k]| i != j && j != k && i != k));
        assert_eq!(ordered_triples().next(), Some([0, 1, 2]));
    }

    #[test]
    fn test_canonical_six() {
        let combos = find_valid_combinations(&Pyramid::canonical(), 6);
        // Only {1, 2, 3} sums to 6, in all six orders.
        assert_eq!(combos.len(), 6);
        assert_eq!(distinct_count(&combos), 1);
        assert!(combos.iter().all(|c| c.key().indices() == [0, 1, 2]));
    }

    #[test]
    fn test_unreachable_target() {
        assert!(find_valid_combinations(&Pyramid::canonical(), -100).is_empty());
    }

    #[test]
    fn test_order_sensitive_results() {
        let mut kinds = [BlockKind::Number { value: 50 }; 10];
        kinds[0] = BlockKind::Number { value: 10 };
        kinds[1] = BlockKind::Operator {
            operator: Operator::Subtract,
            magnitude: 4,
        };
        kinds[2] = BlockKind::Operator {
            operator: Operator::Add,
            magnitude: 1,
        };
        let pyramid = Pyramid::from_kinds(kinds);

        let combos = find_valid_combinations(&pyramid, 7);
        let orders: Vec<_> = combos.iter().map(|c| c.indices()).collect();
        assert!(orders.contains(&[0, 1, 2]));
        assert!(!orders.contains(&[1, 0, 2]));
    }

    #[test]
    fn test_key_ignores_order() {
        assert_eq!(
            CombinationKey::from_indices([2, 0, 1]),
            CombinationKey::from_indices([1, 2, 0])
        );
    }
}
