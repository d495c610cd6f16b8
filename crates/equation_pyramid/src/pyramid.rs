//! Pyramid and puzzle types.

use crate::block::{BLOCK_COUNT, Block, BlockKind, LABELS};
use crate::invariants::{InvariantSet, PuzzleInvariants};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::instrument;

/// Number of blocks in each row, top to bottom.
pub const ROW_SIZES: [usize; 4] = [1, 2, 3, 4];

/// Ten blocks in a four-row triangle.
///
/// Row `r` (0-based) holds the next `r + 1` positions in index order:
/// `{0}`, `{1, 2}`, `{3, 4, 5}`, `{6, 7, 8, 9}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PyramidData")]
pub struct Pyramid {
    blocks: [Block; BLOCK_COUNT],
}

/// Pyramid as received over the wire, before its labels are checked.
#[derive(Deserialize)]
struct PyramidData {
    blocks: [Block; BLOCK_COUNT],
}

impl TryFrom<PyramidData> for Pyramid {
    type Error = InvalidPuzzle;

    fn try_from(data: PyramidData) -> Result<Self, Self::Error> {
        let labels_in_order = data
            .blocks
            .iter()
            .map(Block::label)
            .eq(LABELS.iter().copied());
        if !labels_in_order {
            let labels: String = data.blocks.iter().map(Block::label).collect();
            return Err(InvalidPuzzle(vec![format!(
                "labels '{}' are not a..j in position order",
                labels
            )]));
        }
        Ok(Self {
            blocks: data.blocks,
        })
    }
}

impl Pyramid {
    /// Builds a pyramid from block kinds, labelling them `a..j` in order.
    #[instrument(level = "trace", skip(kinds))]
    pub fn from_kinds(kinds: [BlockKind; BLOCK_COUNT]) -> Self {
        let mut index = 0;
        let blocks = kinds.map(|kind| {
            let block = Block::new(LABELS[index], kind);
            index += 1;
            block
        });
        Self { blocks }
    }

    /// Builds a pyramid from already-labelled blocks without checking them.
    #[cfg(test)]
    pub(crate) fn from_blocks(blocks: [Block; BLOCK_COUNT]) -> Self {
        Self { blocks }
    }

    /// The fixed pyramid of plain numbers 1 through 10.
    pub fn canonical() -> Self {
        let mut value = 0;
        Self::from_kinds([(); BLOCK_COUNT].map(|_| {
            value += 1;
            BlockKind::Number { value }
        }))
    }

    /// Returns all blocks in position order.
    pub fn blocks(&self) -> &[Block; BLOCK_COUNT] {
        &self.blocks
    }

    /// Returns the block at `index`.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Number of operator blocks.
    pub fn operator_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.is_operator()).count()
    }

    /// Position range covered by `row` (0-based).
    pub fn row_range(row: usize) -> Option<Range<usize>> {
        let size = *ROW_SIZES.get(row)?;
        let start: usize = ROW_SIZES[..row].iter().sum();
        Some(start..start + size)
    }

    /// Row (0-based) containing the block at `index`.
    pub fn row_of(index: usize) -> Option<usize> {
        (0..ROW_SIZES.len()).find(|&row| {
            Self::row_range(row).is_some_and(|range| range.contains(&index))
        })
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        (0..ROW_SIZES.len()).filter_map(|row| Self::row_range(row).map(|r| &self.blocks[r]))
    }

    /// Formats the pyramid as centred rows of `label(value)` cells.
    pub fn display(&self) -> String {
        let rows: Vec<String> = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|b| format!("{:^7}", b.to_string()))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);

        rows.iter()
            .map(|row| {
                let pad = (width - row.chars().count()) / 2;
                format!("{}{}", " ".repeat(pad), row).trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A pyramid paired with the target it was generated for.
///
/// The two are only meaningful together; a new round replaces both.
///
/// Deserializing re-checks [`PuzzleInvariants`], so a puzzle received from
/// another participant is rejected unless its target is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
#[serde(try_from = "PuzzleData")]
pub struct Puzzle {
    pyramid: Pyramid,
    target: i32,
}

#[derive(Deserialize)]
struct PuzzleData {
    pyramid: Pyramid,
    target: i32,
}

impl TryFrom<PuzzleData> for Puzzle {
    type Error = InvalidPuzzle;

    fn try_from(data: PuzzleData) -> Result<Self, Self::Error> {
        let puzzle = Self::new(data.pyramid, data.target);
        PuzzleInvariants::check_all(&puzzle).map_err(|violations| {
            InvalidPuzzle(violations.into_iter().map(|v| v.description).collect())
        })?;
        Ok(puzzle)
    }
}

/// A received pyramid or puzzle broke one or more of its rules.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid puzzle: {}", _0.join("; "))]
pub struct InvalidPuzzle(pub Vec<String>);

impl std::error::Error for InvalidPuzzle {}

impl Puzzle {
    /// Returns the pyramid.
    pub fn pyramid(&self) -> &Pyramid {
        &self.pyramid
    }

    /// Returns the target number.
    pub fn target(&self) -> i32 {
        self.target
    }

    /// The always-solvable puzzle used when generation gives up.
    pub fn canonical() -> Self {
        // a + b + c = 1 + 2 + 3
        Self::new(Pyramid::canonical(), 6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_ranges() {
        assert_eq!(Pyramid::row_range(0), Some(0..1));
        assert_eq!(Pyramid::row_range(1), Some(1..3));
        assert_eq!(Pyramid::row_range(2), Some(3..6));
        assert_eq!(Pyramid::row_range(3), Some(6..10));
        assert_eq!(Pyramid::row_range(4), None);
    }

    #[test]
    fn test_row_of() {
        assert_eq!(Pyramid::row_of(0), Some(0));
        assert_eq!(Pyramid::row_of(2), Some(1));
        assert_eq!(Pyramid::row_of(5), Some(2));
        assert_eq!(Pyramid::row_of(9), Some(3));
        assert_eq!(Pyramid::row_of(10), None);
    }

    #[test]
    fn test_canonical_labels_and_values() {
        let pyramid = Pyramid::canonical();
        let labels: String = pyramid.blocks().iter().map(|b| b.label()).collect();
        assert_eq!(labels, "abcdefghij");
        assert_eq!(pyramid.blocks()[9].magnitude(), 10);
        assert_eq!(pyramid.operator_count(), 0);
    }

    #[test]
    fn test_display_has_four_rows() {
        let text = Pyramid::canonical().display();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("a(+1)"));
        assert!(lines[3].contains("j(+10)"));
    }

    #[test]
    fn test_relabelled_pyramid_rejected() {
        let mut blocks = *Pyramid::canonical().blocks();
        blocks.swap(0, 1);
        let data = PyramidData { blocks };
        let err = Pyramid::try_from(data).unwrap_err();
        assert!(err.to_string().contains("bacdefghij"));
    }

    #[test]
    fn test_unreachable_target_rejected() {
        let data = PuzzleData {
            pyramid: Pyramid::canonical(),
            target: 1000,
        };
        let err = Puzzle::try_from(data).unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert!(err.to_string().starts_with("Invalid puzzle: "));
    }
}
