//! Free-text letter input.
//!
//! Players may type the labels of the blocks they want instead of clicking
//! them. Every alphabetic character counts as a typed letter; letters that
//! are not block labels come back as `None` so the caller can reject the
//! submission before evaluating anything.

use crate::evaluate::SELECTION_SIZE;
use crate::pyramid::Pyramid;
use tracing::instrument;

/// Why typed letters could not be turned into a selection.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LetterError {
    /// A typed letter does not label any block.
    #[display("No block is labelled '{}'", _0)]
    UnknownLetter(char),

    /// Fewer than three distinct letters were typed.
    #[display("Need 3 distinct letters (got {})", _0)]
    TooFewLetters(usize),
}

impl std::error::Error for LetterError {}

/// Lowercases one typed letter, keeping it whole.
///
/// A letter whose lowercase form is several characters (`İ`) is kept as
/// typed, so it never matches a label.
fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// Distinct lowercase letters in input order, at most [`SELECTION_SIZE`].
fn distinct_letters(text: &str) -> Vec<char> {
    let mut letters = Vec::with_capacity(SELECTION_SIZE);
    for c in text.chars().filter(|c| c.is_alphabetic()).map(fold_case) {
        if letters.len() == SELECTION_SIZE {
            break;
        }
        if !letters.contains(&c) {
            letters.push(c);
        }
    }
    letters
}

/// Maps typed letters to block indices.
///
/// Matching is case-insensitive and repeated letters are collapsed. Only the
/// first three distinct letters are used. Letters with no matching block map
/// to `None`.
#[instrument(skip(pyramid))]
pub fn parse_letter_input(text: &str, pyramid: &Pyramid) -> Vec<Option<usize>> {
    distinct_letters(text)
        .into_iter()
        .map(|letter| pyramid.blocks().iter().position(|b| b.label() == letter))
        .collect()
}

/// Parses typed letters into a complete three-block selection.
///
/// # Errors
///
/// Returns [`LetterError`] if any letter is unknown or fewer than three
/// distinct letters were typed.
#[instrument(skip(pyramid))]
pub fn selection_from_letters(
    text: &str,
    pyramid: &Pyramid,
) -> Result<[usize; SELECTION_SIZE], LetterError> {
    let letters = distinct_letters(text);
    let indices = parse_letter_input(text, pyramid);

    let mut selection = Vec::with_capacity(SELECTION_SIZE);
    for (letter, index) in letters.into_iter().zip(indices) {
        selection.push(index.ok_or(LetterError::UnknownLetter(letter))?);
    }

    let count = selection.len();
    selection
        .try_into()
        .map_err(|_| LetterError::TooFewLetters(count))
}
