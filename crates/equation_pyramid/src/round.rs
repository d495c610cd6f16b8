//! Round tracking: which combinations of the current puzzle have been found.
//!
//! Selections of the same three blocks in different orders count as one
//! discovery, so progress is measured in distinct block sets.

use crate::combinations::{
    Combination, CombinationKey, distinct_count, find_valid_combinations,
};
use crate::evaluate::{Equation, EvaluationError, evaluate_equation};
use crate::letters::parse_letter_input;
use crate::pyramid::Puzzle;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Result of submitting a selection to a [`Round`].
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A new combination reaching the target.
    Found {
        /// The evaluated equation.
        equation: Equation,
        /// Distinct combinations still undiscovered.
        remaining: usize,
    },
    /// Reaches the target, but these blocks were already found.
    AlreadyFound {
        /// The evaluated equation.
        equation: Equation,
    },
    /// A valid equation that misses the target.
    Miss {
        /// The evaluated equation.
        equation: Equation,
    },
    /// The selection could not be evaluated.
    Invalid(EvaluationError),
}

/// One puzzle and the player's progress through it.
#[derive(Debug, Clone)]
pub struct Round {
    puzzle: Puzzle,
    combinations: Vec<Combination>,
    total: usize,
    found: BTreeSet<CombinationKey>,
}

impl Round {
    /// Starts a round on `puzzle`.
    #[instrument(skip(puzzle), fields(target = puzzle.target()))]
    pub fn new(puzzle: Puzzle) -> Self {
        let combinations = find_valid_combinations(puzzle.pyramid(), puzzle.target());
        let total = distinct_count(&combinations);
        info!(total, "Round started");
        Self {
            puzzle,
            combinations,
            total,
            found: BTreeSet::new(),
        }
    }

    /// The puzzle being played.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// Every ordered combination reaching the target.
    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Number of distinct block sets that reach the target.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Block sets discovered so far.
    pub fn found(&self) -> &BTreeSet<CombinationKey> {
        &self.found
    }

    /// Distinct combinations not yet discovered.
    pub fn remaining(&self) -> usize {
        self.total - self.found.len()
    }

    /// Whether every distinct combination has been discovered.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Evaluates a selection and records it if it is a new discovery.
    #[instrument(skip(self))]
    pub fn submit(&mut self, selected: &[usize]) -> Submission {
        let equation = match evaluate_equation(selected, self.puzzle.pyramid()) {
            Ok(equation) => equation,
            Err(e) => {
                debug!(error = %e, "Rejected selection");
                return Submission::Invalid(e);
            }
        };

        if !equation.matches(self.puzzle.target()) {
            return Submission::Miss { equation };
        }

        let key = CombinationKey::from_indices(equation.indices());
        if !self.found.insert(key) {
            return Submission::AlreadyFound { equation };
        }

        let remaining = self.remaining();
        info!(equation = %equation, remaining, "Combination found");
        Submission::Found {
            equation,
            remaining,
        }
    }

    /// Parses typed letters and submits them.
    ///
    /// Unknown letters reject the submission without evaluating it.
    #[instrument(skip(self))]
    pub fn submit_letters(&mut self, text: &str) -> Submission {
        let parsed = parse_letter_input(text, self.puzzle.pyramid());
        let selected: Option<Vec<usize>> = parsed.iter().copied().collect();

        match selected {
            Some(selected) => self.submit(&selected),
            None => {
                // Letter outside the pyramid: report the first position past the end.
                let missing = self.puzzle.pyramid().blocks().len();
                Submission::Invalid(EvaluationError::IndexOutOfRange(missing))
            }
        }
    }
}
