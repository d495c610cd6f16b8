//! Randomised pyramid generation with a solvability guarantee.
//!
//! A candidate pyramid is built from shuffled pools, paired with a random
//! target and kept only if the combination finder reaches that target.
//! Attempts are capped by [`GeneratorConfig::max_attempts`]; once the cap is
//! hit the generator retargets the last candidate to a result it can reach,
//! and as a last resort hands out [`Puzzle::canonical`].

use crate::block::{BLOCK_COUNT, BlockKind, Operator};
use crate::combinations::{find_valid_combinations, ordered_triples};
use crate::config::{ConfigError, GeneratorConfig};
use crate::evaluate::evaluate_equation;
use crate::invariants::{InvariantSet, PuzzleInvariants};
use crate::pyramid::{Puzzle, Pyramid, ROW_SIZES};
use derive_getters::Getters;
use rand::rngs::{StdRng, ThreadRng};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Number of operator blocks in every pyramid.
pub const OPERATOR_BLOCKS: usize = 4;

/// How the returned puzzle was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A random candidate reached its random target.
    Solved,
    /// Attempts ran out; the last candidate was given a reachable target.
    Retargeted,
    /// Attempts ran out and the last candidate had no usable result.
    Canonical,
}

/// Summary of one generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Candidate pyramids drawn.
    attempts: u32,
    /// How the puzzle was obtained.
    outcome: Outcome,
}

/// Produces solvable puzzles from a configuration and a random source.
#[derive(Debug, Clone)]
pub struct PyramidGenerator<R> {
    config: GeneratorConfig,
    rng: R,
}

impl PyramidGenerator<StdRng> {
    /// Creates a generator whose puzzles are fully determined by `seed`.
    ///
    /// Every participant of a shared round can rebuild the same puzzle from
    /// the same configuration and seed.
    #[instrument(skip(config))]
    pub fn seeded(config: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PyramidGenerator<R> {
    /// Creates a generator after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration is invalid.
    #[instrument(skip(config, rng))]
    pub fn new(config: GeneratorConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a solvable puzzle.
    pub fn generate(&mut self) -> Puzzle {
        self.generate_with_report().0
    }

    /// Generates a solvable puzzle and reports how it was obtained.
    #[instrument(skip(self), fields(max_attempts = *self.config.max_attempts()))]
    pub fn generate_with_report(&mut self) -> (Puzzle, GenerationReport) {
        let max_attempts = *self.config.max_attempts();
        let mut last = None;

        for attempt in 1..=max_attempts {
            let pyramid = self.candidate_pyramid();
            let target = self.draw_target();
            let combinations = find_valid_combinations(&pyramid, target);

            if !combinations.is_empty() {
                info!(attempt, target, solutions = combinations.len(), "Puzzle accepted");
                let puzzle = Puzzle::new(pyramid, target);
                debug_assert!(PuzzleInvariants::check_all(&puzzle).is_ok());
                let report = GenerationReport {
                    attempts: attempt,
                    outcome: Outcome::Solved,
                };
                return (puzzle, report);
            }

            debug!(attempt, target, "Candidate unsolvable, regenerating");
            last = Some(pyramid);
        }

        warn!(max_attempts, "Attempt limit reached, falling back");
        let (puzzle, outcome) = self.fallback(last);
        let report = GenerationReport {
            attempts: max_attempts,
            outcome,
        };
        (puzzle, report)
    }

    /// Picks the puzzle returned once attempts run out.
    fn fallback(&self, last: Option<Pyramid>) -> (Puzzle, Outcome) {
        let retargeted = last.and_then(|pyramid| {
            let target = self.reachable_target(&pyramid)?;
            Some(Puzzle::new(pyramid, target))
        });

        match retargeted {
            Some(puzzle) if PuzzleInvariants::check_all(&puzzle).is_ok() => {
                info!(target = puzzle.target(), "Retargeted last candidate");
                (puzzle, Outcome::Retargeted)
            }
            // Unreachable from generate_with_report: a candidate has six
            // number blocks, and any three of them sum to a whole number.
            _ => {
                warn!("No reachable target on last candidate, using canonical puzzle");
                (Puzzle::canonical(), Outcome::Canonical)
            }
        }
    }

    /// Builds one candidate pyramid (not yet checked for solvability).
    #[instrument(level = "debug", skip(self))]
    pub fn candidate_pyramid(&mut self) -> Pyramid {
        let values = self.draw_values();
        let operators = self.draw_operators();
        let positions = self.operator_positions(operators.len());

        let mut kinds = values.map(|value| BlockKind::Number { value });
        for (&position, &operator) in positions.iter().zip(&operators) {
            kinds[position] = BlockKind::Operator {
                operator,
                magnitude: values[position].unsigned_abs(),
            };
        }

        Pyramid::from_kinds(kinds)
    }

    /// Shuffles the number pool and takes ten values, wrapping around a
    /// short pool so values repeat.
    fn draw_values(&mut self) -> [i32; BLOCK_COUNT] {
        let mut pool = self.config.number_pool().clone();
        pool.shuffle(&mut self.rng);

        let mut index = 0;
        [(); BLOCK_COUNT].map(|_| {
            let value = pool[index % pool.len()];
            index += 1;
            value
        })
    }

    /// Shuffles the operator pool and keeps the first four.
    fn draw_operators(&mut self) -> Vec<Operator> {
        let mut pool = self.config.operator_pool().clone();
        pool.shuffle(&mut self.rng);
        pool.truncate(OPERATOR_BLOCKS);
        pool
    }

    /// Picks `count` distinct positions, one per row first, then anywhere.
    fn operator_positions(&mut self, count: usize) -> Vec<usize> {
        let mut positions = Vec::with_capacity(count);

        for row in 0..ROW_SIZES.len() {
            if positions.len() == count {
                break;
            }
            if let Some(range) = Pyramid::row_range(row) {
                positions.push(self.rng.random_range(range));
            }
        }

        while positions.len() < count {
            let unused: Vec<usize> = (0..BLOCK_COUNT)
                .filter(|p| !positions.contains(p))
                .collect();
            if unused.is_empty() {
                break;
            }
            positions.push(unused[self.rng.random_range(0..unused.len())]);
        }

        positions
    }

    fn draw_target(&mut self) -> i32 {
        self.rng
            .random_range(*self.config.target_min()..=*self.config.target_max())
    }

    /// First whole-number result reachable on `pyramid`, preferring the
    /// configured target range.
    fn reachable_target(&self, pyramid: &Pyramid) -> Option<i32> {
        let whole: Vec<i32> = ordered_triples()
            .filter_map(|indices| evaluate_equation(&indices, pyramid).ok())
            .filter_map(|equation| whole_number(equation.result()))
            .collect();

        let range = *self.config.target_min()..=*self.config.target_max();
        whole
            .iter()
            .copied()
            .find(|target| range.contains(target))
            .or_else(|| whole.first().copied())
    }
}

fn whole_number(value: f64) -> Option<i32> {
    let fits = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
    (value.fract() == 0.0 && fits).then_some(value as i32)
}

/// Generates a solvable puzzle with the default configuration.
#[instrument]
pub fn generate_pyramid() -> Puzzle {
    let rng: ThreadRng = rand::rng();
    let mut generator = PyramidGenerator {
        config: GeneratorConfig::default(),
        rng,
    };
    generator.generate()
}
