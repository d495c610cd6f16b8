//! Generator configuration.

use crate::block::Operator;
use crate::generator::OPERATOR_BLOCKS;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunable parameters for pyramid generation.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Candidate block values; magnitudes are their absolute values.
    #[serde(default = "default_number_pool")]
    number_pool: Vec<i32>,

    /// Candidate operators, shuffled and truncated to four per pyramid.
    #[serde(default = "default_operator_pool")]
    operator_pool: Vec<Operator>,

    /// Smallest target that may be drawn (inclusive).
    #[serde(default = "default_target_min")]
    target_min: i32,

    /// Largest target that may be drawn (inclusive).
    #[serde(default = "default_target_max")]
    target_max: i32,

    /// Candidate pyramids tried before falling back.
    #[serde(default = "default_max_attempts")]
    max_attempts: u32,
}

#[instrument]
fn default_number_pool() -> Vec<i32> {
    (-9..=9).filter(|&n| n != 0).collect()
}

#[instrument]
fn default_operator_pool() -> Vec<Operator> {
    vec![
        Operator::Multiply,
        Operator::Multiply,
        Operator::Divide,
        Operator::Divide,
        Operator::Add,
        Operator::Subtract,
    ]
}

#[instrument]
fn default_target_min() -> i32 {
    -10
}

#[instrument]
fn default_target_max() -> i32 {
    19
}

#[instrument]
fn default_max_attempts() -> u32 {
    500
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            number_pool: default_number_pool(),
            operator_pool: default_operator_pool(),
            target_min: default_target_min(),
            target_max: default_target_max(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl GeneratorConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the values fail [`validate`](Self::validate).
    #[instrument(skip(number_pool, operator_pool))]
    pub fn new(
        number_pool: Vec<i32>,
        operator_pool: Vec<Operator>,
        target_min: i32,
        target_max: i32,
        max_attempts: u32,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            number_pool,
            operator_pool,
            target_min,
            target_max,
            max_attempts,
        };
        config.validate()?;
        Ok(config)
    }

    /// Default pools with a wider symmetric target range of [-50, 50].
    pub fn wide() -> Self {
        Self {
            target_min: -50,
            target_max: 50,
            ..Self::default()
        }
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading generator config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            target_min = config.target_min,
            target_max = config.target_max,
            max_attempts = config.max_attempts,
            "Generator config loaded"
        );
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that a pyramid can be generated from these values.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_pool.is_empty() {
            return Err(ConfigError::new("number_pool must not be empty".to_string()));
        }
        if self.operator_pool.len() < OPERATOR_BLOCKS {
            return Err(ConfigError::new(format!(
                "operator_pool needs at least {} operators (got {})",
                OPERATOR_BLOCKS,
                self.operator_pool.len()
            )));
        }
        if self.target_min > self.target_max {
            return Err(ConfigError::new(format!(
                "target_min ({}) exceeds target_max ({})",
                self.target_min, self.target_max
            )));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::new("max_attempts must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// A generator config that could not be read or does not make sense.
///
/// Carries the source location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// What is wrong with the config.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl ConfigError {
    /// Builds an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
