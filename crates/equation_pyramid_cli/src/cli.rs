//! Command-line interface for the pyramid binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Equation Pyramid - generate and solve arithmetic block puzzles
#[derive(Parser, Debug)]
#[command(name = "pyramid")]
#[command(about = "Generate and solve Equation Pyramid puzzles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that builds a puzzle.
#[derive(Args, Debug, Clone)]
pub struct PuzzleArgs {
    /// Seed for a reproducible puzzle (random if omitted)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Path to a generator config TOML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a puzzle and print it
    Generate {
        #[command(flatten)]
        puzzle: PuzzleArgs,

        /// Print the puzzle as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a puzzle and list every combination that solves it
    Solve {
        #[command(flatten)]
        puzzle: PuzzleArgs,
    },

    /// Check typed block letters against a puzzle
    Check {
        /// Block letters in selection order, e.g. "bad"
        letters: String,

        #[command(flatten)]
        puzzle: PuzzleArgs,
    },
}
