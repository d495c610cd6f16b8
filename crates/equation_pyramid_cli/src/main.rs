//! Equation Pyramid - command-line front end.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PuzzleArgs};
use equation_pyramid::{
    GeneratorConfig, Puzzle, PyramidGenerator, Round, Submission, distinct_count,
    find_valid_combinations,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate { puzzle, json } => run_generate(&puzzle, json),
        Command::Solve { puzzle } => run_solve(&puzzle),
        Command::Check { letters, puzzle } => run_check(&puzzle, &letters),
    }
}

/// A generated puzzle together with the seed that rebuilds it.
#[derive(Debug, Serialize, Deserialize)]
struct SeededPuzzle {
    seed: u64,
    puzzle: Puzzle,
}

/// Builds the puzzle described by the shared arguments.
#[instrument]
fn build_puzzle(args: &PuzzleArgs) -> Result<SeededPuzzle> {
    let config = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Loading {}", path.display()))?,
        None => GeneratorConfig::default(),
    };
    debug!(?config, "Generator config");

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!(seed, "Generating puzzle");

    let mut generator = PyramidGenerator::seeded(config, seed)?;
    let (puzzle, report) = generator.generate_with_report();
    info!(attempts = report.attempts(), outcome = ?report.outcome(), "Puzzle ready");

    Ok(SeededPuzzle { seed, puzzle })
}

/// Seed drawn from the clock when none is given.
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn print_puzzle(seed: u64, puzzle: &Puzzle) {
    println!("seed: {}", seed);
    println!("{}", puzzle.pyramid().display());
    println!();
    println!("target: {}", puzzle.target());
}

/// Generate a puzzle and print it
fn run_generate(args: &PuzzleArgs, json: bool) -> Result<()> {
    let SeededPuzzle { seed, puzzle } = build_puzzle(args)?;

    if json {
        println!("{}", puzzle_json(seed, puzzle)?);
        return Ok(());
    }

    let combinations = find_valid_combinations(puzzle.pyramid(), puzzle.target());
    print_puzzle(seed, &puzzle);
    println!("solutions: {}", distinct_count(&combinations));
    Ok(())
}

/// JSON document shared with other players: the puzzle and its seed.
fn puzzle_json(seed: u64, puzzle: Puzzle) -> Result<String> {
    Ok(serde_json::to_string_pretty(&SeededPuzzle { seed, puzzle })?)
}

/// List every combination that solves the puzzle
fn run_solve(args: &PuzzleArgs) -> Result<()> {
    let SeededPuzzle { seed, puzzle } = build_puzzle(args)?;
    let round = Round::new(puzzle);

    print_puzzle(seed, round.puzzle());
    println!(
        "{} ordered combinations, {} distinct:",
        round.combinations().len(),
        round.total()
    );
    for combination in round.combinations() {
        let equation = equation_pyramid::evaluate_equation(
            &combination.indices(),
            round.puzzle().pyramid(),
        )?;
        println!("  {}", equation);
    }
    Ok(())
}

/// Check typed letters against the puzzle
fn run_check(args: &PuzzleArgs, letters: &str) -> Result<()> {
    let SeededPuzzle { seed, puzzle } = build_puzzle(args)?;
    let mut round = Round::new(puzzle);
    print_puzzle(seed, round.puzzle());

    match round.submit_letters(letters) {
        Submission::Found { equation, remaining } => {
            println!("hit: {} ({} more to find)", equation, remaining)
        }
        Submission::AlreadyFound { equation } => println!("already found: {}", equation),
        Submission::Miss { equation } => println!("miss: {}", equation),
        Submission::Invalid(e) => println!("invalid: {}", e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_json_is_a_single_document() {
        let args = PuzzleArgs {
            seed: Some(3),
            config: None,
        };
        let SeededPuzzle { seed, puzzle } = build_puzzle(&args).unwrap();
        let json = puzzle_json(seed, puzzle.clone()).unwrap();

        let parsed: SeededPuzzle = serde_json::from_str(&json).expect("Output should be JSON");
        assert_eq!(parsed.seed, 3);
        assert_eq!(parsed.puzzle, puzzle);
    }

    #[test]
    fn test_same_seed_rebuilds_puzzle() {
        let args = PuzzleArgs {
            seed: Some(12),
            config: None,
        };
        let first = build_puzzle(&args).unwrap();
        let second = build_puzzle(&args).unwrap();
        assert_eq!(first.puzzle, second.puzzle);
    }
}
