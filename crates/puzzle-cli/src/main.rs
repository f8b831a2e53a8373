//! Puzzle CLI - serves and stores daily chess puzzles.
//!
//! Settings come from `puzzles.toml` (or `--config`); flags given on the
//! command line win over the file.

use anyhow::Context;
use clap::{Parser, Subcommand};
use puzzle_engine::{get_display_puzzle, NewPuzzle, PuzzleConfig, Selection, SqliteCorpus};
use std::path::PathBuf;

/// Puzzle CLI - picks, validates and stores chess puzzles.
#[derive(Parser)]
#[command(name = "puzzle-cli")]
#[command(about = "Serves the chess puzzle of the day from a SQLite corpus")]
struct Args {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to SQLite database (overrides the config file)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a puzzle, removing broken ones on the way
    Daily {
        /// Candidates to try before giving up
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Seed for a repeatable pick
        #[arg(long)]
        seed: Option<u64>,

        /// Print the puzzle as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store a puzzle, replacing any puzzle with the same key
    Add {
        #[arg(long)]
        key: String,

        /// Starting position in FEN
        #[arg(long)]
        fen: String,

        /// Coordinate moves, setup move first, e.g. "e2e4 e7e5 g1f3"
        #[arg(long)]
        moves: String,

        #[arg(long)]
        rating: Option<i32>,

        /// Comma- or space-separated theme tags
        #[arg(long, default_value = "")]
        themes: String,
    },
    /// Print how many puzzles are stored
    Count,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PuzzleConfig::load_from(path),
        None => PuzzleConfig::load(),
    }
    .context("Failed to load configuration")?;
    if let Some(db) = args.db {
        config.database = db;
    }

    tracing::info!("Database: {:?}", config.database);
    if let Some(dir) = config.database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let corpus = SqliteCorpus::open(&config.database).context("Failed to open puzzle database")?;

    match args.command {
        Command::Daily {
            max_attempts,
            seed,
            json,
        } => {
            if let Some(max_attempts) = max_attempts {
                config.max_attempts = max_attempts;
            }
            if seed.is_some() {
                config.seed = seed;
            }
            config.validate()?;

            let mut rng = config.rng();
            match get_display_puzzle(&corpus, &mut rng, config.max_attempts) {
                Selection::Found(view) if json => {
                    println!("{}", serde_json::to_string_pretty(&view)?);
                }
                Selection::Found(view) => {
                    println!("Puzzle {} ({}, rated {})", view.puzzle.key, view.difficulty, view.puzzle.rating);
                    println!("Position: {}", view.fen_after_setup);
                    println!("Last move: {}", view.setup_move);
                    println!("Solution: {}", view.solution_text);
                }
                Selection::Unavailable(reason) if json => {
                    println!("{}", serde_json::to_string_pretty(&reason)?);
                }
                Selection::Unavailable(reason) => {
                    tracing::info!("No puzzle: {}", reason);
                    println!("no puzzle available");
                }
            }
        }
        Command::Add {
            key,
            fen,
            moves,
            rating,
            themes,
        } => {
            let mut puzzle = NewPuzzle::new(key, fen, &moves).with_themes(&themes);
            if let Some(rating) = rating {
                puzzle = puzzle.with_rating(rating);
            }
            let id = corpus.upsert(&puzzle)?;
            tracing::info!("Stored puzzle {} as {}", puzzle.key, id);
            println!("{id}");
        }
        Command::Count => {
            println!("{}", corpus.count()?);
        }
    }

    Ok(())
}
