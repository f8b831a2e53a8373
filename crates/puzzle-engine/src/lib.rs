//! Puzzle-of-the-day engine.
//!
//! Draws a random puzzle from a [`PuzzleCorpus`], replays its moves through
//! the rules engine, deletes it if any move is illegal and tries again, and
//! turns the solution of the first clean puzzle into display text.
//!
//! ```
//! use puzzle_engine::{get_display_puzzle, MemoryCorpus, NewPuzzle};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let corpus = MemoryCorpus::new();
//! corpus
//!     .insert(NewPuzzle::new(
//!         "mate",
//!         "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR b KQkq - 3 3",
//!         "a7a6 f3f7",
//!     ))
//!     .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let view = get_display_puzzle(&corpus, &mut rng, 10).found().unwrap();
//! assert_eq!(view.setup_move, "a7a6");
//! assert_eq!(view.solution_text, "1. ♕f7");
//! ```

pub mod config;
pub mod corpus;
pub mod display;
pub mod format;
pub mod puzzle;
pub mod selector;
pub mod validate;

pub use config::{ConfigError, PuzzleConfig};
pub use corpus::{CorpusError, DbPool, MemoryCorpus, PuzzleCorpus, SqliteCorpus};
pub use display::{get_display_puzzle, DisplayPuzzle};
pub use format::{clean_move, clean_san, collapse_repeated_lowercase, format_solution, number_moves};
pub use puzzle::{Difficulty, NewPuzzle, Puzzle, PuzzleId};
pub use selector::{select_puzzle, Selection, Unavailable, DEFAULT_MAX_ATTEMPTS};
pub use validate::{validate_puzzle, PuzzleDefect, ValidatedPuzzle, MIN_PUZZLE_MOVES};
