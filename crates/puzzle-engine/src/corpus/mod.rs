//! Puzzle storage behind the selector.
//!
//! The selector only needs three operations, so any store that can list,
//! fetch and delete puzzles by id can back it.

mod memory;
mod sqlite;

pub use memory::MemoryCorpus;
pub use sqlite::{DbPool, SqliteCorpus};

use crate::{Puzzle, PuzzleId};
use thiserror::Error;

/// Failures reported by a corpus backend.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("corpus lock poisoned")]
    Poisoned,

    #[error("{0}")]
    Backend(String),
}

/// A store of puzzles.
///
/// Methods take `&self`; implementations synchronize internally so a single
/// corpus can serve concurrent callers. A delete is visible to every later
/// `list_ids` and `fetch`.
pub trait PuzzleCorpus {
    /// Every stored id, in ascending order.
    fn list_ids(&self) -> Result<Vec<PuzzleId>, CorpusError>;

    /// The puzzle with `id`, or `None` if it does not exist (any more).
    fn fetch(&self, id: PuzzleId) -> Result<Option<Puzzle>, CorpusError>;

    /// Removes `id`. Returns `false` if it was already gone.
    fn delete(&self, id: PuzzleId) -> Result<bool, CorpusError>;
}

impl<C: PuzzleCorpus + ?Sized> PuzzleCorpus for &C {
    fn list_ids(&self) -> Result<Vec<PuzzleId>, CorpusError> {
        (**self).list_ids()
    }

    fn fetch(&self, id: PuzzleId) -> Result<Option<Puzzle>, CorpusError> {
        (**self).fetch(id)
    }

    fn delete(&self, id: PuzzleId) -> Result<bool, CorpusError> {
        (**self).delete(id)
    }
}
