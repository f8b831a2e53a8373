use super::{CorpusError, PuzzleCorpus};
use crate::{NewPuzzle, Puzzle, PuzzleId};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct State {
    puzzles: BTreeMap<PuzzleId, Puzzle>,
    next_id: i64,
}

/// A corpus held in memory, for tests and embedding callers.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    state: Mutex<State>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CorpusError> {
        self.state.lock().map_err(|_| CorpusError::Poisoned)
    }

    /// Stores `puzzle` under a fresh id.
    pub fn insert(&self, puzzle: NewPuzzle) -> Result<PuzzleId, CorpusError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = PuzzleId(state.next_id);
        state.puzzles.insert(id, puzzle.into_puzzle(id));
        Ok(id)
    }

    pub fn len(&self) -> Result<usize, CorpusError> {
        Ok(self.lock()?.puzzles.len())
    }

    pub fn is_empty(&self) -> Result<bool, CorpusError> {
        Ok(self.lock()?.puzzles.is_empty())
    }

    pub fn contains(&self, id: PuzzleId) -> Result<bool, CorpusError> {
        Ok(self.lock()?.puzzles.contains_key(&id))
    }
}

impl PuzzleCorpus for MemoryCorpus {
    fn list_ids(&self) -> Result<Vec<PuzzleId>, CorpusError> {
        Ok(self.lock()?.puzzles.keys().copied().collect())
    }

    fn fetch(&self, id: PuzzleId) -> Result<Option<Puzzle>, CorpusError> {
        Ok(self.lock()?.puzzles.get(&id).cloned())
    }

    fn delete(&self, id: PuzzleId) -> Result<bool, CorpusError> {
        Ok(self.lock()?.puzzles.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(key: &str) -> NewPuzzle {
        NewPuzzle::new(key, "4k3/8/8/8/8/8/8/4K3 w - - 0 1", "e1e2 e8e7")
    }

    #[test]
    fn insert_fetch_delete() {
        let corpus = MemoryCorpus::new();
        let a = corpus.insert(sample("a")).unwrap();
        let b = corpus.insert(sample("b")).unwrap();
        assert_eq!(corpus.list_ids().unwrap(), vec![a, b]);
        assert_eq!(corpus.fetch(a).unwrap().map(|p| p.key), Some("a".to_string()));

        assert!(corpus.delete(a).unwrap());
        assert!(!corpus.delete(a).unwrap());
        assert_eq!(corpus.fetch(a).unwrap(), None);
        assert_eq!(corpus.list_ids().unwrap(), vec![b]);
        assert_eq!(corpus.len().unwrap(), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let corpus = MemoryCorpus::new();
        let first = corpus.insert(sample("a")).unwrap();
        corpus.delete(first).unwrap();
        let second = corpus.insert(sample("b")).unwrap();
        assert!(second > first);
        assert!(!corpus.contains(first).unwrap());
    }
}
