//! Picks a servable puzzle, deleting broken ones along the way.

use crate::corpus::PuzzleCorpus;
use crate::validate::{validate_puzzle, ValidatedPuzzle};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Attempts made per request unless configured otherwise.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Why no puzzle could be produced.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    #[error("the puzzle corpus is empty")]
    CorpusEmpty,

    #[error("no valid puzzle found in {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("the puzzle corpus failed: {message}")]
    CorpusFailure { message: String },
}

/// Outcome of a selection request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    Found(T),
    Unavailable(Unavailable),
}

impl<T> Selection<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        match self {
            Selection::Found(value) => Selection::Found(f(value)),
            Selection::Unavailable(reason) => Selection::Unavailable(reason),
        }
    }

    pub fn found(self) -> Option<T> {
        match self {
            Selection::Found(value) => Some(value),
            Selection::Unavailable(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Selection::Found(_))
    }

    pub fn into_result(self) -> Result<T, Unavailable> {
        match self {
            Selection::Found(value) => Ok(value),
            Selection::Unavailable(reason) => Err(reason),
        }
    }
}

/// Draws random puzzles from `corpus` until one validates.
///
/// Each draw is uniform over the ids present at that moment. A puzzle that
/// fails validation is deleted from the corpus before the next draw. A
/// puzzle that disappears between listing and fetching, or a failing fetch
/// or delete, costs an attempt. An empty corpus or a failing listing ends
/// the request at once.
pub fn select_puzzle<C, R>(corpus: &C, rng: &mut R, max_attempts: u32) -> Selection<ValidatedPuzzle>
where
    C: PuzzleCorpus + ?Sized,
    R: Rng + ?Sized,
{
    let mut attempts = 0;
    while attempts < max_attempts {
        let ids = match corpus.list_ids() {
            Ok(ids) => ids,
            Err(err) => {
                error!(error = %err, "failed to list puzzles");
                return Selection::Unavailable(Unavailable::CorpusFailure {
                    message: err.to_string(),
                });
            }
        };
        let Some(&id) = ids.choose(rng) else {
            info!("puzzle corpus is empty");
            return Selection::Unavailable(Unavailable::CorpusEmpty);
        };
        attempts += 1;
        debug!(attempt = attempts, %id, candidates = ids.len(), "trying puzzle");

        let puzzle = match corpus.fetch(id) {
            Ok(Some(puzzle)) => puzzle,
            Ok(None) => {
                debug!(%id, "puzzle removed before it could be fetched");
                continue;
            }
            Err(err) => {
                error!(%id, error = %err, "failed to fetch puzzle");
                continue;
            }
        };

        let key = puzzle.key.clone();
        match validate_puzzle(puzzle) {
            Ok(valid) => {
                info!(%id, key = %key, attempts, "serving puzzle");
                return Selection::Found(valid);
            }
            Err(defect) => {
                warn!(%id, key = %key, %defect, "removing invalid puzzle");
                match corpus.delete(id) {
                    Ok(true) => {}
                    Ok(false) => debug!(%id, "invalid puzzle was already removed"),
                    Err(err) => error!(%id, error = %err, "failed to remove invalid puzzle"),
                }
            }
        }
    }

    warn!(attempts, "giving up without a valid puzzle");
    Selection::Unavailable(Unavailable::AttemptsExhausted { attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::MemoryCorpus;
    use crate::NewPuzzle;
    use chess_core::Fen;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SCHOLAR: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5Q2/PPPP1PPP/RNB1K1NR b KQkq - 3 3";

    fn valid() -> NewPuzzle {
        NewPuzzle::new("valid", SCHOLAR, "a7a6 f3f7")
    }

    #[test]
    fn empty_corpus() {
        let corpus = MemoryCorpus::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_puzzle(&corpus, &mut rng, 10).found().map(|v| v.puzzle.id),
            None
        );
        assert_eq!(
            select_puzzle(&corpus, &mut rng, 10).into_result().unwrap_err(),
            Unavailable::CorpusEmpty
        );
    }

    #[test]
    fn zero_attempts_never_touches_the_corpus() {
        let corpus = MemoryCorpus::new();
        corpus.insert(NewPuzzle::new("bad", Fen::STARTPOS, "e2e4")).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_puzzle(&corpus, &mut rng, 0).into_result().unwrap_err(),
            Unavailable::AttemptsExhausted { attempts: 0 }
        );
        assert_eq!(corpus.len().unwrap(), 1);
    }

    #[test]
    fn finds_the_only_valid_puzzle_and_purges_the_rest() {
        let corpus = MemoryCorpus::new();
        corpus.insert(NewPuzzle::new("short", Fen::STARTPOS, "e2e4")).unwrap();
        corpus.insert(NewPuzzle::new("illegal", Fen::STARTPOS, "e2e4 e2e4")).unwrap();
        let keep = corpus.insert(valid()).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let found = select_puzzle(&corpus, &mut rng, 10).found().unwrap();
        assert_eq!(found.puzzle.id, keep);
        assert_eq!(found.solution[0].san, "Qxf7#");
        // Whatever was drawn before the valid puzzle is gone; the valid one stays.
        assert!(corpus.contains(keep).unwrap());
    }

    #[test]
    fn all_invalid_exhausts_and_empties() {
        let corpus = MemoryCorpus::new();
        for key in ["a", "b", "c"] {
            corpus.insert(NewPuzzle::new(key, "bogus", "e2e4 e7e5")).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            select_puzzle(&corpus, &mut rng, 10).into_result().unwrap_err(),
            Unavailable::CorpusEmpty
        );
        assert!(corpus.is_empty().unwrap());
    }

    #[test]
    fn selection_map() {
        let found: Selection<u32> = Selection::Found(2);
        assert_eq!(found.map(|n| n * 10), Selection::Found(20));
        let none: Selection<u32> = Selection::Unavailable(Unavailable::CorpusEmpty);
        assert!(!none.map(|n| n + 1).is_found());
    }

    #[test]
    fn unavailable_serializes_with_reason_tag() {
        let json = serde_json::to_string(&Unavailable::AttemptsExhausted { attempts: 3 }).unwrap();
        assert_eq!(json, r#"{"reason":"attempts_exhausted","attempts":3}"#);
    }
}
