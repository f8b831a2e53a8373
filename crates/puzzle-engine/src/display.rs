//! The view handed to whatever renders the daily puzzle.

use crate::corpus::PuzzleCorpus;
use crate::format::format_solution;
use crate::selector::{select_puzzle, Selection};
use crate::validate::ValidatedPuzzle;
use crate::{Difficulty, Puzzle};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything needed to show a puzzle: the diagram after the setup move and
/// the solution as one line of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPuzzle {
    pub puzzle: Puzzle,
    pub difficulty: Difficulty,
    /// The setup move in coordinate notation, as the board understood it.
    pub setup_move: String,
    pub fen_after_setup: String,
    pub solution_text: String,
}

impl From<ValidatedPuzzle> for DisplayPuzzle {
    fn from(valid: ValidatedPuzzle) -> Self {
        DisplayPuzzle {
            difficulty: valid.puzzle.difficulty(),
            setup_move: valid.setup.uci.to_string(),
            fen_after_setup: valid.after_setup.to_fen(),
            solution_text: format_solution(&valid.solution),
            puzzle: valid.puzzle,
        }
    }
}

/// Selects a valid puzzle and prepares it for display.
pub fn get_display_puzzle<C, R>(corpus: &C, rng: &mut R, max_attempts: u32) -> Selection<DisplayPuzzle>
where
    C: PuzzleCorpus + ?Sized,
    R: Rng + ?Sized,
{
    select_puzzle(corpus, rng, max_attempts).map(DisplayPuzzle::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate_puzzle;
    use crate::{NewPuzzle, PuzzleId};

    const TWO_KNIGHTS: &str = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

    #[test]
    fn builds_view_from_validated_puzzle() {
        let puzzle = NewPuzzle::new("k1", TWO_KNIGHTS, "f1c4 g8f6 f3g5 d7d5 e4d5")
            .with_rating(1300)
            .into_puzzle(PuzzleId(9));
        let view = DisplayPuzzle::from(validate_puzzle(puzzle.clone()).unwrap());

        assert_eq!(view.puzzle, puzzle);
        assert_eq!(view.difficulty, Difficulty::Medium);
        assert_eq!(view.setup_move, "f1c4");
        assert_eq!(
            view.fen_after_setup,
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3"
        );
        assert_eq!(view.solution_text, "1. ♞f6 ♘g5  2. d5 ed5");
    }

    #[test]
    fn castling_setup_move_is_normalized() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let puzzle = NewPuzzle::new("castle", fen, "e1h1 e8c8").into_puzzle(PuzzleId(1));
        let view = DisplayPuzzle::from(validate_puzzle(puzzle).unwrap());
        assert_eq!(view.setup_move, "e1g1");
        assert_eq!(view.solution_text, "1. OOO");
    }

    #[test]
    fn serializes_for_the_page() {
        let puzzle = NewPuzzle::new("k1", TWO_KNIGHTS, "f1c4 g8f6").into_puzzle(PuzzleId(3));
        let view = DisplayPuzzle::from(validate_puzzle(puzzle).unwrap());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["puzzle"]["id"], 3);
        assert_eq!(json["difficulty"], "medium");
        assert_eq!(json["solution_text"], "1. ♞f6");
        let back: DisplayPuzzle = serde_json::from_value(json).unwrap();
        assert_eq!(back, view);
    }
}
