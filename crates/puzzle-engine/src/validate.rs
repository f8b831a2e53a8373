//! Replays a stored puzzle to prove every move is legal.

use crate::Puzzle;
use chess_rules::{AnnotatedMove, Board, IllegalMove, PositionError};
use thiserror::Error;

/// A puzzle needs its setup move and at least one solution move.
pub const MIN_PUZZLE_MOVES: usize = 2;

/// Why a stored puzzle cannot be served.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PuzzleDefect {
    #[error("puzzle has {count} moves, at least {} are needed", MIN_PUZZLE_MOVES)]
    TooFewMoves { count: usize },

    #[error("invalid starting position: {0}")]
    InvalidPosition(#[from] PositionError),

    #[error("setup move rejected: {0}")]
    IllegalSetupMove(IllegalMove),

    /// `index` counts from the start of the stored move list.
    #[error("move {index} rejected: {source}")]
    IllegalSolutionMove { index: usize, source: IllegalMove },
}

/// A puzzle whose whole move list replays legally from its position.
#[derive(Debug, Clone)]
pub struct ValidatedPuzzle {
    pub puzzle: Puzzle,
    /// The setup move, annotated.
    pub setup: AnnotatedMove,
    /// The board after the setup move only, as the solver first sees it.
    pub after_setup: Board,
    /// Every move after the setup move, annotated in order.
    pub solution: Vec<AnnotatedMove>,
}

/// Checks `puzzle` and annotates its moves.
///
/// Moves are replayed one by one from the starting position; replay stops at
/// the first illegal move, so nothing past it is ever applied.
pub fn validate_puzzle(puzzle: Puzzle) -> Result<ValidatedPuzzle, PuzzleDefect> {
    let count = puzzle.moves.len();
    if count < MIN_PUZZLE_MOVES {
        return Err(PuzzleDefect::TooFewMoves { count });
    }

    let start = Board::from_fen(&puzzle.fen)?;

    let mut after_setup = start.clone();
    let setup = after_setup
        .play(&puzzle.moves[0])
        .into_result()
        .map_err(PuzzleDefect::IllegalSetupMove)?;

    let mut replay = start;
    let mut solution = Vec::with_capacity(count - 1);
    for (index, text) in puzzle.moves.iter().enumerate() {
        let mv = replay.play(text).into_result().map_err(|source| match index {
            0 => PuzzleDefect::IllegalSetupMove(source),
            _ => PuzzleDefect::IllegalSolutionMove { index, source },
        })?;
        if index > 0 {
            solution.push(mv);
        }
    }

    Ok(ValidatedPuzzle {
        puzzle,
        setup,
        after_setup,
        solution,
    })
}
