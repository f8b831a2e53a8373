//! Replay board: applies coordinate move text one move at a time.

use crate::movegen::{generate_moves, is_in_check, make_move};
use crate::san::move_to_san;
use crate::{Position, PositionError};
use chess_core::{Color, File, Move, MoveFlag, Piece, Square, UciError, UciMove};
use thiserror::Error;

/// A legal move together with what a reader needs to display it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedMove {
    pub mov: Move,
    /// The move as coordinate text, normalized (castling as king move).
    pub uci: UciMove,
    /// The move in SAN, computed before it was played.
    pub san: String,
    pub piece: Piece,
    pub color: Color,
    pub is_capture: bool,
}

/// Why a move could not be played.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IllegalReason {
    #[error(transparent)]
    Malformed(#[from] UciError),

    #[error("not a legal move in {fen}")]
    NotLegal { fen: String },
}

/// A move text that was rejected, with the reason.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("illegal move {text:?}: {reason}")]
pub struct IllegalMove {
    pub text: String,
    pub reason: IllegalReason,
}

/// Result of offering a move to a [`Board`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Legal(AnnotatedMove),
    Illegal(IllegalMove),
}

impl MoveOutcome {
    pub fn into_result(self) -> Result<AnnotatedMove, IllegalMove> {
        match self {
            MoveOutcome::Legal(mv) => Ok(mv),
            MoveOutcome::Illegal(err) => Err(err),
        }
    }

    pub fn is_legal(&self) -> bool {
        matches!(self, MoveOutcome::Legal(_))
    }
}

/// A position that moves are played on in sequence.
///
/// An illegal move leaves the board untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    position: Position,
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Ok(Board {
            position: Position::parse(fen)?,
        })
    }

    pub fn to_fen(&self) -> String {
        self.position.to_fen()
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.position.piece_at(sq)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        generate_moves(&self.position)
    }

    pub fn is_check(&self) -> bool {
        is_in_check(&self.position)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    /// Finds the legal move that `uci` names.
    ///
    /// The promotion piece must match exactly, so a pawn reaching the last
    /// rank needs a suffix. Castling may be written as the king's two-square
    /// step or as the king moving onto its own rook.
    pub fn find_move(&self, uci: &UciMove) -> Option<Move> {
        self.legal_moves().into_iter().find(|m| {
            if m.to_uci() == *uci {
                return true;
            }
            let rook_file = match m.flag() {
                MoveFlag::CastleKingside => File::H,
                MoveFlag::CastleQueenside => File::A,
                _ => return false,
            };
            uci.promotion.is_none()
                && uci.from == m.from()
                && uci.to == Square::new(rook_file, m.from().rank())
        })
    }

    /// Decodes `text`, checks it against the legal moves and plays it.
    pub fn play(&mut self, text: &str) -> MoveOutcome {
        let illegal = |reason| {
            MoveOutcome::Illegal(IllegalMove {
                text: text.to_string(),
                reason,
            })
        };
        let uci = match text.parse::<UciMove>() {
            Ok(uci) => uci,
            Err(err) => return illegal(IllegalReason::Malformed(err)),
        };
        let not_legal = || IllegalReason::NotLegal { fen: self.to_fen() };

        let Some(mov) = self.find_move(&uci) else {
            return illegal(not_legal());
        };
        let (Some((piece, color)), Some(san), Some(next)) = (
            self.position.piece_at(mov.from()),
            move_to_san(&self.position, mov),
            make_move(&self.position, mov),
        ) else {
            return illegal(not_legal());
        };
        let is_capture = self.position.piece_at(mov.to()).is_some() || mov.flag() == MoveFlag::EnPassant;

        self.position = next;
        MoveOutcome::Legal(AnnotatedMove {
            mov,
            uci: mov.to_uci(),
            san,
            piece,
            color,
            is_capture,
        })
    }
}
