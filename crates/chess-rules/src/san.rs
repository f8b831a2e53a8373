//! Standard Algebraic Notation (SAN) generation.
//!
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q+", "Nbd2", "R1e1#".

use crate::movegen::{generate_moves, is_in_check, make_move};
use crate::Position;
use chess_core::{Move, MoveFlag, Piece};

/// Writes `m` in SAN for the position before it is played.
///
/// `m` should be legal in `position`. Returns `None` if no piece of the side
/// to move stands on its origin square.
pub fn move_to_san(position: &Position, m: Move) -> Option<String> {
    let next = make_move(position, m)?;
    let (piece, _) = position.piece_at(m.from())?;

    let mut san = match m.flag() {
        MoveFlag::CastleKingside => "O-O".to_string(),
        MoveFlag::CastleQueenside => "O-O-O".to_string(),
        _ => {
            let mut san = String::new();
            let is_capture = position.piece_at(m.to()).is_some() || m.flag() == MoveFlag::EnPassant;
            if piece == Piece::Pawn {
                if is_capture {
                    san.push(m.from().file().to_char());
                }
            } else {
                san.push(piece.letter());
                san.push_str(&disambiguation(position, m, piece));
            }
            if is_capture {
                san.push('x');
            }
            san.push_str(&m.to().to_string());
            if let Some(promoted) = m.flag().promotion_piece() {
                san.push('=');
                san.push(promoted.letter());
            }
            san
        }
    };

    if is_in_check(&next) {
        san.push(if generate_moves(&next).is_empty() { '#' } else { '+' });
    }
    Some(san)
}

/// Origin file, rank or both, when another piece of the same kind could
/// also reach the destination.
fn disambiguation(position: &Position, m: Move, piece: Piece) -> String {
    let from = m.from();
    let rivals: Vec<Move> = generate_moves(position)
        .into_iter()
        .filter(|other| {
            other.to() == m.to()
                && other.from() != from
                && position.piece_at(other.from()).map(|(p, _)| p) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|other| other.from().file() != from.file()) {
        from.file().to_char().to_string()
    } else if rivals.iter().all(|other| other.from().rank() != from.rank()) {
        from.rank().to_char().to_string()
    } else {
        from.to_string()
    }
}
