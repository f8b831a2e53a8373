//! Chess rules for replaying and annotating stored move sequences.
//!
//! This crate provides:
//! - [`Bitboard`] - 64-bit square sets
//! - [`Position`] - piece placement and game state, built from FEN
//! - legal move generation with [`generate_moves`] and [`make_move`]
//! - SAN generation with [`move_to_san`]
//! - [`Board`] - a replay board that decodes coordinate move text, checks it
//!   against the legal moves and reports a [`MoveOutcome`]
//!
//! # Example
//!
//! ```
//! use chess_core::{Color, Fen, Piece};
//! use chess_rules::{Board, MoveOutcome};
//!
//! let mut board = Board::from_fen(Fen::STARTPOS).unwrap();
//! match board.play("g1f3") {
//!     MoveOutcome::Legal(mv) => {
//!         assert_eq!(mv.san, "Nf3");
//!         assert_eq!((mv.piece, mv.color), (Piece::Knight, Color::White));
//!     }
//!     MoveOutcome::Illegal(err) => panic!("{err}"),
//! }
//! assert!(board.play("e2e5").into_result().is_err());
//! ```

mod attacks;
mod bitboard;
mod board;
mod movegen;
mod position;
mod san;

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
pub use bitboard::Bitboard;
pub use board::{AnnotatedMove, Board, IllegalMove, IllegalReason, MoveOutcome};
pub use movegen::{generate_moves, is_in_check, is_square_attacked, make_move, perft};
pub use position::{Position, PositionError};
pub use san::move_to_san;
