//! Chess vocabulary shared by the puzzle workspace.
//!
//! This crate has no notion of legality; it only names things:
//! - [`Color`] and [`Piece`], including the unicode glyphs used in solutions
//! - [`Square`], [`File`] and [`Rank`] for board coordinates
//! - [`Move`] for a fully classified move, [`UciMove`] for coordinate text
//! - [`Fen`] for typed parsing and printing of board-state notation
//! - [`CastlingRights`] as carried by a FEN record

mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveFlag, UciError, UciMove};
pub use piece::Piece;
pub use square::{File, Rank, Square};
