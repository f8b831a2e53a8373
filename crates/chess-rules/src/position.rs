//! Chess position representation.

use chess_core::{CastlingRights, Color, Fen, FenError, Piece, Rank, Square};
use thiserror::Error;

use crate::movegen::is_square_attacked;
use crate::Bitboard;

/// Reasons a FEN record does not describe a playable position.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("{0} is in check but it is not their move")]
    OpponentInCheck(Color),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(Square),

    #[error("en passant square {0} does not follow a double pawn push")]
    InvalidEnPassant(Square),
}

/// Piece placement plus the state needed to generate legal moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Squares holding each piece kind, indexed by [`Piece::index`].
    pub pieces: [Bitboard; 6],
    /// Squares holding each side's pieces, indexed by [`Color::index`].
    pub colors: [Bitboard; 2],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Position {
    /// Parses and checks a FEN string.
    pub fn parse(fen: &str) -> Result<Self, PositionError> {
        Self::from_fen(&Fen::parse(fen)?)
    }

    /// Builds a position from a parsed FEN record.
    ///
    /// Castling rights whose king or rook is not on its home square are
    /// dropped. A position where the side that just moved is still in check,
    /// a pawn stands on the first or eighth rank, or the en passant square
    /// could not have been produced by the last move is rejected.
    pub fn from_fen(fen: &Fen) -> Result<Self, PositionError> {
        let mut position = Position {
            pieces: [Bitboard::EMPTY; 6],
            colors: [Bitboard::EMPTY; 2],
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
        };
        for (index, cell) in fen.board.iter().enumerate() {
            if let (Some((piece, color)), Some(sq)) = (cell, Square::from_index(index as u8)) {
                position.put(sq, *piece, *color);
            }
        }

        position.clean_castling_rights();
        position.check_pawns()?;
        position.check_en_passant()?;

        let waiting = position.side_to_move.opposite();
        if position.king_attacked(waiting) {
            return Err(PositionError::OpponentInCheck(waiting));
        }
        Ok(position)
    }

    fn clean_castling_rights(&mut self) {
        for color in Color::BOTH {
            let (king, kingside_rook, queenside_rook) = match color {
                Color::White => (Square::E1, Square::H1, Square::A1),
                Color::Black => (Square::E8, Square::H8, Square::A8),
            };
            if self.piece_at(king) != Some((Piece::King, color)) {
                self.castling.remove_color(color);
            }
            if self.piece_at(kingside_rook) != Some((Piece::Rook, color)) {
                self.castling.remove_kingside(color);
            }
            if self.piece_at(queenside_rook) != Some((Piece::Rook, color)) {
                self.castling.remove_queenside(color);
            }
        }
    }

    fn check_pawns(&self) -> Result<(), PositionError> {
        let back_ranks = Bitboard::RANK_1 | Bitboard::RANK_8;
        match (self.pieces[Piece::Pawn.index()] & back_ranks).first() {
            Some(sq) => Err(PositionError::PawnOnBackRank(sq)),
            None => Ok(()),
        }
    }

    fn check_en_passant(&self) -> Result<(), PositionError> {
        let Some(ep) = self.en_passant else {
            return Ok(());
        };
        let mover = self.side_to_move.opposite();
        let (expected_rank, forward) = match mover {
            Color::White => (Rank::R3, 1),
            Color::Black => (Rank::R6, -1),
        };
        let pushed_pawn = ep.offset(0, forward);
        let origin = ep.offset(0, -forward);
        let consistent = ep.rank() == expected_rank
            && self.piece_at(ep).is_none()
            && origin.is_some_and(|sq| self.piece_at(sq).is_none())
            && pushed_pawn.is_some_and(|sq| self.piece_at(sq) == Some((Piece::Pawn, mover)));
        if consistent {
            Ok(())
        } else {
            Err(PositionError::InvalidEnPassant(ep))
        }
    }

    /// Converts the position back to FEN text.
    pub fn to_fen(&self) -> String {
        let mut board = [None; 64];
        for (index, cell) in board.iter_mut().enumerate() {
            *cell = Square::from_index(index as u8).and_then(|sq| self.piece_at(sq));
        }
        Fen {
            board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        let color = Color::BOTH
            .into_iter()
            .find(|color| self.colors[color.index()].contains(sq))?;
        Piece::ALL
            .into_iter()
            .find(|piece| self.pieces[piece.index()].contains(sq))
            .map(|piece| (piece, color))
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.colors[0] | self.colors[1]
    }

    #[inline]
    pub fn pieces_of(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[piece.index()] & self.colors[color.index()]
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(Piece::King, color).first()
    }

    /// True if `color`'s king is attacked.
    pub fn king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| is_square_attacked(self, king, color.opposite()))
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.pieces[piece.index()].set(sq);
        self.colors[color.index()].set(sq);
    }

    pub(crate) fn remove(&mut self, sq: Square) {
        for bb in self.pieces.iter_mut().chain(self.colors.iter_mut()) {
            bb.clear(sq);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn startpos_roundtrip() {
        let position = Position::parse(Fen::STARTPOS).unwrap();
        assert_eq!(position.to_fen(), Fen::STARTPOS);
        assert_eq!(position.occupied().count(), 32);
    }

    #[test]
    fn custom_roundtrip() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";
        assert_eq!(Position::parse(fen).unwrap().to_fen(), fen);
    }

    #[test]
    fn piece_lookup() {
        let position = Position::parse(Fen::STARTPOS).unwrap();
        assert_eq!(position.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(position.piece_at(Square::E8), Some((Piece::King, Color::Black)));
        assert_eq!(position.piece_at(sq("e4")), None);
        assert_eq!(position.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn castling_rights_without_pieces_are_dropped() {
        let position = Position::parse("4k3/8/8/8/8/8/8/R3K3 w KQkq - 0 1").unwrap();
        assert_eq!(position.castling.to_string(), "Q");
    }

    #[test]
    fn rejects_side_not_to_move_in_check() {
        assert_eq!(
            Position::parse("4k3/8/8/8/8/8/8/4K2R b - - 0 1").map(|_| ()),
            Ok(())
        );
        assert_eq!(
            Position::parse("4k3/8/8/8/8/8/8/4R2K w - - 0 1"),
            Err(PositionError::OpponentInCheck(Color::Black))
        );
    }

    #[test]
    fn rejects_back_rank_pawns() {
        assert_eq!(
            Position::parse("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(PositionError::PawnOnBackRank(Square::A8))
        );
    }

    #[test]
    fn en_passant_must_follow_a_double_push() {
        let good = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert!(Position::parse(good).is_ok());

        let no_pawn = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(
            Position::parse(no_pawn),
            Err(PositionError::InvalidEnPassant(sq("e3")))
        );

        let wrong_side = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1";
        assert!(Position::parse(wrong_side).is_err());
    }

    #[test]
    fn fen_errors_pass_through() {
        assert!(matches!(
            Position::parse("not a fen"),
            Err(PositionError::Fen(FenError::InvalidPartCount(3)))
        ));
    }
}
