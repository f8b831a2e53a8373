//! Piece kinds, their letters and their glyphs.

use crate::Color;
use std::fmt;

/// The six kinds of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece kinds in index order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Array index (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case letter of this kind, as used in SAN and white FEN pieces.
    pub const fn letter(self) -> char {
        match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        }
    }

    /// Parses an upper-case piece letter (`P N B R Q K`).
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'P' => Some(Piece::Pawn),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _ => None,
        }
    }

    /// FEN character: upper case for White, lower case for Black.
    pub const fn to_fen_char(self, color: Color) -> char {
        match color {
            Color::White => self.letter(),
            Color::Black => self.letter().to_ascii_lowercase(),
        }
    }

    /// Parses a FEN piece character into kind and color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match Self::from_letter(c.to_ascii_uppercase()) {
            Some(piece) => Some((piece, color)),
            None => None,
        }
    }

    /// Unicode chess symbol for this kind in the given color.
    ///
    /// ```
    /// use chess_core::{Color, Piece};
    ///
    /// assert_eq!(Piece::Knight.glyph(Color::White), '♘');
    /// assert_eq!(Piece::Knight.glyph(Color::Black), '♞');
    /// ```
    pub const fn glyph(self, color: Color) -> char {
        match (color, self) {
            (Color::White, Piece::King) => '♔',
            (Color::White, Piece::Queen) => '♕',
            (Color::White, Piece::Rook) => '♖',
            (Color::White, Piece::Bishop) => '♗',
            (Color::White, Piece::Knight) => '♘',
            (Color::White, Piece::Pawn) => '♙',
            (Color::Black, Piece::King) => '♚',
            (Color::Black, Piece::Queen) => '♛',
            (Color::Black, Piece::Rook) => '♜',
            (Color::Black, Piece::Bishop) => '♝',
            (Color::Black, Piece::Knight) => '♞',
            (Color::Black, Piece::Pawn) => '♟',
        }
    }

    /// Inverse of [`Piece::glyph`].
    pub fn from_glyph(c: char) -> Option<(Piece, Color)> {
        Color::BOTH
            .into_iter()
            .flat_map(|color| Piece::ALL.into_iter().map(move |piece| (piece, color)))
            .find(|&(piece, color)| piece.glyph(color) == c)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_chars() {
        assert_eq!(Piece::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(Piece::Knight.to_fen_char(Color::Black), 'n');
        assert_eq!(Piece::from_fen_char('k'), Some((Piece::King, Color::Black)));
        assert_eq!(Piece::from_fen_char('Q'), Some((Piece::Queen, Color::White)));
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('1'), None);
    }

    #[test]
    fn glyphs_depend_on_color() {
        assert_eq!(Piece::Rook.glyph(Color::White), '♖');
        assert_eq!(Piece::Rook.glyph(Color::Black), '♜');
        assert_eq!(Piece::Queen.glyph(Color::White), '♕');
        assert_eq!(Piece::Pawn.glyph(Color::Black), '♟');
    }

    #[test]
    fn every_glyph_is_distinct_and_recognised() {
        for color in Color::BOTH {
            for piece in Piece::ALL {
                assert_eq!(Piece::from_glyph(piece.glyph(color)), Some((piece, color)));
            }
        }
        assert_eq!(Piece::from_glyph('N'), None);
    }

    #[test]
    fn glyphs_are_not_alphanumeric() {
        for color in Color::BOTH {
            for piece in Piece::ALL {
                assert!(!piece.glyph(color).is_alphanumeric());
            }
        }
    }
}
