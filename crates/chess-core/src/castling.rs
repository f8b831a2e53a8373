//! Castling availability.

use crate::Color;
use std::fmt;

/// Which castling moves are still available, one bit per side and wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    const fn kingside_bit(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    const fn queenside_bit(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        self.0 & Self::kingside_bit(color) != 0
    }

    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        self.0 & Self::queenside_bit(color) != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn set_kingside(&mut self, color: Color) {
        self.0 |= Self::kingside_bit(color);
    }

    pub fn set_queenside(&mut self, color: Color) {
        self.0 |= Self::queenside_bit(color);
    }

    pub fn remove_kingside(&mut self, color: Color) {
        self.0 &= !Self::kingside_bit(color);
    }

    pub fn remove_queenside(&mut self, color: Color) {
        self.0 &= !Self::queenside_bit(color);
    }

    pub fn remove_color(&mut self, color: Color) {
        self.remove_kingside(color);
        self.remove_queenside(color);
    }

    /// Parses the FEN castling field (`KQkq`, any subset, or `-`).
    pub fn from_fen_field(field: &str) -> Option<Self> {
        if field == "-" {
            return Some(Self::NONE);
        }
        if field.is_empty() {
            return None;
        }
        let mut rights = Self::NONE;
        for c in field.chars() {
            match c {
                'K' => rights.set_kingside(Color::White),
                'Q' => rights.set_queenside(Color::White),
                'k' => rights.set_kingside(Color::Black),
                'q' => rights.set_queenside(Color::Black),
                _ => return None,
            }
        }
        Some(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (present, c) in [
            (self.kingside(Color::White), 'K'),
            (self.queenside(Color::White), 'Q'),
            (self.kingside(Color::Black), 'k'),
            (self.queenside(Color::Black), 'q'),
        ] {
            if present {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_rights() {
        let mut rights = CastlingRights::ALL;
        rights.remove_kingside(Color::White);
        assert!(!rights.kingside(Color::White));
        assert!(rights.queenside(Color::White));
        rights.remove_color(Color::Black);
        assert!(!rights.kingside(Color::Black));
        assert!(!rights.queenside(Color::Black));
        assert_eq!(rights.to_string(), "Q");
    }

    #[test]
    fn fen_field() {
        assert_eq!(CastlingRights::from_fen_field("KQkq"), Some(CastlingRights::ALL));
        assert_eq!(CastlingRights::from_fen_field("-"), Some(CastlingRights::NONE));
        assert_eq!(CastlingRights::from_fen_field("Kq").map(|r| r.to_string()), Some("Kq".into()));
        assert_eq!(CastlingRights::from_fen_field("X"), None);
        assert_eq!(CastlingRights::NONE.to_string(), "-");
    }
}
