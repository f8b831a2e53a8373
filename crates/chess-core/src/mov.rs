//! Moves, and coordinate (UCI) move text.

use crate::{Piece, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What is special about a move, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Normal,
    DoublePush,
    CastleKingside,
    CastleQueenside,
    EnPassant,
    Promotion(Piece),
}

impl MoveFlag {
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A fully specified move, as produced by a move generator.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    flag: MoveFlag,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move { from, to, flag }
    }

    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// The coordinate text of this move, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(self) -> UciMove {
        UciMove {
            from: self.from,
            to: self.to,
            promotion: self.flag.promotion_piece(),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_uci().fmt(f)
    }
}

/// Reasons coordinate move text fails to decode.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UciError {
    #[error("move text must be 4 or 5 characters, got {0:?}")]
    Length(String),

    #[error("invalid square in move text {0:?}")]
    Square(String),

    #[error("invalid promotion piece in move text {0:?}")]
    Promotion(String),
}

/// Decoded coordinate move text: origin, destination and optional promotion.
///
/// This says nothing about legality; a board decides that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UciMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Piece>,
}

impl FromStr for UciMove {
    type Err = UciError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(UciError::Length(s.to_string()));
        }
        let square = |file: char, rank: char| {
            Square::from_algebraic(&format!("{file}{rank}"))
                .ok_or_else(|| UciError::Square(s.to_string()))
        };
        let from = square(chars[0], chars[1])?;
        let to = square(chars[2], chars[3])?;
        let promotion = match chars.get(4) {
            None => None,
            Some(&c) => match Piece::from_letter(c.to_ascii_uppercase()) {
                Some(piece) if Piece::PROMOTIONS.contains(&piece) => Some(piece),
                _ => return Err(UciError::Promotion(s.to_string())),
            },
        };
        Ok(UciMove {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for UciMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn move_text() {
        assert_eq!(Move::normal(sq("e2"), sq("e4")).to_string(), "e2e4");
        let promo = Move::new(sq("e7"), sq("e8"), MoveFlag::Promotion(Piece::Queen));
        assert_eq!(promo.to_string(), "e7e8q");
        assert_eq!(format!("{promo:?}"), "Move(e7e8q)");
    }

    #[test]
    fn parse_plain_and_promotion() {
        let m: UciMove = "g1f3".parse().unwrap();
        assert_eq!((m.from, m.to, m.promotion), (sq("g1"), sq("f3"), None));

        let m: UciMove = "a2a1n".parse().unwrap();
        assert_eq!(m.promotion, Some(Piece::Knight));
        let m: UciMove = "a7a8Q".parse().unwrap();
        assert_eq!(m.promotion, Some(Piece::Queen));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!("e2".parse::<UciMove>(), Err(UciError::Length(_))));
        assert!(matches!("e2e4qq".parse::<UciMove>(), Err(UciError::Length(_))));
        assert!(matches!("e2e9".parse::<UciMove>(), Err(UciError::Square(_))));
        assert!(matches!("z2e4".parse::<UciMove>(), Err(UciError::Square(_))));
        assert!(matches!("e7e8k".parse::<UciMove>(), Err(UciError::Promotion(_))));
        assert!(matches!("e7e8p".parse::<UciMove>(), Err(UciError::Promotion(_))));
        assert!(matches!("e7e8x".parse::<UciMove>(), Err(UciError::Promotion(_))));
        assert!("é2e4".parse::<UciMove>().is_err());
    }

    #[test]
    fn flags() {
        assert_eq!(MoveFlag::Promotion(Piece::Rook).promotion_piece(), Some(Piece::Rook));
        assert_eq!(MoveFlag::EnPassant.promotion_piece(), None);
        assert!(MoveFlag::CastleQueenside.is_castling());
        assert!(!MoveFlag::DoublePush.is_castling());
    }

    proptest! {
        #[test]
        fn uci_text_parses_back(from in 0u8..64, to in 0u8..64, promo in 0usize..5) {
            let m = UciMove {
                from: Square::from_index(from).unwrap(),
                to: Square::from_index(to).unwrap(),
                promotion: Piece::PROMOTIONS.get(promo).copied(),
            };
            prop_assert_eq!(m.to_string().parse::<UciMove>(), Ok(m));
        }
    }
}
