//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use crate::{CastlingRights, Color, File, Piece, Rank, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 4 to 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// A parsed FEN record.
///
/// Parsing checks the text and that each side has exactly one king. Whether
/// the position could arise in a game is left to the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Contents of each square, indexed like [`Square::index`].
    pub board: [Option<(Piece, Color)>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    ///
    /// The move counters may be omitted, in which case they default to
    /// `0 1`.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = CastlingRights::from_fen_field(parts[2])
            .ok_or_else(|| FenError::InvalidCastlingRights(parts[2].to_string()))?;

        let en_passant = match parts[3] {
            "-" => None,
            text => match Square::from_algebraic(text) {
                Some(sq) if matches!(sq.rank(), Rank::R3 | Rank::R6) => Some(sq),
                _ => return Err(FenError::InvalidEnPassantSquare(text.to_string())),
            },
        };

        let halfmove_clock = match parts.get(4) {
            Some(text) => text
                .parse::<u32>()
                .map_err(|_| FenError::InvalidHalfmoveClock(text.to_string()))?,
            None => 0,
        };
        let fullmove_number = match parts.get(5) {
            Some(text) => text
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(text.to_string()))?,
            None => 1,
        };

        for color in Color::BOTH {
            let count = board
                .iter()
                .filter(|&&cell| cell == Some((Piece::King, color)))
                .count();
            if count != 1 {
                return Err(FenError::KingCount { color, count });
            }
        }

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    fn parse_placement(placement: &str) -> Result<[Option<(Piece, Color)>; 64], FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = [None; 64];
        for (row, text) in ranks.iter().enumerate() {
            let rank_number = 8 - row;
            let mut file = 0usize;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as usize;
                } else if let Some(cell) = Piece::from_fen_char(c) {
                    let square = (file < 8)
                        .then(|| Square::new(File::ALL[file], Rank::ALL[rank_number - 1]))
                        .ok_or_else(|| {
                            FenError::InvalidPiecePlacement(format!(
                                "rank {rank_number} has more than 8 squares"
                            ))
                        })?;
                    board[square.index() as usize] = Some(cell);
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{c}' in rank {rank_number}"
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {rank_number} has {file} squares, expected 8"
                )));
            }
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<(Piece, Color)> {
        self.board[square.index() as usize]
    }
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, *rank)) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char(color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if *rank != Rank::R1 {
                f.write_str("/")?;
            }
        }
        write!(f, " {} {} ", self.side_to_move.fen_char(), self.castling)?;
        match self.en_passant {
            Some(sq) => write!(f, "{sq}")?,
            None => f.write_str("-")?,
        }
        write!(f, " {} {}", self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_startpos() {
        let fen = Fen::parse(Fen::STARTPOS).unwrap();
        assert_eq!(fen.side_to_move, Color::White);
        assert_eq!(fen.castling, CastlingRights::ALL);
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.piece_at(Square::E1), Some((Piece::King, Color::White)));
        assert_eq!(fen.piece_at(Square::D8), Some((Piece::Queen, Color::Black)));
        assert_eq!(fen.to_string(), Fen::STARTPOS);
    }

    #[test]
    fn roundtrip_with_en_passant() {
        let text = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        assert_eq!(Fen::parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn counters_default_when_omitted() {
        let err = Fen::parse("4k3/8/8/8/8/8/8/4K3 b -").unwrap_err();
        assert_eq!(err, FenError::InvalidPartCount(3));

        let fen = Fen::parse("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn placement_errors() {
        for bad in [
            "8/8/8/8/8/8/8 w - - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPXPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/08/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ] {
            assert!(
                matches!(Fen::parse(bad), Err(FenError::InvalidPiecePlacement(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn field_errors() {
        let kings = "4k3/8/8/8/8/8/8/4K3";
        assert!(matches!(
            Fen::parse(&format!("{kings} x - - 0 1")),
            Err(FenError::InvalidActiveColor(_))
        ));
        assert!(matches!(
            Fen::parse(&format!("{kings} w XYZ - 0 1")),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Fen::parse(&format!("{kings} w - e4 0 1")),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Fen::parse(&format!("{kings} w - x3 0 1")),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        assert!(matches!(
            Fen::parse(&format!("{kings} w - - abc 1")),
            Err(FenError::InvalidHalfmoveClock(_))
        ));
        assert!(matches!(
            Fen::parse(&format!("{kings} w - - 0 0")),
            Err(FenError::InvalidFullmoveNumber(_))
        ));
        assert!(matches!(Fen::parse("invalid"), Err(FenError::InvalidPartCount(1))));
    }

    #[test]
    fn exactly_one_king_each() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            Fen::parse("4k3/8/8/8/8/8/8/3KK3 w - - 0 1"),
            Err(FenError::KingCount {
                color: Color::White,
                count: 2
            })
        );
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = FenError::InvalidCastlingRights("XYZ".to_string());
        assert!(err.to_string().contains("XYZ"));
        let err = FenError::KingCount {
            color: Color::White,
            count: 2,
        };
        assert_eq!(err.to_string(), "White must have exactly one king, found 2");
    }
}
