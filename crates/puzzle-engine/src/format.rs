//! Turns annotated solution moves into the text shown under the diagram.
//!
//! Each move's SAN gets its piece letter replaced by a chess glyph, loses
//! capture marks and punctuation, and the moves are then numbered in pairs:
//! `1. ♘f3 ♞c6  2. e4`.

use chess_core::{Color, Piece};
use chess_rules::AnnotatedMove;

const PIECE_LETTERS: &str = "KQRBN";

/// Cleans one SAN string for display.
///
/// A leading piece letter becomes the glyph of `piece` in `color`. Then
/// every `x` and every character that is neither alphanumeric nor a piece
/// glyph is dropped, and runs of the same lowercase letter are collapsed.
pub fn clean_san(san: &str, piece: Piece, color: Color) -> String {
    let mut chars = san.chars();
    let first = match chars.next() {
        Some(c) if PIECE_LETTERS.contains(c) => Some(piece.glyph(color)),
        other => other,
    };
    let kept: String = first
        .into_iter()
        .chain(chars)
        .filter(|&c| c != 'x' && (c.is_alphanumeric() || Piece::from_glyph(c).is_some()))
        .collect();
    collapse_repeated_lowercase(&kept)
}

pub fn clean_move(mv: &AnnotatedMove) -> String {
    clean_san(&mv.san, mv.piece, mv.color)
}

/// Drops a lowercase character when it repeats the one kept just before it.
pub fn collapse_repeated_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = None;
    for c in text.chars() {
        if c.is_lowercase() && last == Some(c) {
            continue;
        }
        out.push(c);
        last = Some(c);
    }
    out
}

/// Numbers moves in pairs, `"1. a b  2. c d  3. e"`.
pub fn number_moves<S: AsRef<str>>(moves: &[S]) -> String {
    moves
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let white = pair.first().map_or("", AsRef::as_ref);
            let black = pair.get(1).map_or("", AsRef::as_ref);
            format!("{}. {} {}", i + 1, white, black).trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Formats a whole solution.
pub fn format_solution(moves: &[AnnotatedMove]) -> String {
    let cleaned: Vec<String> = moves.iter().map(clean_move).collect();
    number_moves(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_core::Fen;
    use chess_rules::Board;
    use proptest::prelude::*;

    #[test]
    fn piece_letters_become_glyphs() {
        assert_eq!(clean_san("Nf3", Piece::Knight, Color::White), "♘f3");
        assert_eq!(clean_san("Nc6", Piece::Knight, Color::Black), "♞c6");
        assert_eq!(clean_san("Qxd5+", Piece::Queen, Color::White), "♕d5");
        assert_eq!(clean_san("Rxa1", Piece::Rook, Color::White), "♖a1");
        assert_eq!(clean_san("Kg2", Piece::King, Color::Black), "♚g2");
    }

    #[test]
    fn pawn_moves_keep_their_letters() {
        assert_eq!(clean_san("e4", Piece::Pawn, Color::White), "e4");
        assert_eq!(clean_san("exd5", Piece::Pawn, Color::White), "ed5");
        assert_eq!(clean_san("e8=Q#", Piece::Pawn, Color::White), "e8Q");
        assert_eq!(clean_san("bxa1=N+", Piece::Pawn, Color::Black), "ba1N");
    }

    #[test]
    fn captures_on_the_same_file_collapse() {
        // The file letter left behind by removing `x` repeats the origin file.
        assert_eq!(clean_san("dxd5", Piece::Pawn, Color::White), "d5");
        assert_eq!(clean_san("Raxa4", Piece::Rook, Color::White), "♖a4");
    }

    #[test]
    fn castling_loses_its_dashes() {
        assert_eq!(clean_san("O-O", Piece::King, Color::White), "OO");
        assert_eq!(clean_san("O-O-O+", Piece::King, Color::Black), "OOO");
    }

    #[test]
    fn collapse_only_touches_lowercase() {
        assert_eq!(collapse_repeated_lowercase("aab11OO"), "ab11OO");
        assert_eq!(collapse_repeated_lowercase("abab"), "abab");
        assert_eq!(collapse_repeated_lowercase(""), "");
    }

    #[test]
    fn numbering() {
        assert_eq!(number_moves(&["♘f3", "♞c6"]), "1. ♘f3 ♞c6");
        assert_eq!(number_moves(&["e4"]), "1. e4");
        assert_eq!(number_moves(&["e4", "e5", "♘f3"]), "1. e4 e5  2. ♘f3");
        assert_eq!(number_moves::<&str>(&[]), "");
    }

    #[test]
    fn formats_replayed_moves() {
        let mut board = Board::from_fen(Fen::STARTPOS).unwrap();
        let moves: Vec<AnnotatedMove> = ["g1f3", "b8c6", "e2e4", "d7d5", "e4d5"]
            .iter()
            .map(|m| board.play(m).into_result().unwrap())
            .collect();
        assert_eq!(format_solution(&moves), "1. ♘f3 ♞c6  2. e4 d5  3. ed5");
        assert_eq!(format_solution(&[]), "");
    }

    fn san_strategy() -> impl Strategy<Value = String> {
        "[KQRBN]?[a-h]?[1-8]?x?[a-h][1-8](=[QRBN])?[+#]?"
    }

    fn piece_strategy() -> impl Strategy<Value = (Piece, Color)> {
        (
            prop::sample::select(Piece::ALL.to_vec()),
            prop::sample::select(Color::BOTH.to_vec()),
        )
    }

    proptest! {
        #[test]
        fn cleaning_is_idempotent(san in san_strategy(), (piece, color) in piece_strategy()) {
            let once = clean_san(&san, piece, color);
            prop_assert_eq!(clean_san(&once, piece, color), once.clone());
            prop_assert!(!once.contains('x'));
            prop_assert!(once.chars().all(|c| c.is_alphanumeric() || Piece::from_glyph(c).is_some()));
        }

        #[test]
        fn numbering_law(moves in prop::collection::vec("[a-h♘♞][1-8]", 0..12)) {
            let text = number_moves(&moves);
            prop_assert_eq!(number_moves(&moves), text.clone());
            let pairs: Vec<&str> = if text.is_empty() {
                Vec::new()
            } else {
                text.split("  ").collect()
            };
            prop_assert_eq!(pairs.len(), moves.len().div_ceil(2));
            for (i, pair) in pairs.iter().enumerate() {
                let number = format!("{}.", i + 1);
                prop_assert_eq!(pair.split(' ').next(), Some(number.as_str()));
            }
        }
    }
}
