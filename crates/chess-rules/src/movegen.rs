//! Legal move generation.
//!
//! Pseudo-legal moves are generated per piece kind, then any move that
//! leaves the mover's king attacked is dropped.

use crate::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};
use crate::{Bitboard, Position};
use chess_core::{Color, File, Move, MoveFlag, Piece, Rank, Square};

/// Generates all legal moves for the side to move.
pub fn generate_moves(position: &Position) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);

    generate_pawn_moves(position, &mut moves);
    generate_piece_moves(position, &mut moves);
    generate_castling_moves(position, &mut moves);

    let us = position.side_to_move;
    moves.retain(|&m| make_move(position, m).is_some_and(|next| !next.king_attacked(us)));
    moves
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Square, to: Square, promotion_rank: Rank) {
    if to.rank() == promotion_rank {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::new(from, to, MoveFlag::Promotion(piece)));
        }
    } else {
        moves.push(Move::normal(from, to));
    }
}

fn generate_pawn_moves(position: &Position, moves: &mut Vec<Move>) {
    let us = position.side_to_move;
    let their_pieces = position.colors[us.opposite().index()];
    let empty = !position.occupied();
    let pawns = position.pieces_of(Piece::Pawn, us);

    let (forward, start_rank, promotion_rank) = match us {
        Color::White => (1i8, Bitboard::RANK_2, Rank::R8),
        Color::Black => (-1i8, Bitboard::RANK_7, Rank::R1),
    };
    let advance = |bb: Bitboard| match us {
        Color::White => bb.north(),
        Color::Black => bb.south(),
    };

    let single_pushes = advance(pawns) & empty;
    for to in single_pushes {
        if let Some(from) = to.offset(0, -forward) {
            push_pawn_move(moves, from, to, promotion_rank);
        }
    }

    let double_pushes = advance(advance(pawns & start_rank) & empty) & empty;
    for to in double_pushes {
        if let Some(from) = to.offset(0, -2 * forward) {
            moves.push(Move::new(from, to, MoveFlag::DoublePush));
        }
    }

    for from in pawns {
        let attacks = pawn_attacks(from, us);
        for to in attacks & their_pieces {
            push_pawn_move(moves, from, to, promotion_rank);
        }
        if let Some(ep) = position.en_passant {
            if attacks.contains(ep) {
                moves.push(Move::new(from, ep, MoveFlag::EnPassant));
            }
        }
    }
}

/// Knight, bishop, rook, queen and king moves, castling excluded.
fn generate_piece_moves(position: &Position, moves: &mut Vec<Move>) {
    let us = position.side_to_move;
    let our_pieces = position.colors[us.index()];
    let occupied = position.occupied();

    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King] {
        for from in position.pieces_of(piece, us) {
            let targets = match piece {
                Piece::Knight => knight_attacks(from),
                Piece::Bishop => bishop_attacks(from, occupied),
                Piece::Rook => rook_attacks(from, occupied),
                Piece::Queen => queen_attacks(from, occupied),
                Piece::King => king_attacks(from),
                Piece::Pawn => Bitboard::EMPTY,
            };
            for to in targets & !our_pieces {
                moves.push(Move::normal(from, to));
            }
        }
    }
}

struct Wing {
    flag: MoveFlag,
    rook_file: File,
    /// Files that must be empty between king and rook.
    path: &'static [File],
    /// File the king crosses, which must not be attacked.
    pass_file: File,
    target_file: File,
}

const WINGS: [Wing; 2] = [
    Wing {
        flag: MoveFlag::CastleKingside,
        rook_file: File::H,
        path: &[File::F, File::G],
        pass_file: File::F,
        target_file: File::G,
    },
    Wing {
        flag: MoveFlag::CastleQueenside,
        rook_file: File::A,
        path: &[File::B, File::C, File::D],
        pass_file: File::D,
        target_file: File::C,
    },
];

/// Castling: the king and rook are home, the squares between them are empty,
/// and the king is neither in check nor passing through an attacked square.
/// Landing on an attacked square is caught by the legality filter.
fn generate_castling_moves(position: &Position, moves: &mut Vec<Move>) {
    let us = position.side_to_move;
    let them = us.opposite();
    let occupied = position.occupied();

    let back_rank = match us {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    };
    let king_home = Square::new(File::E, back_rank);
    if position.piece_at(king_home) != Some((Piece::King, us))
        || is_square_attacked(position, king_home, them)
    {
        return;
    }

    for wing in &WINGS {
        let allowed = match wing.flag {
            MoveFlag::CastleKingside => position.castling.kingside(us),
            _ => position.castling.queenside(us),
        };
        let rook_home = Square::new(wing.rook_file, back_rank);
        if allowed
            && position.piece_at(rook_home) == Some((Piece::Rook, us))
            && wing
                .path
                .iter()
                .all(|&file| !occupied.contains(Square::new(file, back_rank)))
            && !is_square_attacked(position, Square::new(wing.pass_file, back_rank), them)
        {
            moves.push(Move::new(
                king_home,
                Square::new(wing.target_file, back_rank),
                wing.flag,
            ));
        }
    }
}

/// Returns true if `sq` is attacked by any piece of `by`.
pub fn is_square_attacked(position: &Position, sq: Square, by: Color) -> bool {
    let occupied = position.occupied();
    let queens = position.pieces_of(Piece::Queen, by);

    (pawn_attacks(sq, by.opposite()) & position.pieces_of(Piece::Pawn, by)).any()
        || (knight_attacks(sq) & position.pieces_of(Piece::Knight, by)).any()
        || (king_attacks(sq) & position.pieces_of(Piece::King, by)).any()
        || (bishop_attacks(sq, occupied) & (position.pieces_of(Piece::Bishop, by) | queens)).any()
        || (rook_attacks(sq, occupied) & (position.pieces_of(Piece::Rook, by) | queens)).any()
}

/// Returns true if the side to move is in check.
pub fn is_in_check(position: &Position) -> bool {
    position.king_attacked(position.side_to_move)
}

/// Plays `m` and returns the resulting position.
///
/// The move is trusted to be pseudo-legal; `None` is returned only when no
/// piece of the side to move stands on the origin square.
pub fn make_move(position: &Position, m: Move) -> Option<Position> {
    let us = position.side_to_move;
    let (from, to) = (m.from(), m.to());
    let (piece, color) = position.piece_at(from)?;
    if color != us {
        return None;
    }

    let mut next = position.clone();
    let mut is_capture = position.piece_at(to).is_some();

    next.remove(from);
    next.remove(to);

    if m.flag() == MoveFlag::EnPassant {
        let forward = if us == Color::White { 1 } else { -1 };
        if let Some(captured) = to.offset(0, -forward) {
            next.remove(captured);
        }
        is_capture = true;
    }

    next.put(to, m.flag().promotion_piece().unwrap_or(piece), us);

    let rook_hop = match (m.flag(), us) {
        (MoveFlag::CastleKingside, Color::White) => Some((Square::H1, Square::F1)),
        (MoveFlag::CastleKingside, Color::Black) => Some((Square::H8, Square::F8)),
        (MoveFlag::CastleQueenside, Color::White) => Some((Square::A1, Square::D1)),
        (MoveFlag::CastleQueenside, Color::Black) => Some((Square::A8, Square::D8)),
        _ => None,
    };
    if let Some((rook_from, rook_to)) = rook_hop {
        next.remove(rook_from);
        next.put(rook_to, Piece::Rook, us);
    }

    if piece == Piece::King {
        next.castling.remove_color(us);
    }
    // A rook leaving or being captured on its home square ends that right.
    for sq in [from, to] {
        match sq {
            Square::H1 => next.castling.remove_kingside(Color::White),
            Square::A1 => next.castling.remove_queenside(Color::White),
            Square::H8 => next.castling.remove_kingside(Color::Black),
            Square::A8 => next.castling.remove_queenside(Color::Black),
            _ => {}
        }
    }

    next.en_passant = if m.flag() == MoveFlag::DoublePush {
        let forward = if us == Color::White { 1 } else { -1 };
        from.offset(0, forward)
    } else {
        None
    };

    if piece == Piece::Pawn || is_capture {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock += 1;
    }
    if us == Color::Black {
        next.fullmove_number += 1;
    }
    next.side_to_move = us.opposite();

    Some(next)
}

/// Counts leaf nodes of the legal move tree to `depth`.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = generate_moves(position);
    match depth {
        1 => moves.len() as u64,
        _ => moves
            .into_iter()
            .filter_map(|m| make_move(position, m))
            .map(|next| perft(&next, depth - 1))
            .sum(),
    }
}
