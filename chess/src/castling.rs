use crate::between;
use crate::bitboard::Bitboard;
use crate::board::RawBoard;
use crate::movegen;
use crate::piece::Piece;
use crate::types::{CastlingSide, Color, Coord, PieceKind};

#[inline]
const fn dir(s: CastlingSide) -> isize {
    match s {
        CastlingSide::King => 1,
        CastlingSide::Queen => -1,
    }
}

/// Returns the corner square of the rook taking part in castling from `king`
#[inline]
pub fn rook_src(king: Coord, s: CastlingSide) -> Coord {
    let col = match s {
        CastlingSide::King => 7,
        CastlingSide::Queen => 0,
    };
    // Row is taken from a valid coordinate, and col is either 0 or 7.
    Coord::from_index(king.row() * 8 + col)
}

#[inline]
pub fn king_dst(king: Coord, s: CastlingSide) -> Option<Coord> {
    king.try_shift(0, 2 * dir(s))
}

/// Square where the rook lands: next to the king's destination, on the side of the king's start
#[inline]
pub fn rook_dst(king: Coord, s: CastlingSide) -> Option<Coord> {
    king.try_shift(0, dir(s))
}

/// Squares the king occupies or passes through while castling, including its start and end
pub fn king_path(king: Coord, s: CastlingSide) -> Bitboard {
    let mut res = Bitboard::from_coord(king);
    if let Some(pass) = king.try_shift(0, dir(s)) {
        res.set(pass);
    }
    if let Some(dst) = king_dst(king, s) {
        res.set(dst);
    }
    res
}

/// Checks everything about castling except attacked squares
///
/// The king and the rook must both be unmoved and of the same color, and all the squares between
/// them must be empty.
pub fn is_path_free(b: &RawBoard, king: &Piece, s: CastlingSide) -> bool {
    if king.kind() != PieceKind::King || king.has_moved() {
        return false;
    }
    let pos = king.pos();
    if king_dst(pos, s).is_none() {
        return false;
    }
    let src = rook_src(pos, s);
    let rook_ok = b.get(src).map_or(false, |r| {
        r.kind() == PieceKind::Rook && r.color() == king.color() && !r.has_moved()
    });
    rook_ok && (between::rook_strict(pos, src) & b.occupied()).is_empty()
}

/// Returns `true` if no square on the king's castling path is attacked by the opponent
pub fn is_path_safe(b: &RawBoard, c: Color, king: Coord, s: CastlingSide) -> bool {
    king_path(king, s)
        .into_iter()
        .all(|sq| !movegen::is_cell_attacked(b, sq, c.inv()))
}

/// Returns `true` if the king `king` may castle to side `s` on the board `b`
pub fn can_castle(b: &RawBoard, king: &Piece, s: CastlingSide) -> bool {
    is_path_free(b, king, s) && is_path_safe(b, king.color(), king.pos(), s)
}
