//! Movement rules of individual pieces
//!
//! Every function here is a pure predicate over a board snapshot: it answers whether a piece
//! may go to a square, but never changes the board or the piece. The side effects of a move
//! (flags, en passant capture, rook relocation in castling) are applied only when the move is
//! committed, see [`moves`](crate::moves).

use crate::board::RawBoard;
use crate::piece::Piece;
use crate::types::{CastlingSide, Coord, PieceKind};
use crate::{between, castling, geometry};

#[inline]
fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

/// Destination is either empty or holds an opponent's piece
#[inline]
fn is_dst_free(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    b.get(dst).map_or(true, |t| t.color() != p.color())
}

#[inline]
fn is_path_clear(b: &RawBoard, path: crate::bitboard::Bitboard) -> bool {
    (path & b.occupied()).is_empty()
}

pub fn pawn(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    let src = p.pos();
    let (dr, dc) = delta(src, dst);
    let fwd = geometry::pawn_forward_delta(p.color());
    let target = b.get(dst);

    if dc == 0 {
        if dr == fwd {
            return target.is_none();
        }
        if dr == 2 * fwd {
            let mid = match src.try_shift(fwd, 0) {
                Some(mid) => mid,
                None => return false,
            };
            return p.is_first_move()
                && src.rank() == geometry::pawn_start_rank(p.color())
                && target.is_none()
                && b.get(mid).is_none();
        }
        return false;
    }

    if dc.abs() != 1 || dr != fwd {
        return false;
    }
    match target {
        Some(t) => t.color() != p.color(),
        None => is_enpassant(b, p, dst),
    }
}

/// Returns `true` if the diagonal pawn step to the empty square `dst` captures en passant
pub fn is_enpassant(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    if p.kind() != PieceKind::Pawn || b.get(dst).is_some() {
        return false;
    }
    let (dr, dc) = delta(p.pos(), dst);
    if dc.abs() != 1 || dr != geometry::pawn_forward_delta(p.color()) {
        return false;
    }
    enpassant_victim(p.pos(), dst).map_or(false, |v| {
        b.get(v).map_or(false, |t| {
            t.kind() == PieceKind::Pawn && t.color() != p.color() && t.is_en_passant()
        })
    })
}

/// Square of the pawn taken by an en passant capture from `src` to `dst`
///
/// It is the square adjacent to `src` on the same rank, in the column of `dst`.
#[inline]
pub fn enpassant_victim(src: Coord, dst: Coord) -> Option<Coord> {
    Coord::new(src.row(), dst.col())
}

pub fn knight(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    is_knight_shape(p.pos(), dst) && is_dst_free(b, p, dst)
}

pub fn bishop(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    let src = p.pos();
    between::is_bishop_valid(src, dst)
        && is_path_clear(b, between::bishop_strict(src, dst))
        && is_dst_free(b, p, dst)
}

pub fn rook(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    let src = p.pos();
    between::is_rook_valid(src, dst)
        && is_path_clear(b, between::rook_strict(src, dst))
        && is_dst_free(b, p, dst)
}

pub fn queen(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    bishop(b, p, dst) || rook(b, p, dst)
}

pub fn king(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    let (dr, dc) = delta(p.pos(), dst);
    if is_king_shape(dr, dc) {
        return is_dst_free(b, p, dst);
    }
    if dr != 0 || p.has_moved() {
        return false;
    }
    match CastlingSide::from_delta(dc) {
        Some(side) => castling::can_castle(b, p, side),
        None => false,
    }
}

#[inline]
fn is_knight_shape(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

#[inline]
fn is_king_shape(dr: isize, dc: isize) -> bool {
    dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
}

/// Checks the movement rule of the piece `p` for the move to `dst`
pub fn is_valid_move(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    match p.kind() {
        PieceKind::Pawn => pawn(b, p, dst),
        PieceKind::Knight => knight(b, p, dst),
        PieceKind::Bishop => bishop(b, p, dst),
        PieceKind::Rook => rook(b, p, dst),
        PieceKind::Queen => queen(b, p, dst),
        PieceKind::King => king(b, p, dst),
    }
}

/// Checks whether the piece `p` attacks the square `dst`
///
/// Unlike [`is_valid_move()`], the contents of `dst` are ignored. Pawns attack only their two
/// forward diagonals, and kings attack only adjacent squares, as castling never captures.
pub fn attacks(b: &RawBoard, p: &Piece, dst: Coord) -> bool {
    let src = p.pos();
    match p.kind() {
        PieceKind::Pawn => {
            let (dr, dc) = delta(src, dst);
            dr == geometry::pawn_forward_delta(p.color()) && dc.abs() == 1
        }
        PieceKind::Knight => is_knight_shape(src, dst),
        PieceKind::Bishop => {
            between::is_bishop_valid(src, dst) && is_path_clear(b, between::bishop_strict(src, dst))
        }
        PieceKind::Rook => {
            between::is_rook_valid(src, dst) && is_path_clear(b, between::rook_strict(src, dst))
        }
        PieceKind::Queen => {
            (between::is_bishop_valid(src, dst)
                && is_path_clear(b, between::bishop_strict(src, dst)))
                || (between::is_rook_valid(src, dst)
                    && is_path_clear(b, between::rook_strict(src, dst)))
        }
        PieceKind::King => {
            let (dr, dc) = delta(src, dst);
            is_king_shape(dr, dc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RawBoard;
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn valid(b: &RawBoard, src: &str, dst: &str) -> bool {
        b.get(c(src)).unwrap().is_valid_move(c(dst), b)
    }

    #[test]
    fn test_pawn() {
        let b = RawBoard::from_fen("4k3/8/8/8/3p4/2P1P3/4P3/4K3 w - -").unwrap();
        assert!(!valid(&b, "e2", "e3"));
        assert!(valid(&b, "c3", "c4"));
        assert!(!valid(&b, "c3", "c5"));
        assert!(valid(&b, "c3", "d4"));
        assert!(valid(&b, "e3", "d4"));
        assert!(!valid(&b, "e3", "f4"));
        assert!(!valid(&b, "c3", "c2"));
        assert!(!valid(&b, "d4", "d5"));
        assert!(valid(&b, "d4", "c3"));
        assert!(valid(&b, "d4", "e3"));
        assert!(valid(&b, "d4", "d3"));
    }

    #[test]
    fn test_pawn_double() {
        let b = RawBoard::from_fen("4k3/8/8/8/8/5n2/4P1P1/4K3 w - -").unwrap();
        assert!(valid(&b, "e2", "e4"));
        assert!(valid(&b, "g2", "g4"));
        assert!(!valid(&b, "e2", "e5"));

        let b = RawBoard::from_fen("4k3/8/8/8/8/6n1/4P1P1/4K3 w - -").unwrap();
        assert!(!valid(&b, "g2", "g4"));
        assert!(!valid(&b, "g2", "g3"));

        let b = RawBoard::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - -").unwrap();
        assert!(!valid(&b, "e3", "e5"));
    }

    #[test]
    fn test_enpassant() {
        let b = RawBoard::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6").unwrap();
        assert!(valid(&b, "d5", "e6"));
        assert!(!valid(&b, "d5", "c6"));

        let b = RawBoard::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - -").unwrap();
        assert!(!valid(&b, "d5", "e6"));
    }

    #[test]
    fn test_knight() {
        let b = RawBoard::from_fen("4k3/8/8/8/8/8/3P4/1N2K3 w - -").unwrap();
        assert!(valid(&b, "b1", "a3"));
        assert!(valid(&b, "b1", "c3"));
        assert!(!valid(&b, "b1", "d2"));
        assert!(!valid(&b, "b1", "b3"));
        assert!(!valid(&b, "b1", "d3"));
    }

    #[test]
    fn test_bishop() {
        let b = RawBoard::from_fen("4k3/8/8/1p6/8/3P4/8/4KB2 w - -").unwrap();
        assert!(valid(&b, "f1", "e2"));
        assert!(valid(&b, "f1", "h3"));
        assert!(!valid(&b, "f1", "f3"));
        assert!(!valid(&b, "f1", "g1"));
        assert!(!valid(&b, "f1", "f1"));

        let b = RawBoard::from_fen("4k3/8/8/1p6/8/8/8/4KB2 w - -").unwrap();
        assert!(valid(&b, "f1", "b5"));
        assert!(!valid(&b, "f1", "a6"));
    }

    #[test]
    fn test_rook() {
        let b = RawBoard::from_fen("4k3/8/8/8/r7/8/8/R3K3 w - -").unwrap();
        assert!(valid(&b, "a1", "a4"));
        assert!(!valid(&b, "a1", "a5"));
        assert!(valid(&b, "a1", "d1"));
        assert!(!valid(&b, "a1", "e1"));
        assert!(!valid(&b, "a1", "b2"));
    }

    #[test]
    fn test_queen() {
        let b = RawBoard::from_fen("4k3/8/8/8/8/8/8/3QK3 w - -").unwrap();
        assert!(valid(&b, "d1", "d8"));
        assert!(valid(&b, "d1", "h5"));
        assert!(valid(&b, "d1", "a4"));
        assert!(valid(&b, "d1", "a1"));
        assert!(!valid(&b, "d1", "e1"));
        assert!(!valid(&b, "d1", "f1"));
        assert!(!valid(&b, "d1", "e3"));
    }

    #[test]
    fn test_king() {
        let b = RawBoard::from_fen("4k3/8/8/8/8/8/3Pp3/4K3 w - -").unwrap();
        assert!(valid(&b, "e1", "e2"));
        assert!(valid(&b, "e1", "f1"));
        assert!(!valid(&b, "e1", "d2"));
        assert!(!valid(&b, "e1", "e3"));
        assert!(!valid(&b, "e1", "g1"));
    }

    #[test]
    fn test_attacks() {
        let b = RawBoard::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - -").unwrap();
        let pawn = b.get(c("e2")).unwrap();
        assert!(pawn.attacks(c("d3"), &b));
        assert!(pawn.attacks(c("f3"), &b));
        assert!(!pawn.attacks(c("e3"), &b));
        assert!(!pawn.is_valid_move(c("d3"), &b));

        let king = b.get(c("e1")).unwrap();
        assert!(king.attacks(c("e2"), &b));
        assert!(!king.attacks(c("g1"), &b));
    }

    #[test]
    fn test_pure() {
        let b = RawBoard::initial();
        let copy = b;
        for src in Coord::iter() {
            if let Some(p) = b.get(src) {
                for dst in Coord::iter() {
                    let first = p.is_valid_move(dst, &b);
                    assert_eq!(first, p.is_valid_move(dst, &b));
                }
            }
        }
        assert_eq!(b, copy);
    }
}
