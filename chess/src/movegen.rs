use crate::bitboard::Bitboard;
use crate::board::RawBoard;
use crate::moves::{self, Move};
use crate::types::{Color, Coord, PieceKind, PromotePiece};
use crate::geometry;

use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Returns `true` if any piece of color `color` attacks the square `coord`
pub fn is_cell_attacked(b: &RawBoard, coord: Coord, color: Color) -> bool {
    b.pieces(color).any(|p| p.pos() != coord && p.attacks(coord, b))
}

/// Returns the squares of all the pieces of color `color` attacking `coord`
pub fn cell_attackers(b: &RawBoard, coord: Coord, color: Color) -> Bitboard {
    b.pieces(color)
        .filter(|p| p.pos() != coord && p.attacks(coord, b))
        .map(|p| p.pos())
        .collect()
}

/// Returns `true` if the king of color `color` is attacked
///
/// If there is no such king on the board, then it cannot be in check.
pub fn is_check(b: &RawBoard, color: Color) -> bool {
    b.king_pos(color)
        .map_or(false, |k| is_cell_attacked(b, k, color.inv()))
}

/// Legal destinations of a single piece
///
/// A piece has at most 27 reachable squares (queen in the center), so the list never overflows.
pub type DestList = ArrayVec<Coord, 32>;

/// Returns all the squares where the piece on `src` can legally go
///
/// The side to move is not taken into account, so this can be called for either color.
pub fn legal_dests(b: &RawBoard, src: Coord) -> DestList {
    let mut res = DestList::new();
    if b.get(src).is_none() {
        return res;
    }
    for dst in Coord::iter() {
        if moves::base::check_move(b, src, dst).is_ok() {
            res.push(dst);
        }
    }
    res
}

/// List of moves
#[derive(Debug, Clone, Default)]
pub struct MoveList(ArrayVec<Move, 256>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 256>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Container which can accept generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        ArrayVec::push(self, m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

const PROMOTES: [PromotePiece; 4] = [
    PromotePiece::Queen,
    PromotePiece::Rook,
    PromotePiece::Bishop,
    PromotePiece::Knight,
];

/// Pushes all the legal moves of color `color` into `dst`
///
/// A pawn move onto the last rank is pushed once per promotion choice.
pub fn legal_moves_into<P: MovePush>(b: &RawBoard, color: Color, dst: &mut P) {
    for p in b.pieces(color) {
        let src = p.pos();
        let promote = p.kind() == PieceKind::Pawn;
        for to in legal_dests(b, src) {
            if promote && to.rank() == geometry::promote_rank(color) {
                for kind in PROMOTES {
                    dst.push(Move::with_promote(src, to, kind));
                }
            } else {
                dst.push(Move::new(src, to));
            }
        }
    }
}

pub fn legal_moves(b: &RawBoard, color: Color) -> MoveList {
    let mut res = MoveList::new();
    legal_moves_into(b, color, &mut res);
    res
}

/// Returns `true` if color `color` has at least one legal move
///
/// Stops at the first legal move found, so it's cheaper than [`legal_moves()`].
pub fn has_legal_moves(b: &RawBoard, color: Color) -> bool {
    b.pieces(color).any(|p| {
        let src = p.pos();
        Coord::iter().any(|dst| moves::base::check_move(b, src, dst).is_ok())
    })
}

/// Returns `true` if color `color` is in check and cannot get out of it
pub fn is_checkmate(b: &RawBoard, color: Color) -> bool {
    is_check(b, color) && !has_legal_moves(b, color)
}

/// Returns `true` if color `color` is not in check, but has no legal moves
pub fn is_stalemate(b: &RawBoard, color: Color) -> bool {
    !is_check(b, color) && !has_legal_moves(b, color)
}
