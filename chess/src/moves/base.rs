use crate::board::RawBoard;
use crate::piece::Piece;
use crate::types::{CastlingSide, Coord, PieceKind, PromotePiece};
use crate::{castling, movegen, rules};

use std::fmt;

use thiserror::Error;

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    /// Non-pawn move or capture (except castling), or single pawn move
    #[default]
    Simple = 0,
    /// Kingside castling
    CastlingKingside = 1,
    /// Queenside castling
    CastlingQueenside = 2,
    /// Double pawn move
    PawnDouble = 3,
    /// Enpassant
    Enpassant = 4,
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

/// Move request: source square, destination square and optional promotion choice
///
/// The move itself is not validated; it is checked only when applied to the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
    promote: Option<PromotePiece>,
}

impl Move {
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move {
            src,
            dst,
            promote: None,
        }
    }

    #[inline]
    pub const fn with_promote(src: Coord, dst: Coord, promote: PromotePiece) -> Move {
        Move {
            src,
            dst,
            promote: Some(promote),
        }
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    /// Requested promotion piece, if any
    ///
    /// If the move turns out to be a promotion and no piece was requested, the pawn becomes a queen.
    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Error returned when a move is rejected
///
/// The board is left unchanged in this case.
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq, Hash)]
#[error("illegal move")]
pub struct IllegalMove;

/// Result of a committed move
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Applied {
    /// Kind of the move
    pub kind: MoveKind,
    /// Piece removed from the board by this move, with its `captured` flag set
    pub captured: Option<Piece>,
}

/// Why a move was rejected. Reported only to the logs.
#[derive(Debug, Copy, Clone, Error, PartialEq, Eq)]
pub(crate) enum RejectReason {
    #[error("no piece on {0}")]
    NoPiece(Coord),
    #[error("piece on {0} belongs to the side not to move")]
    WrongSide(Coord),
    #[error("source and destination are both {0}")]
    NullMove(Coord),
    #[error("{0} cannot go from {1} to {2}")]
    Rule(Piece, Coord, Coord),
    #[error("king on {0} cannot castle through attacked squares")]
    CastlingAttacked(Coord),
    #[error("move {0}{1} leaves own king in check")]
    SelfCheck(Coord, Coord),
}

fn castling_side(p: &Piece, dst: Coord) -> Option<CastlingSide> {
    if p.kind() != PieceKind::King || p.pos().row() != dst.row() {
        return None;
    }
    CastlingSide::from_delta(dst.col() as isize - p.pos().col() as isize)
}

/// Determines the kind of the move of `p` to `dst`, assuming the move is valid
pub(crate) fn classify(b: &RawBoard, p: &Piece, dst: Coord) -> MoveKind {
    match p.kind() {
        PieceKind::King => castling_side(p, dst).map_or(MoveKind::Simple, MoveKind::from),
        PieceKind::Pawn => {
            let dr = dst.row() as isize - p.pos().row() as isize;
            if dr.abs() == 2 {
                MoveKind::PawnDouble
            } else if rules::is_enpassant(b, p, dst) {
                MoveKind::Enpassant
            } else {
                MoveKind::Simple
            }
        }
        _ => MoveKind::Simple,
    }
}

fn take_captured(b: &mut RawBoard, at: Coord) -> Option<Piece> {
    b.take(at).map(|mut victim| {
        victim.set_captured();
        victim
    })
}

/// Commits the move of `p` to `dst` on `b`, with all its side effects
///
/// The move must be already validated by [`rules::is_valid_move()`]. The side to move is not
/// changed, and promotion is not performed here.
pub(crate) fn apply(b: &mut RawBoard, p: Piece, dst: Coord) -> Applied {
    let src = p.pos();
    let kind = classify(b, &p, dst);

    let captured = match kind {
        MoveKind::Enpassant => rules::enpassant_victim(src, dst).and_then(|v| take_captured(b, v)),
        _ => take_captured(b, dst),
    };

    // En passant is allowed only right after the double step.
    for cell in b.cells.iter_mut().flatten() {
        cell.set_en_passant(false);
    }

    let mut piece = p;
    b.take(src);
    piece.set_moved(true);
    if kind == MoveKind::PawnDouble {
        piece.set_en_passant(true);
    }

    if let Ok(side) = CastlingSide::try_from(kind) {
        piece.set_castled();
        let rook_src = castling::rook_src(src, side);
        if let (Some(mut rook), Some(rook_dst)) = (b.take(rook_src), castling::rook_dst(src, side)) {
            rook.set_castled();
            b.put(rook_dst, rook);
        }
    }

    b.put(dst, piece);
    Applied { kind, captured }
}

/// Validates the move from `src` to `dst` and plays it on a copy of `b`
///
/// On success, returns the new board and the move details. `b` itself is never changed, so a
/// rejected move leaves no trace. The side to move is not checked here.
pub(crate) fn check_move(
    b: &RawBoard,
    src: Coord,
    dst: Coord,
) -> Result<(RawBoard, Applied), RejectReason> {
    if src == dst {
        return Err(RejectReason::NullMove(src));
    }
    let p = *b.get(src).ok_or(RejectReason::NoPiece(src))?;
    if !p.is_valid_move(dst, b) {
        if let Some(side) = castling_side(&p, dst) {
            if castling::is_path_free(b, &p, side) {
                return Err(RejectReason::CastlingAttacked(src));
            }
        }
        return Err(RejectReason::Rule(p, src, dst));
    }

    let mut next = *b;
    let applied = apply(&mut next, p, dst);
    if movegen::is_check(&next, p.color()) {
        return Err(RejectReason::SelfCheck(src, dst));
    }
    Ok((next, applied))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::str::FromStr;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    #[test]
    fn test_display() {
        assert_eq!(Move::new(c("e2"), c("e4")).to_string(), "e2e4");
        assert_eq!(
            Move::with_promote(c("b7"), c("a8"), PromotePiece::Knight).to_string(),
            "b7a8n"
        );
    }

    #[test]
    fn test_castling() {
        let b = RawBoard::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq -").unwrap();
        let (next, applied) = check_move(&b, c("e1"), c("g1")).unwrap();
        assert_eq!(applied.kind, MoveKind::CastlingKingside);
        assert_eq!(applied.captured, None);
        let king = next.get(c("g1")).unwrap();
        let rook = next.get(c("f1")).unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert!(king.has_moved() && king.has_castled());
        assert!(rook.has_moved() && rook.has_castled());
        assert!(next.get(c("e1")).is_none());
        assert!(next.get(c("h1")).is_none());

        let (next, applied) = check_move(&b, c("e8"), c("c8")).unwrap();
        assert_eq!(applied.kind, MoveKind::CastlingQueenside);
        assert_eq!(next.get(c("c8")).unwrap().kind(), PieceKind::King);
        assert_eq!(next.get(c("d8")).unwrap().kind(), PieceKind::Rook);
        assert!(next.get(c("a8")).is_none());
    }

    #[test]
    fn test_castling_attacked() {
        let b = RawBoard::from_fen("5rk1/8/8/8/8/8/8/4K2R w K -").unwrap();
        assert_eq!(
            check_move(&b, c("e1"), c("g1")).unwrap_err(),
            RejectReason::CastlingAttacked(c("e1"))
        );
    }

    #[test]
    fn test_enpassant() {
        let b = RawBoard::from_fen("4k3/8/8/3Pp3/8/8/8/4K3 w - e6").unwrap();
        let (next, applied) = check_move(&b, c("d5"), c("e6")).unwrap();
        assert_eq!(applied.kind, MoveKind::Enpassant);
        let victim = applied.captured.unwrap();
        assert_eq!(victim.kind(), PieceKind::Pawn);
        assert_eq!(victim.color(), Color::Black);
        assert!(victim.is_captured());
        assert!(next.get(c("e5")).is_none());
        assert_eq!(next.get(c("e6")).unwrap().color(), Color::White);
    }

    #[test]
    fn test_double_flags() {
        let b = RawBoard::initial();
        let (next, applied) = check_move(&b, c("e2"), c("e4")).unwrap();
        assert_eq!(applied.kind, MoveKind::PawnDouble);
        let pawn = next.get(c("e4")).unwrap();
        assert!(pawn.is_en_passant());
        assert!(!pawn.is_first_move());

        let (next, _) = check_move(&next, c("g8"), c("f6")).unwrap();
        assert!(!next.get(c("e4")).unwrap().is_en_passant());
    }

    #[test]
    fn test_rejects() {
        let b = RawBoard::initial();
        assert_eq!(
            check_move(&b, c("e4"), c("e5")).unwrap_err(),
            RejectReason::NoPiece(c("e4"))
        );
        assert_eq!(
            check_move(&b, c("e2"), c("e2")).unwrap_err(),
            RejectReason::NullMove(c("e2"))
        );
        assert!(matches!(
            check_move(&b, c("f1"), c("b5")).unwrap_err(),
            RejectReason::Rule(_, _, _)
        ));

        let b = RawBoard::from_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - -").unwrap();
        assert_eq!(
            check_move(&b, c("e2"), c("d3")).unwrap_err(),
            RejectReason::SelfCheck(c("e2"), c("d3"))
        );
    }
}
