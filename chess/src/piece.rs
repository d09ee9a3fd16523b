//! Pieces and their per-piece state

use crate::board::RawBoard;
use crate::rules;
use crate::types::{Color, Coord, PieceKind};

use std::fmt;

/// Chess piece standing on the board
///
/// Apart from its kind and color, a piece remembers its own square and a few flags that the
/// movement rules depend on. The square stored in the piece always matches the cell of the
/// [`RawBoard`] holding it, as [`RawBoard::put()`] keeps them in sync.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    pos: Coord,
    captured: bool,
    moved: bool,
    castled: bool,
    en_passant: bool,
}

impl Piece {
    /// Creates a fresh piece which has not moved yet
    #[inline]
    pub const fn new(kind: PieceKind, color: Color, pos: Coord) -> Piece {
        Piece {
            kind,
            color,
            pos,
            captured: false,
            moved: false,
            castled: false,
            en_passant: false,
        }
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns the square on which the piece stands
    #[inline]
    pub const fn pos(&self) -> Coord {
        self.pos
    }

    /// Returns `true` if the piece was taken off the board by an opponent's move
    #[inline]
    pub const fn is_captured(&self) -> bool {
        self.captured
    }

    #[inline]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Returns `true` if the piece is a king or a rook that took part in castling
    #[inline]
    pub const fn has_castled(&self) -> bool {
        self.castled
    }

    /// Returns `true` if the piece is a pawn that has just made a double step
    ///
    /// Such pawn can be captured en passant on the opponent's next move only.
    #[inline]
    pub const fn is_en_passant(&self) -> bool {
        self.en_passant
    }

    /// Returns `true` while the pawn is allowed to make a double step
    #[inline]
    pub const fn is_first_move(&self) -> bool {
        !self.moved
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: Coord) {
        self.pos = pos;
    }

    #[inline]
    pub(crate) fn set_captured(&mut self) {
        self.captured = true;
    }

    #[inline]
    pub(crate) fn set_moved(&mut self, value: bool) {
        self.moved = value;
    }

    #[inline]
    pub(crate) fn set_castled(&mut self) {
        self.moved = true;
        self.castled = true;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, value: bool) {
        self.en_passant = value;
    }

    /// Returns `true` if the piece may go to `dst` according to its movement rule on the board `b`
    ///
    /// This function only checks the movement rule of the piece itself, so it doesn't consider
    /// whose turn it is, and the move may still leave the own king in check. It never mutates
    /// anything, so calling it repeatedly on the same board gives the same result.
    #[inline]
    pub fn is_valid_move(&self, dst: Coord, b: &RawBoard) -> bool {
        rules::is_valid_move(b, self, dst)
    }

    /// Returns `true` if the move to `dst` is valid and captures an opponent's piece standing there
    ///
    /// En passant is not reported here, as its destination square is empty.
    #[inline]
    pub fn can_capture(&self, dst: Coord, b: &RawBoard) -> bool {
        self.is_valid_move(dst, b) && b.get(dst).map_or(false, |p| p.color != self.color)
    }

    /// Returns `true` if the piece attacks the square `dst`, regardless of what stands there
    #[inline]
    pub fn attacks(&self, dst: Coord, b: &RawBoard) -> bool {
        rules::attacks(b, self, dst)
    }

    /// Two-character symbol: color prefix `w` or `b` followed by the piece letter
    pub fn symbol(&self) -> String {
        format!("{}{}", self.color.as_char(), self.kind.as_char())
    }

    /// Single-character representation, uppercase for White and lowercase for Black
    pub fn as_char(&self) -> char {
        match self.color {
            Color::White => self.kind.as_char(),
            Color::Black => self.kind.as_char().to_ascii_lowercase(),
        }
    }

    pub fn as_utf8_char(&self) -> char {
        let idx = self.kind as usize + 6 * self.color.index();
        ['♙', '♘', '♗', '♖', '♕', '♔', '♟', '♞', '♝', '♜', '♛', '♚'][idx]
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.color.as_char(), self.kind.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_symbol() {
        let c = Coord::from_parts(File::E, Rank::R1);
        assert_eq!(Piece::new(PieceKind::King, Color::White, c).symbol(), "wK");
        assert_eq!(Piece::new(PieceKind::Knight, Color::Black, c).symbol(), "bN");
        assert_eq!(Piece::new(PieceKind::Pawn, Color::Black, c).to_string(), "bP");
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black, c).as_char(), 'q');
        assert_eq!(Piece::new(PieceKind::Rook, Color::White, c).as_utf8_char(), '♖');
        assert_eq!(Piece::new(PieceKind::King, Color::Black, c).as_utf8_char(), '♚');
    }

    #[test]
    fn test_flags() {
        let c = Coord::from_parts(File::H, Rank::R1);
        let mut p = Piece::new(PieceKind::Rook, Color::White, c);
        assert!(!p.has_moved() && !p.has_castled() && !p.is_captured());
        assert!(p.is_first_move());
        p.set_castled();
        assert!(p.has_moved() && p.has_castled());
        p.set_captured();
        assert!(p.is_captured());
    }
}
