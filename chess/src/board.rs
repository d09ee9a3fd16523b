//! Board and related things

use crate::bitboard::Bitboard;
use crate::movegen::{self, DestList, MoveList};
use crate::moves::base::{self as moves_base, RejectReason};
use crate::moves::{Applied, IllegalMove, Move};
use crate::piece::Piece;
use crate::types::{
    self, CastlingSide, Color, Coord, File, PieceKind, PromotePiece, Rank,
};
use crate::{bitboard_consts, castling, geometry};

use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

use log::{debug, trace};
use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Too many pieces of given color
    ///
    /// No more than 16 pieces of each color is allowed.
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
    /// There is a pawn on the 1st or on the 8th rank
    #[error("invalid pawn position {0}")]
    InvalidPawn(Coord),
    /// Piece stored in the cell thinks that it stands on another square
    #[error("piece in cell {0} is placed on {1}")]
    MisplacedPiece(Coord, Coord),
    /// Piece marked as captured is still on the board
    #[error("captured piece on {0}")]
    CapturedPiece(Coord),
}

/// Error parsing the first part of FEN (i.e. the positions of pieces on the board)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`RawBoard`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawFenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorParseError),
    /// FEN doesn't have castling rights part
    #[error("no castling rights")]
    NoCastling,
    /// Unexpected character in castling rights
    #[error("bad castling rights char {0:?}")]
    Castling(char),
    /// FEN doesn't have enpassant part
    #[error("no enpassant")]
    NoEnpassant,
    /// Error parsing enpassant from FEN
    #[error("bad enpassant: {0}")]
    Enpassant(#[from] types::CoordParseError),
    /// Enpassant rank is invalid
    #[error("invalid enpassant rank {0}")]
    InvalidEnpassantRank(Rank),
    /// Error parsing move counter
    #[error("bad move counter: {0}")]
    MoveCounter(ParseIntError),
    /// Error parsing move number
    #[error("bad move number: {0}")]
    MoveNumber(ParseIntError),
    /// FEN contains extra data
    #[error("extra data in FEN")]
    ExtraData,
}

/// Error parsing [`Board`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// Board cannot be parsed
    #[error("cannot parse fen: {0}")]
    Fen(#[from] RawFenParseError),
    /// Board was parsed, but it's invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// Raw chess board
///
/// Raw board holds the grid of pieces, the side to move and the draw offers. Unlike [`Board`], it
/// is not validated. It can be used to build a position programmatically and then converted to
/// [`Board`] via [`Board::try_from()`].
///
/// The movement rules and attack queries work directly on a raw board, as they never change it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RawBoard {
    /// Contents of the board
    ///
    /// The indices in this array are the indices of coordinates. Prefer [`RawBoard::get()`] and
    /// [`RawBoard::put()`], as the latter also updates the position stored in the piece.
    pub cells: [Option<Piece>; 64],
    /// Side to move
    pub side: Color,
    /// Pending draw offers, indexed by the color of the offering side
    pub draw_offers: [bool; 2],
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl RawBoard {
    /// Returns an empty `RawBoard`
    ///
    /// Does the same as [`RawBoard::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> RawBoard {
        RawBoard {
            cells: [None; 64],
            side: Color::White,
            draw_offers: [false; 2],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> RawBoard {
        let mut res = RawBoard::empty();
        for color in [Color::White, Color::Black] {
            let back = geometry::castling_rank(color);
            let front = geometry::pawn_start_rank(color);
            for (file, kind) in File::iter().zip(BACK_RANK) {
                let c = Coord::from_parts(file, back);
                res.put(c, Piece::new(kind, color, c));
                let c = Coord::from_parts(file, front);
                res.put(c, Piece::new(PieceKind::Pawn, color, c));
            }
        }
        res
    }

    /// Parses a board from FEN
    ///
    /// See [`Board::from_fen()`] on how the FEN fields map to the piece flags.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<RawBoard, RawFenParseError> {
        RawBoard::from_str(fen)
    }

    /// Returns the piece on the square `c`, if any
    #[inline]
    pub fn get(&self, c: Coord) -> Option<&Piece> {
        self.cells[c.index()].as_ref()
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<&Piece> {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `piece` onto the square `c`, replacing whatever stood there
    ///
    /// The position stored in the piece is updated to `c`.
    #[inline]
    pub fn put(&mut self, c: Coord, mut piece: Piece) {
        piece.set_pos(c);
        self.cells[c.index()] = Some(piece);
    }

    /// Removes the piece from the square `c` and returns it
    #[inline]
    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        self.cells[c.index()].take()
    }

    /// Iterates over all the pieces of color `c`
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten().filter(move |p| p.color() == c)
    }

    /// Returns the set of occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.cells.iter().flatten().map(|p| p.pos()).collect()
    }

    /// Returns the set of squares occupied by the pieces of color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        self.pieces(c).map(|p| p.pos()).collect()
    }

    /// Returns the position of the king of color `c`, if it's present on the board
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        self.pieces(c)
            .find(|p| p.kind() == PieceKind::King)
            .map(|p| p.pos())
    }

    fn has_castling(&self, c: Color, s: CastlingSide) -> bool {
        let king = Coord::from_parts(File::E, geometry::castling_rank(c));
        let unmoved = |sq: Coord, kind: PieceKind| {
            self.get(sq).map_or(false, |p| {
                p.kind() == kind && p.color() == c && !p.has_moved()
            })
        };
        unmoved(king, PieceKind::King) && unmoved(castling::rook_src(king, s), PieceKind::Rook)
    }

    /// Returns the destination square of a possible en passant capture, if any
    ///
    /// It is the square just passed by the pawn of the opponent which has made a double step.
    pub fn ep_dest(&self) -> Option<Coord> {
        let c = self.side.inv();
        self.pieces(c)
            .find(|p| p.kind() == PieceKind::Pawn && p.is_en_passant())
            .and_then(|p| p.pos().try_shift(-geometry::pawn_forward_delta(c), 0))
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use castellan::{RawBoard, board::PrettyStyle};
    /// #
    /// let r = RawBoard::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(r.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { raw: self, style }
    }

    /// Converts the board into a FEN string
    ///
    /// Only the first four fields are written, as the move counters are not tracked.
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl Default for RawBoard {
    #[inline]
    fn default() -> RawBoard {
        RawBoard::empty()
    }
}

/// Board that contains a valid position
///
/// The board owns all the pieces and keeps them consistent: every piece knows its square, there's
/// at most one king of each color, and no pawn stands on the first or the last rank.
///
/// Moves are applied with [`Board::attempt_move()`]. A rejected move leaves the board unchanged.
/// Turn switching and promotion are separate operations, [`Board::make_move()`] combines all
/// three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    r: RawBoard,
}

impl Board {
    /// Returns a board with the initial position
    pub fn initial() -> Board {
        Board {
            r: RawBoard::initial(),
        }
    }

    /// Parses a board from FEN
    ///
    /// The castling rights tell which kings and corner rooks haven't moved yet. All the other kings
    /// and rooks are considered moved, and pawns are considered moved unless they stand on their
    /// start rank. The en passant square marks the pawn which has just made a double step. Move
    /// counters may be present, but they are ignored.
    pub fn from_fen(fen: &str) -> Result<Board, FenParseError> {
        Board::from_str(fen)
    }

    /// Returns a view over the raw board
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.r
    }

    /// Returns the piece on the square `c`, if any
    #[inline]
    pub fn get(&self, c: Coord) -> Option<&Piece> {
        self.r.get(c)
    }

    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<&Piece> {
        self.r.get2(file, rank)
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.r.side
    }

    #[inline]
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        self.r.king_pos(c)
    }

    /// Checks only the movement rule of the piece on `src`, see [`Piece::is_valid_move()`]
    pub fn is_valid_move(&self, src: Coord, dst: Coord) -> bool {
        self.get(src).map_or(false, |p| p.is_valid_move(dst, &self.r))
    }

    /// Checks whether the piece on `src` can capture the opponent's piece on `dst`
    pub fn can_capture(&self, src: Coord, dst: Coord) -> bool {
        self.get(src).map_or(false, |p| p.can_capture(dst, &self.r))
    }

    /// Returns `true` if the king of color `c` is allowed to castle to side `s`
    pub fn can_castle(&self, c: Color, s: CastlingSide) -> bool {
        self.king_pos(c)
            .and_then(|k| self.get(k))
            .map_or(false, |k| castling::can_castle(&self.r, k, s))
    }

    /// Returns `true` if any piece of color `by` attacks the square `c`
    #[inline]
    pub fn is_attacked(&self, c: Coord, by: Color) -> bool {
        movegen::is_cell_attacked(&self.r, c, by)
    }

    /// Returns all the pieces that give check to the king of color `c`
    pub fn checkers(&self, c: Color) -> Bitboard {
        self.king_pos(c)
            .map_or(Bitboard::EMPTY, |k| movegen::cell_attackers(&self.r, k, c.inv()))
    }

    fn check_move(&self, src: Coord, dst: Coord) -> Result<(RawBoard, Applied), RejectReason> {
        match self.get(src) {
            Some(p) if p.color() != self.r.side => Err(RejectReason::WrongSide(src)),
            _ => moves_base::check_move(&self.r, src, dst),
        }
    }

    /// Tries to move the piece from `src` to `dst`
    ///
    /// The piece must belong to the side to move, obey its movement rule and not leave its own
    /// king in check. Castling moves the rook as well, and en passant removes the captured pawn.
    ///
    /// On success, returns the kind of the move and the captured piece. The side to move is not
    /// changed, call [`Board::next_turn()`] for that. On failure, the board stays unchanged.
    ///
    /// A pawn that reaches the last rank stays a pawn until [`Board::promote()`] is called.
    pub fn attempt_move(&mut self, src: Coord, dst: Coord) -> Result<Applied, IllegalMove> {
        match self.check_move(src, dst) {
            Ok((next, applied)) => {
                self.r = next;
                trace!("committed move {}{}: {:?}", src, dst, applied.kind);
                Ok(applied)
            }
            Err(reason) => {
                debug!("rejected move {}{}: {}", src, dst, reason);
                Err(IllegalMove)
            }
        }
    }

    /// Promotes the pawn on `c` if it has reached the last rank
    ///
    /// The pawn is replaced by a new piece of kind `choice`, or by a queen if `choice` is `None`.
    /// Returns `false` and does nothing if there's no such pawn on `c`.
    pub fn promote(&mut self, c: Coord, choice: Option<PromotePiece>) -> bool {
        let pawn = match self.get(c) {
            Some(p) if p.kind() == PieceKind::Pawn && c.rank() == geometry::promote_rank(p.color()) => {
                *p
            }
            _ => return false,
        };
        let kind = PieceKind::from(choice.unwrap_or_default());
        let mut piece = Piece::new(kind, pawn.color(), c);
        piece.set_moved(true);
        self.r.put(c, piece);
        trace!("promoted pawn on {} to {:?}", c, kind);
        self.selftest();
        true
    }

    /// Plays the move `mv` for the side to move
    ///
    /// This does [`Board::attempt_move()`], then [`Board::promote()`] on the destination and
    /// then [`Board::next_turn()`].
    pub fn make_move(&mut self, mv: Move) -> Result<Applied, IllegalMove> {
        let applied = self.attempt_move(mv.src(), mv.dst())?;
        if !self.promote(mv.dst(), mv.promote()) {
            self.selftest();
        }
        self.next_turn();
        Ok(applied)
    }

    /// Passes the move to the opponent
    #[inline]
    pub fn next_turn(&mut self) {
        self.r.side = self.r.side.inv();
    }

    /// Returns `true` if the king of color `c` is in check
    #[inline]
    pub fn is_check(&self, c: Color) -> bool {
        movegen::is_check(&self.r, c)
    }

    /// Returns `true` if color `c` is checkmated
    ///
    /// This function can be computationally expensive, as it tries every move of every piece.
    #[inline]
    pub fn is_checkmate(&self, c: Color) -> bool {
        movegen::is_checkmate(&self.r, c)
    }

    #[inline]
    pub fn is_stalemate(&self, c: Color) -> bool {
        movegen::is_stalemate(&self.r, c)
    }

    /// Returns all the squares where the piece on `src` can legally go
    #[inline]
    pub fn legal_dests(&self, src: Coord) -> DestList {
        movegen::legal_dests(&self.r, src)
    }

    #[inline]
    pub fn legal_moves(&self, c: Color) -> MoveList {
        movegen::legal_moves(&self.r, c)
    }

    #[inline]
    pub fn has_legal_moves(&self, c: Color) -> bool {
        movegen::has_legal_moves(&self.r, c)
    }

    /// Records that color `c` offers a draw
    #[inline]
    pub fn offer_draw(&mut self, c: Color) {
        self.r.draw_offers[c.index()] = true;
    }

    /// Cancels the draw offer made by color `c`
    #[inline]
    pub fn withdraw_draw(&mut self, c: Color) {
        self.r.draw_offers[c.index()] = false;
    }

    /// Returns `true` if the opponent of `c` has offered a draw
    ///
    /// So, the side which wants to accept a draw passes its own color here.
    #[inline]
    pub fn is_draw_offered(&self, c: Color) -> bool {
        self.r.draw_offers[c.inv().index()]
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// See docs for [`RawBoard::pretty()`] for more usage details.
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        self.r.pretty(style)
    }

    /// Converts the board into a FEN string
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }

    #[cfg(feature = "selftest")]
    fn selftest(&self) {
        if let Err(e) = validate(&self.r) {
            panic!("board self-test failed: {}\nFEN: {}", e, self.r);
        }
    }

    #[cfg(not(feature = "selftest"))]
    #[inline]
    fn selftest(&self) {}
}

fn validate(raw: &RawBoard) -> Result<(), ValidateError> {
    for (idx, cell) in raw.cells.iter().enumerate() {
        if let Some(p) = cell {
            let coord = Coord::from_index(idx);
            if p.pos() != coord {
                return Err(ValidateError::MisplacedPiece(coord, p.pos()));
            }
            if p.is_captured() {
                return Err(ValidateError::CapturedPiece(coord));
            }
        }
    }

    for color in [Color::White, Color::Black] {
        if raw.pieces(color).count() > 16 {
            return Err(ValidateError::TooManyPieces(color));
        }
        if raw.pieces(color).filter(|p| p.kind() == PieceKind::King).count() > 1 {
            return Err(ValidateError::TooManyKings(color));
        }
    }

    let pawns: Bitboard = raw
        .cells
        .iter()
        .flatten()
        .filter(|p| p.kind() == PieceKind::Pawn)
        .map(|p| p.pos())
        .collect();
    if let Some(bad) = (pawns & bitboard_consts::BACK_RANKS).first() {
        return Err(ValidateError::InvalidPawn(bad));
    }

    Ok(())
}

impl TryFrom<RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: RawBoard) -> Result<Board, ValidateError> {
        validate(&raw)?;
        Ok(Board { r: raw })
    }
}

impl TryFrom<&RawBoard> for Board {
    type Error = ValidateError;

    fn try_from(raw: &RawBoard) -> Result<Board, ValidateError> {
        (*raw).try_into()
    }
}

fn piece_from_char(ch: char, c: Coord) -> Option<Piece> {
    let kind = PieceKind::from_char(ch)?;
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let mut p = Piece::new(kind, color, c);
    match kind {
        PieceKind::Pawn => p.set_moved(c.rank() != geometry::pawn_start_rank(color)),
        PieceKind::King | PieceKind::Rook => p.set_moved(true),
        _ => {}
    }
    Some(p)
}

fn parse_cells(s: &str) -> Result<[Option<Piece>; 64], CellsParseError> {
    type Error = CellsParseError;

    // FEN goes from rank 8 down to rank 1
    let mut file = 0_usize;
    let mut row = 7_usize;
    let mut cells = [None; 64];
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(row)));
                }
                file += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(row)));
                }
                if row == 0 {
                    return Err(Error::Overflow);
                }
                row -= 1;
                file = 0;
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(row)));
                }
                let coord = Coord::from_parts(File::from_index(file), Rank::from_index(row));
                let piece =
                    piece_from_char(b as char, coord).ok_or(Error::UnexpectedChar(b as char))?;
                cells[coord.index()] = Some(piece);
                file += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(row)));
    }
    if row > 0 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

fn apply_castling(raw: &mut RawBoard, s: &str) -> Result<(), RawFenParseError> {
    if s == "-" {
        return Ok(());
    }
    for ch in s.chars() {
        let (color, side) = match ch {
            'K' => (Color::White, CastlingSide::King),
            'Q' => (Color::White, CastlingSide::Queen),
            'k' => (Color::Black, CastlingSide::King),
            'q' => (Color::Black, CastlingSide::Queen),
            _ => return Err(RawFenParseError::Castling(ch)),
        };
        let king = Coord::from_parts(File::E, geometry::castling_rank(color));
        let rook = castling::rook_src(king, side);
        let is_home = |sq: Coord, kind: PieceKind| {
            raw.get(sq)
                .map_or(false, |p| p.kind() == kind && p.color() == color)
        };
        // Rights without the king and the rook on their home squares are ignored
        if is_home(king, PieceKind::King) && is_home(rook, PieceKind::Rook) {
            for sq in [king, rook] {
                if let Some(p) = raw.cells[sq.index()].as_mut() {
                    p.set_moved(false);
                }
            }
        }
    }
    Ok(())
}

fn apply_enpassant(raw: &mut RawBoard, s: &str) -> Result<(), RawFenParseError> {
    if s == "-" {
        return Ok(());
    }
    let dest = Coord::from_str(s)?;
    let c = raw.side.inv();
    let src = dest
        .try_shift(geometry::pawn_forward_delta(c), 0)
        .filter(|p| p.rank() == geometry::pawn_double_rank(c))
        .ok_or(RawFenParseError::InvalidEnpassantRank(dest.rank()))?;
    if let Some(p) = raw.cells[src.index()].as_mut() {
        if p.kind() == PieceKind::Pawn && p.color() == c {
            p.set_en_passant(true);
        }
    }
    Ok(())
}

impl FromStr for RawBoard {
    type Err = RawFenParseError;

    fn from_str(s: &str) -> Result<RawBoard, Self::Err> {
        type Error = RawFenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split(' ').fuse();

        let cells = parse_cells(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;
        let mut raw = RawBoard {
            cells,
            side,
            draw_offers: [false; 2],
        };
        apply_castling(&mut raw, iter.next().ok_or(Error::NoCastling)?)?;
        apply_enpassant(&mut raw, iter.next().ok_or(Error::NoEnpassant)?)?;
        if let Some(s) = iter.next() {
            u16::from_str(s).map_err(Error::MoveCounter)?;
        }
        if let Some(s) = iter.next() {
            u16::from_str(s).map_err(Error::MoveNumber)?;
        }

        if iter.next().is_some() {
            return Err(Error::ExtraData);
        }

        Ok(raw)
    }
}

impl FromStr for Board {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(RawBoard::from_str(s)?.try_into()?)
    }
}

fn format_cells(cells: &[Option<Piece>; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter().rev() {
        if rank != Rank::R8 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let cell = &cells[Coord::from_parts(file, rank).index()];
            match cell {
                None => {
                    empty += 1;
                    continue;
                }
                Some(p) => {
                    if empty != 0 {
                        write!(f, "{}", (b'0' + empty) as char)?;
                        empty = 0;
                    }
                    write!(f, "{}", p.as_char())?;
                }
            }
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

impl Display for RawBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)?;
        write!(f, " {} ", self.side)?;
        let mut any = false;
        for (color, side, ch) in [
            (Color::White, CastlingSide::King, 'K'),
            (Color::White, CastlingSide::Queen, 'Q'),
            (Color::Black, CastlingSide::King, 'k'),
            (Color::Black, CastlingSide::Queen, 'q'),
        ] {
            if self.has_castling(color, side) {
                write!(f, "{}", ch)?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        match self.ep_dest() {
            Some(p) => write!(f, " {}", p)?,
            None => write!(f, " -")?,
        };
        Ok(())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.r.fmt(f)
    }
}

/// Style for [`RawBoard::pretty()`] and [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
    /// Print pieces as two-character symbols like `wK`, with `##` on the squares of odd parity
    Symbols,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`RawBoard::pretty()`] for more details.
pub struct Pretty<'a> {
    raw: &'a RawBoard,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Option<&Piece>) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(r: &RawBoard, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(r.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(r.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Option<&Piece>) -> char {
        c.map_or('.', |p| p.as_char())
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Option<&Piece>) -> char {
        c.map_or('.', |p| p.as_utf8_char())
    }
}

fn fmt_symbols(r: &RawBoard, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter().rev() {
        for file in File::iter() {
            let c = Coord::from_parts(file, rank);
            match r.get(c) {
                Some(p) => write!(f, "{} ", p.symbol())?,
                None if c.is_dark() => write!(f, "   ")?,
                None => write!(f, "## ")?,
            }
        }
        writeln!(f, "{}", rank)?;
    }
    writeln!(f, " a  b  c  d  e  f  g  h")
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.raw, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.raw, f),
            PrettyStyle::Symbols => fmt_symbols(self.raw, f),
        }
    }
}
