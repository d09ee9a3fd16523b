//! # Castellan
//!
//! Rules engine for a two-player game of chess.
//!
//! The crate validates moves given as a pair of squares against the full chess rules: per-piece
//! movement, blocking, captures, castling, en passant, promotion and the ban on leaving the own
//! king in check. It also answers check, checkmate and stalemate queries, and drives a game
//! session with turns, draw offers and resignation.
//!
//! # Example
//!
//! ```
//! use castellan::{Coord, Color, Game, Outcome, WinReason};
//! use std::str::FromStr;
//!
//! let mut game = Game::new_initial();
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     game.play_str(mv).unwrap();
//! }
//! assert_eq!(
//!     game.outcome(),
//!     Some(Outcome::Win { side: Color::Black, reason: WinReason::Checkmate }),
//! );
//! assert!(game.board().get(Coord::from_str("h4").unwrap()).is_some());
//! ```

pub mod between;
pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;
pub mod rules;
pub mod types;

pub use castellan_base::{bitboard, bitboard_consts, geometry};

pub use bitboard::Bitboard;
pub use board::{Board, RawBoard};
pub use game::{Game, PlayError};
pub use moves::{Applied, IllegalMove, Move, MoveKind};
pub use types::{
    CastlingSide, Color, Coord, DrawReason, File, Outcome, Piece, PieceKind, PromotePiece, Rank,
    WinReason,
};
