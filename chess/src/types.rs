//! Core chess types
//!
//! Most of them come from `castellan_base` and are re-exported here.

pub use castellan_base::types::*;

pub use crate::piece::Piece;
