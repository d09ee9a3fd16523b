pub(crate) mod base;
mod text;

pub use base::{Applied, IllegalMove, Move, MoveKind};
pub use text::ParseError;
