use crate::bitboard::Bitboard;

/// Squares of the first and the last rank, where no pawn may stand
pub const BACK_RANKS: Bitboard = Bitboard::from_raw(0xff000000000000ff);
