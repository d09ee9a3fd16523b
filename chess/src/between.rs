use crate::bitboard::Bitboard;
use crate::types::Coord;

#[inline]
fn delta(src: Coord, dst: Coord) -> (isize, isize) {
    (
        dst.row() as isize - src.row() as isize,
        dst.col() as isize - src.col() as isize,
    )
}

fn walk(src: Coord, dst: Coord) -> Bitboard {
    let (dr, dc) = delta(src, dst);
    let (step_r, step_c) = (dr.signum(), dc.signum());
    let mut res = Bitboard::EMPTY;
    let mut cur = src;
    while let Some(next) = cur.try_shift(step_r, step_c) {
        if next == dst {
            break;
        }
        res.set(next);
        cur = next;
    }
    res
}

/// Returns `true` if `src` and `dst` are distinct squares on the same diagonal
#[inline]
pub fn is_bishop_valid(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    dr != 0 && dc != 0 && dr.abs() == dc.abs()
}

/// Returns `true` if `src` and `dst` are distinct squares on the same rank or file
#[inline]
pub fn is_rook_valid(src: Coord, dst: Coord) -> bool {
    let (dr, dc) = delta(src, dst);
    (dr == 0) != (dc == 0)
}

/// Squares strictly between `src` and `dst` along a diagonal
///
/// Returns an empty set if the squares don't share a diagonal.
pub fn bishop_strict(src: Coord, dst: Coord) -> Bitboard {
    if !is_bishop_valid(src, dst) {
        return Bitboard::EMPTY;
    }
    walk(src, dst)
}

/// Squares strictly between `src` and `dst` along a rank or a file
///
/// Returns an empty set if the squares don't share a rank or a file.
pub fn rook_strict(src: Coord, dst: Coord) -> Bitboard {
    if !is_rook_valid(src, dst) {
        return Bitboard::EMPTY;
    }
    walk(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, File, Rank};

    #[test]
    fn test_bishop() {
        let b4 = Coord::from_parts(File::B, Rank::R4);
        let e7 = Coord::from_parts(File::E, Rank::R7);
        let res = Bitboard::EMPTY
            .with(Coord::from_parts(File::C, Rank::R5))
            .with(Coord::from_parts(File::D, Rank::R6));
        assert_eq!(bishop_strict(b4, e7), res);
        assert_eq!(bishop_strict(e7, b4), res);

        let f3 = Coord::from_parts(File::F, Rank::R3);
        let c6 = Coord::from_parts(File::C, Rank::R6);
        let res = Bitboard::EMPTY
            .with(Coord::from_parts(File::E, Rank::R4))
            .with(Coord::from_parts(File::D, Rank::R5));
        assert_eq!(bishop_strict(f3, c6), res);
        assert_eq!(bishop_strict(c6, f3), res);

        assert!(!is_bishop_valid(b4, b4));
        assert!(!is_bishop_valid(b4, Coord::from_parts(File::B, Rank::R7)));
        assert_eq!(bishop_strict(b4, Coord::from_parts(File::C, Rank::R7)), Bitboard::EMPTY);
        assert_eq!(bishop_strict(b4, Coord::from_parts(File::C, Rank::R5)), Bitboard::EMPTY);
    }

    #[test]
    fn test_rook() {
        let b4 = Coord::from_parts(File::B, Rank::R4);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        let res = Bitboard::EMPTY
            .with(Coord::from_parts(File::C, Rank::R4))
            .with(Coord::from_parts(File::D, Rank::R4));
        assert_eq!(rook_strict(b4, e4), res);
        assert_eq!(rook_strict(e4, b4), res);

        let d3 = Coord::from_parts(File::D, Rank::R3);
        let d6 = Coord::from_parts(File::D, Rank::R6);
        let res = Bitboard::EMPTY
            .with(Coord::from_parts(File::D, Rank::R4))
            .with(Coord::from_parts(File::D, Rank::R5));
        assert_eq!(rook_strict(d3, d6), res);
        assert_eq!(rook_strict(d6, d3), res);

        assert!(!is_rook_valid(d3, d3));
        assert!(!is_rook_valid(d3, e4));
        assert_eq!(rook_strict(d3, e4), Bitboard::EMPTY);
    }
}
