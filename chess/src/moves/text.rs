//! Parsing moves from text
//!
//! A move is written as a source and a destination square, optionally followed by a promotion
//! letter. The parts may be separated by spaces, so `e7e8q`, `e7e8 q` and `e7 e8 Q` all denote
//! the same move. Unknown promotion letters are treated as queen.

use super::base::Move;
use crate::types::{Coord, CoordParseError, PromotePiece};

use std::str::FromStr;

use thiserror::Error;

/// Error parsing a move from text
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Move contains non-ASCII characters
    #[error("non-ASCII data in move")]
    NonAscii,
    /// Move has too few or too many characters
    #[error("invalid move length")]
    BadLength,
    /// Bad source square
    #[error("bad source square: {0}")]
    BadSrc(CoordParseError),
    /// Bad destination square
    #[error("bad destination square: {0}")]
    BadDst(CoordParseError),
    /// Promotion part is longer than one letter
    #[error("bad promotion: {0:?}")]
    BadPromote(String),
    /// Move is followed by extra data
    #[error("extra data after move")]
    ExtraData,
}

fn parse_promote(s: Option<&str>) -> Result<Option<PromotePiece>, ParseError> {
    match s {
        None | Some("") => Ok(None),
        Some(p) => {
            let mut chars = p.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Some(PromotePiece::from_char_or_queen(c))),
                _ => Err(ParseError::BadPromote(p.to_string())),
            }
        }
    }
}

fn build(src: &str, dst: &str, promote: Option<&str>) -> Result<Move, ParseError> {
    let src = Coord::from_str(src).map_err(ParseError::BadSrc)?;
    let dst = Coord::from_str(dst).map_err(ParseError::BadDst)?;
    Ok(match parse_promote(promote)? {
        Some(p) => Move::with_promote(src, dst, p),
        None => Move::new(src, dst),
    })
}

/// Parses `e2e4` or `e7e8q`, with an optional detached promotion letter
fn parse_joined(s: &str, promote: Option<&str>) -> Result<Move, ParseError> {
    match (s.len(), promote) {
        (4, _) => build(&s[0..2], &s[2..4], promote),
        (5, None) => build(&s[0..2], &s[2..4], Some(&s[4..])),
        _ => Err(ParseError::BadLength),
    }
}

/// Parses `e2` `e4` or `e7` `e8q`, with an optional detached promotion letter
fn parse_split(src: &str, dst: &str, promote: Option<&str>) -> Result<Move, ParseError> {
    match (dst.len(), promote) {
        (2, _) => build(src, dst, promote),
        (3, None) => build(src, &dst[0..2], Some(&dst[2..])),
        _ => Err(ParseError::BadLength),
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !s.is_ascii() {
            return Err(ParseError::NonAscii);
        }
        let tokens = s.split_ascii_whitespace().collect::<Vec<_>>();
        match tokens.as_slice() {
            [] => Err(ParseError::BadLength),
            [one] => parse_joined(one, None),
            [src, dst] if src.len() == 2 => parse_split(src, dst, None),
            [mv, promote] => parse_joined(mv, Some(*promote)),
            [src, dst, promote] if src.len() == 2 => parse_split(src, dst, Some(*promote)),
            [_, _, _] => Err(ParseError::BadLength),
            _ => Err(ParseError::ExtraData),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    #[test]
    fn test_simple() {
        let mv = Move::new(c("e2"), c("e4"));
        assert_eq!(Move::from_str("e2e4"), Ok(mv));
        assert_eq!(Move::from_str("e2 e4"), Ok(mv));
        assert_eq!(Move::from_str("  e2   e4 "), Ok(mv));
    }

    #[test]
    fn test_promote() {
        let queen = Move::with_promote(c("e7"), c("e8"), PromotePiece::Queen);
        let knight = Move::with_promote(c("e7"), c("e8"), PromotePiece::Knight);
        assert_eq!(Move::from_str("e7e8q"), Ok(queen));
        assert_eq!(Move::from_str("e7e8 N"), Ok(knight));
        assert_eq!(Move::from_str("e7 e8 N"), Ok(knight));
        assert_eq!(Move::from_str("e7 e8n"), Ok(knight));
        assert_eq!(Move::from_str("e7 e8 x"), Ok(queen));
        assert_eq!(
            Move::from_str("e7 e8 knight"),
            Err(ParseError::BadPromote("knight".to_string()))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(Move::from_str(""), Err(ParseError::BadLength));
        assert_eq!(Move::from_str("e2"), Err(ParseError::BadLength));
        assert_eq!(Move::from_str("e2e4e5"), Err(ParseError::BadLength));
        assert_eq!(Move::from_str("e2 e4 q r"), Err(ParseError::ExtraData));
        assert_eq!(Move::from_str("é2e4"), Err(ParseError::NonAscii));
        assert_eq!(
            Move::from_str("i2e4"),
            Err(ParseError::BadSrc(CoordParseError::UnexpectedFileChar('i')))
        );
        assert_eq!(
            Move::from_str("e2 e9"),
            Err(ParseError::BadDst(CoordParseError::UnexpectedRankChar('9')))
        );
    }
}
