//! Game session: turns, draw offers, resignation and the game outcome

use crate::board::{self, Board};
use crate::moves::{Applied, IllegalMove, Move, ParseError};
use crate::types::{Color, DrawReason, Outcome, WinReason};

use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// Error playing a move or a session action
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlayError {
    /// The game is already over
    #[error("game is finished")]
    Finished,
    /// The move is not allowed on the current board
    #[error("{0}")]
    Illegal(#[from] IllegalMove),
    /// The move text cannot be parsed
    #[error("cannot parse move: {0}")]
    Parse(#[from] ParseError),
    /// There is no draw offer to accept
    #[error("no draw offered")]
    NoDrawOffer,
    /// The opponent has offered a draw, which must be accepted or answered by resignation
    #[error("draw offer pending, accept it or resign")]
    DrawPending,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot play move #{}: {}", .pos + 1, .source)]
pub struct ListPlayError {
    pub pos: usize,
    pub source: PlayError,
}

/// Chess game between two players
///
/// The game owns the board and applies moves in the order a player makes them: the move is
/// validated and committed, the pawn is promoted if needed, and the turn passes to the opponent.
/// After each move the game checks whether the opponent is checkmated or stalemated.
///
/// A player may offer a draw along with a move. The opponent then cannot move any more and has to
/// accept the draw or resign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    outcome: Option<Outcome>,
}

impl Game {
    pub fn new(board: Board) -> Game {
        let mut res = Game {
            board,
            moves: Vec::new(),
            outcome: None,
        };
        res.outcome = res.calc_outcome();
        res
    }

    pub fn new_initial() -> Game {
        Game::new(Board::initial())
    }

    pub fn from_fen(s: &str) -> Result<Game, board::FenParseError> {
        Ok(Game::new(Board::from_fen(s)?))
    }

    /// Returns the current board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.board.side()
    }

    /// Number of moves played so far
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Iterates over the moves played so far
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().copied()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    #[inline]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.board.is_check(self.side())
    }

    /// Calculates the outcome forced by the position, i.e. checkmate or stalemate
    pub fn calc_outcome(&self) -> Option<Outcome> {
        let side = self.side();
        if self.board.has_legal_moves(side) {
            return None;
        }
        if self.board.is_check(side) {
            Some(Outcome::Win {
                side: side.inv(),
                reason: WinReason::Checkmate,
            })
        } else {
            Some(Outcome::Draw(DrawReason::Stalemate))
        }
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        debug!("game over: {}", outcome);
        self.outcome = Some(outcome);
        outcome
    }

    fn ensure_running(&self) -> Result<(), PlayError> {
        if self.is_finished() {
            return Err(PlayError::Finished);
        }
        Ok(())
    }

    /// Plays the move `mv` for the side to move
    ///
    /// Fails with [`PlayError::DrawPending`] if the opponent has offered a draw.
    pub fn play(&mut self, mv: Move) -> Result<Applied, PlayError> {
        self.ensure_running()?;
        if self.is_draw_offered() {
            return Err(PlayError::DrawPending);
        }
        let applied = self.board.make_move(mv)?;
        self.moves.push(mv);
        if let Some(outcome) = self.calc_outcome() {
            self.finish(outcome);
        }
        Ok(applied)
    }

    /// Plays the move `mv` and offers a draw to the opponent along with it
    ///
    /// The offer is made only if the move is accepted.
    pub fn play_offering_draw(&mut self, mv: Move) -> Result<Applied, PlayError> {
        let side = self.side();
        let applied = self.play(mv)?;
        if !self.is_finished() {
            self.board.offer_draw(side);
        }
        Ok(applied)
    }

    /// Parses the move from text and plays it, see [`Game::play()`]
    pub fn play_str(&mut self, s: &str) -> Result<Applied, PlayError> {
        self.play(Move::from_str(s)?)
    }

    /// Plays the moves from `list` one by one, stopping at the first failure
    pub fn play_list<'a>(
        &mut self,
        list: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), ListPlayError> {
        for (pos, s) in list.into_iter().enumerate() {
            self.play_str(s)
                .map_err(|source| ListPlayError { pos, source })?;
        }
        Ok(())
    }

    /// Offers a draw on behalf of the side to move
    pub fn offer_draw(&mut self) -> Result<(), PlayError> {
        self.ensure_running()?;
        self.board.offer_draw(self.side());
        Ok(())
    }

    /// Returns `true` if the side to move may accept a draw
    #[inline]
    pub fn is_draw_offered(&self) -> bool {
        self.board.is_draw_offered(self.side())
    }

    /// Accepts the opponent's draw offer on behalf of the side to move
    pub fn accept_draw(&mut self) -> Result<Outcome, PlayError> {
        self.ensure_running()?;
        if !self.is_draw_offered() {
            return Err(PlayError::NoDrawOffer);
        }
        Ok(self.finish(Outcome::Draw(DrawReason::Agreement)))
    }

    /// Resigns on behalf of the side to move
    pub fn resign(&mut self) -> Result<Outcome, PlayError> {
        self.ensure_running()?;
        Ok(self.finish(Outcome::Win {
            side: self.side().inv(),
            reason: WinReason::Resign,
        }))
    }
}
