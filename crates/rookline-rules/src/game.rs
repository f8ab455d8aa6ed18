//! The game state machine: board, turn, and the game-over flag.
//!
//! ```text
//!   InProgress ──(finish)──→ Over
//! ```
//!
//! A [`Game`] accepts moves only through [`Game::make_move`], which checks
//! the move against [`Game::valid_moves`] and the turn before touching
//! the board. Deciding whether a position is terminal is left to the
//! caller via [`Game::status`], because the session layer wants to word
//! the outcome itself.

use serde::{Deserialize, Serialize};

use crate::movegen::{candidate_moves, is_attacked_by};
use crate::{Board, Color, Move, Piece, Position, RulesError};

/// What the side to move is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    /// Not in check and has at least one legal move.
    Ongoing,
    /// In check with at least one legal move.
    Check,
    /// In check with no legal move.
    Checkmate,
    /// Not in check with no legal move.
    Stalemate,
}

impl GameStatus {
    /// `true` for checkmate and stalemate.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

/// A chess game in progress (or finished).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    board: Board,
    turn: Color,
    game_over: bool,
}

impl Game {
    /// A fresh game: standard layout, White to move.
    pub fn new() -> Self {
        Self::with_board(Board::standard(), Color::White)
    }

    /// A game starting from an arbitrary position.
    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Marks the game as over. There is no way back.
    pub fn finish(&mut self) {
        self.game_over = true;
    }

    /// Legal moves for the piece on `pos`.
    ///
    /// Each candidate is played out on a scratch copy of the board,
    /// promotion included, and dropped if it leaves the mover's king
    /// attacked. The live board is never touched.
    pub fn valid_moves(&self, pos: Position) -> Vec<Move> {
        let Some(piece) = self.board.piece(pos) else {
            return Vec::new();
        };

        candidate_moves(&self.board, pos)
            .into_iter()
            .filter(|mv| {
                let mut scratch = self.board.clone();
                apply(&mut scratch, *mv, piece);
                !in_check(&scratch, piece.color)
            })
            .collect()
    }

    /// Every legal move available to `color`, row-major by start square.
    pub fn all_valid_moves(&self, color: Color) -> Vec<Move> {
        self.board
            .pieces()
            .filter(|(_, p)| p.color == color)
            .flat_map(|(pos, _)| self.valid_moves(pos))
            .collect()
    }

    /// Plays `mv` and hands the turn to the other side.
    ///
    /// # Errors
    /// - [`RulesError::InvalidMove`] if `mv` is not one of
    ///   `valid_moves(mv.start)`
    /// - [`RulesError::WrongTurn`] if the piece belongs to the side not
    ///   on turn
    ///
    /// The board is untouched on error.
    pub fn make_move(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.valid_moves(mv.start).contains(&mv) {
            return Err(RulesError::InvalidMove(mv));
        }
        // valid_moves was non-empty, so the start square is occupied.
        let Some(piece) = self.board.piece(mv.start) else {
            return Err(RulesError::InvalidMove(mv));
        };
        if piece.color != self.turn {
            return Err(RulesError::WrongTurn {
                expected: self.turn,
                found: piece.color,
            });
        }

        apply(&mut self.board, mv, piece);
        self.turn = self.turn.opposite();
        Ok(())
    }

    /// `true` if any opposing piece could move onto `color`'s king.
    ///
    /// Uses pseudo-legal moves for the attacker: a pinned piece still
    /// gives check. A side without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        in_check(&self.board, color)
    }

    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.all_valid_moves(color).is_empty()
    }

    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.all_valid_moves(color).is_empty()
    }

    /// Check, mate, and stalemate folded into one answer for `color`.
    pub fn status(&self, color: Color) -> GameStatus {
        let check = self.is_in_check(color);
        let stuck = self.all_valid_moves(color).is_empty();
        match (check, stuck) {
            (true, true) => GameStatus::Checkmate,
            (true, false) => GameStatus::Check,
            (false, true) => GameStatus::Stalemate,
            (false, false) => GameStatus::Ongoing,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves `piece` along `mv` on `board`, substituting the promotion.
fn apply(board: &mut Board, mv: Move, piece: Piece) {
    let landed = match mv.promotion {
        Some(kind) => Piece::new(piece.color, kind),
        None => piece,
    };
    board.set_piece(mv.start, None);
    board.set_piece(mv.end, Some(landed));
}

fn in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_attacked_by(board, king, color.opposite()),
        None => false,
    }
}
