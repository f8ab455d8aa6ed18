//! Error types for the rules engine.

use crate::{Color, Move};

/// Why the rules engine refused something.
///
/// These are returned as values, never raised: the engine has no opinion
/// on how a rejection is reported. The session layer maps them onto the
/// messages a client sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The move is not among the legal moves of the piece on its start
    /// square (or there is no piece there).
    #[error("invalid move {0}")]
    InvalidMove(Move),

    /// The piece being moved belongs to the side not on turn.
    #[error("not {found}'s turn, {expected} to move")]
    WrongTurn { expected: Color, found: Color },

    /// A coordinate outside `1..=8`.
    #[error("position ({row}, {col}) is off the board")]
    OutOfBounds { row: i64, col: i64 },
}
