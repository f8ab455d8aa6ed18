//! Error types for the Rookline server.
//!
//! Two layers live here:
//!
//! - [`RookError`] wraps every sub-crate error so `?` composes across
//!   the stack. It is what the server loop and connection handler return.
//! - [`CommandError`] is why a single client command was rejected. It
//!   never ends a connection; the coordinator turns it into an `ERROR`
//!   message for whoever sent the command.

use rookline_protocol::{GameId, ProtocolError};
use rookline_rules::{Move, RulesError};
use rookline_session::SessionError;
use rookline_store::StoreError;
use rookline_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so
/// the `?` operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RookError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, oversized frame).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An identity error (unknown or revoked token).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A persistence error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Broad class of a [`CommandError`], for logging and for tests that
/// care about the category rather than the exact text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed command, bad coordinates, missing move, unknown game.
    Validation,
    /// Bad token, not seated, or not this player's turn.
    Authorization,
    /// The move is not among the piece's legal moves.
    RuleViolation,
    /// The game is already over.
    TerminalState,
    /// The store could not be read or written.
    StoreFailure,
}

/// Why a client command was rejected.
///
/// The `Display` text is what the client sees after the `Error: ` prefix.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),

    #[error("game {0} does not exist")]
    GameNotFound(GameId),

    #[error("{0}")]
    Unauthorized(String),

    #[error("it is not your turn")]
    WrongTurn,

    #[error("invalid move {0}")]
    InvalidMove(Move),

    #[error("game is already over")]
    GameOver,

    /// Details stay in the server log.
    #[error("storage unavailable, try again later")]
    Store(#[source] StoreError),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::GameNotFound(_) => ErrorKind::Validation,
            Self::Unauthorized(_) | Self::WrongTurn => ErrorKind::Authorization,
            Self::InvalidMove(_) => ErrorKind::RuleViolation,
            Self::GameOver => ErrorKind::TerminalState,
            Self::Store(_) => ErrorKind::StoreFailure,
        }
    }
}

impl From<SessionError> for CommandError {
    fn from(_: SessionError) -> Self {
        Self::Unauthorized("invalid auth token".into())
    }
}

impl From<RulesError> for CommandError {
    fn from(err: RulesError) -> Self {
        match err {
            RulesError::InvalidMove(mv) => Self::InvalidMove(mv),
            RulesError::WrongTurn { .. } => Self::WrongTurn,
            RulesError::OutOfBounds { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(game_id) => Self::GameNotFound(game_id),
            other => Self::Store(other),
        }
    }
}

impl From<ProtocolError> for CommandError {
    fn from(err: ProtocolError) -> Self {
        Self::Validation(format!("malformed command: {err}"))
    }
}
