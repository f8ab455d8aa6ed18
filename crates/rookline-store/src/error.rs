//! Error types for the store layer.

use rookline_protocol::GameId;
use rookline_rules::Color;

/// Errors a [`GameStore`](crate::GameStore) can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No game with this id exists.
    #[error("game {0} not found")]
    NotFound(GameId),

    /// The requested seat already belongs to another player.
    #[error("{color} seat in game {game_id} is already taken")]
    SeatTaken { game_id: GameId, color: Color },

    /// The backend could not be reached or refused the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
