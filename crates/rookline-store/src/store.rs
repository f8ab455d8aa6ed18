//! The storage trait the coordinator writes through.

use std::future::Future;
use std::sync::Arc;

use rookline_protocol::{GameId, GameRecord};

use crate::StoreError;

/// Fetches and replaces whole game records.
///
/// There is no version token: two writers racing on the same game both
/// succeed and the later one wins.
///
/// # Example
///
/// ```rust
/// use rookline_protocol::{GameId, GameRecord};
/// use rookline_store::{GameStore, StoreError};
///
/// /// A store that is always down.
/// struct Offline;
///
/// impl GameStore for Offline {
///     async fn get_game(&self, _: GameId) -> Result<Option<GameRecord>, StoreError> {
///         Err(StoreError::Unavailable("offline".into()))
///     }
///
///     async fn update_game(&self, _: GameRecord) -> Result<(), StoreError> {
///         Err(StoreError::Unavailable("offline".into()))
///     }
/// }
/// ```
pub trait GameStore: Send + Sync + 'static {
    /// Returns the record for `game_id`, or `None` if it doesn't exist.
    ///
    /// # Errors
    /// [`StoreError::Unavailable`] if the backend can't be read.
    fn get_game(
        &self,
        game_id: GameId,
    ) -> impl Future<Output = Result<Option<GameRecord>, StoreError>> + Send;

    /// Replaces the stored record with `record`, keyed by its `game_id`.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if no such game exists
    /// - [`StoreError::Unavailable`] if the backend can't be written
    fn update_game(
        &self,
        record: GameRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Lets callers keep a handle on a store after handing it to the server.
impl<T: GameStore> GameStore for Arc<T> {
    fn get_game(
        &self,
        game_id: GameId,
    ) -> impl Future<Output = Result<Option<GameRecord>, StoreError>> + Send {
        (**self).get_game(game_id)
    }

    fn update_game(
        &self,
        record: GameRecord,
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).update_game(record)
    }
}
