//! An in-memory [`GameStore`].
//!
//! Games live in a `HashMap` behind a Tokio `RwLock`. Reads clone the
//! record out so no lock is held once the call returns. Ids are handed
//! out from an atomic counter starting at 1.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use rookline_protocol::{GameId, GameRecord, Username};
use rookline_rules::Color;
use tokio::sync::RwLock;

use crate::{GameStore, StoreError};

#[derive(Debug)]
pub struct MemoryGameStore {
    games: RwLock<HashMap<GameId, GameRecord>>,
    next_id: AtomicU32,
}

impl Default for MemoryGameStore {
    fn default() -> Self {
        Self {
            games: RwLock::new(HashMap::new()),
            next_id: AtomicU32::new(1),
        }
    }
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game in the starting position with both seats open.
    pub async fn create_game(&self, name: impl Into<String>) -> GameId {
        let game_id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let record = GameRecord::new(game_id, name);
        tracing::info!(%game_id, game_name = %record.game_name, "game created");
        self.games.write().await.insert(game_id, record);
        game_id
    }

    /// Seats `username` as `color` in `game_id`.
    ///
    /// Claiming a seat you already hold is a no-op.
    ///
    /// # Errors
    /// - [`StoreError::NotFound`] if the game doesn't exist
    /// - [`StoreError::SeatTaken`] if someone else holds the seat
    pub async fn join_game(
        &self,
        game_id: GameId,
        color: Color,
        username: Username,
    ) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        let record = games
            .get_mut(&game_id)
            .ok_or(StoreError::NotFound(game_id))?;

        if let Some(holder) = record.player(color) {
            if *holder != username {
                return Err(StoreError::SeatTaken { game_id, color });
            }
        }
        tracing::info!(%game_id, %username, %color, "seat claimed");
        record.seat(color, username);
        Ok(())
    }

    /// Every stored game, ordered by id.
    pub async fn list_games(&self) -> Vec<GameRecord> {
        let mut games: Vec<GameRecord> =
            self.games.read().await.values().cloned().collect();
        games.sort_by_key(|g| g.game_id.0);
        games
    }

    /// Drops every game. Ids keep counting up.
    pub async fn clear(&self) {
        self.games.write().await.clear();
    }
}

impl GameStore for MemoryGameStore {
    async fn get_game(&self, game_id: GameId) -> Result<Option<GameRecord>, StoreError> {
        Ok(self.games.read().await.get(&game_id).cloned())
    }

    async fn update_game(&self, record: GameRecord) -> Result<(), StoreError> {
        let mut games = self.games.write().await;
        let slot = games
            .get_mut(&record.game_id)
            .ok_or(StoreError::NotFound(record.game_id))?;
        *slot = record;
        Ok(())
    }
}

// =========================================================================
// Tests
// =========================================================================
