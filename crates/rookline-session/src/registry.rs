//! The session registry: who is connected, to which game, and how to
//! reach them.
//!
//! Every connection task registers an [`OutboundSender`] here when its
//! player joins a game. Broadcasting is then a matter of walking the map
//! and pushing a message into each matching channel; the connection's
//! writer task does the actual socket I/O.
//!
//! # Concurrency
//!
//! The registry is the one structure shared by every connection task, so
//! it is built on `DashMap` (a sharded concurrent map) and all of its
//! methods take `&self`. No shard lock is ever held across an `.await`:
//! sending on an unbounded channel is synchronous.
//!
//! # Closed channels
//!
//! When a socket goes away its writer task stops and drops the receiver.
//! The registry notices the next time it tries to send to that entry and
//! prunes it then. There is no background sweeper.

use dashmap::DashMap;
use rookline_protocol::{GameId, ServerMessage, Username};
use tokio::sync::mpsc;

/// The sending half of a connection's outbound message queue.
pub type OutboundSender = mpsc::UnboundedSender<ServerMessage>;

/// One registered participant.
#[derive(Debug, Clone)]
struct Entry {
    game_id: GameId,
    sender: OutboundSender,
}

/// Concurrent map from username to the game room they are in and the
/// channel that reaches their socket.
///
/// A username maps to at most one connection. Registering again (a
/// second tab, or joining another game) replaces the earlier entry.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    entries: DashMap<Username, Entry>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `username` in `game_id`'s room. Last writer wins.
    pub fn add(&self, username: Username, game_id: GameId, sender: OutboundSender) {
        tracing::debug!(%username, %game_id, "registered connection");
        self.entries.insert(username, Entry { game_id, sender });
    }

    /// Drops `username`'s entry. Absent entries are not an error.
    pub fn remove(&self, username: &Username) {
        if self.entries.remove(username).is_some() {
            tracing::debug!(%username, "unregistered connection");
        }
    }

    /// Sends `message` to every live member of `game_id`'s room except
    /// `exclude`, pruning any channel found closed along the way.
    ///
    /// Returns how many members the message was delivered to.
    pub fn broadcast(
        &self,
        exclude: Option<&Username>,
        message: &ServerMessage,
        game_id: GameId,
    ) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();

        for entry in self.entries.iter() {
            if entry.game_id != game_id || Some(entry.key()) == exclude {
                continue;
            }
            if entry.sender.send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                closed.push(entry.key().clone());
            }
        }

        // Iteration guards are gone; safe to take write locks now.
        for username in closed {
            self.prune(&username);
        }
        delivered
    }

    /// Sends `message` to one user, wherever they are registered.
    ///
    /// Returns `false` if the user is not registered or their channel has
    /// closed (in which case the entry is pruned).
    pub fn send_to(&self, username: &Username, message: ServerMessage) -> bool {
        let sent = match self.entries.get(username) {
            Some(entry) => entry.sender.send(message).is_ok(),
            None => return false,
        };
        if !sent {
            self.prune(username);
        }
        sent
    }

    /// Usernames currently registered in `game_id`'s room.
    pub fn room_members(&self, game_id: GameId) -> Vec<Username> {
        self.entries
            .iter()
            .filter(|entry| entry.game_id == game_id)
            .map(|entry| entry.key().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes `username` only if its channel is still closed. A fresh
    /// registration that raced in since the failed send is kept.
    fn prune(&self, username: &Username) {
        if self
            .entries
            .remove_if(username, |_, entry| entry.sender.is_closed())
            .is_some()
        {
            tracing::warn!(%username, "pruned closed connection");
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
