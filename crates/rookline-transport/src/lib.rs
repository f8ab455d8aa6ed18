//! Network plumbing for Rookline.
//!
//! The server speaks to clients through two small traits: a [`Transport`]
//! hands out connections, and each [`Connection`] moves whole frames in
//! and out. Nothing above this crate knows that the frames ride on
//! WebSockets.
//!
//! # Feature Flags
//!
//! - `websocket` (default): [`WebSocketTransport`] via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

use std::fmt;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

/// Process-unique tag for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// A listener that yields one [`Connection`] per client.
pub trait Transport: Send + Sync + 'static {
    type Connection: Connection;
    type Error: std::error::Error + Send + Sync;

    /// Waits for the next client and completes any protocol handshake.
    async fn accept(&mut self) -> Result<Self::Connection, Self::Error>;
}

/// A bidirectional stream of frames with one client.
///
/// `send` and `recv` must be callable concurrently from different tasks:
/// the server reads commands on one task while broadcasts are written
/// from another.
pub trait Connection: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync;

    /// Writes one frame.
    async fn send(&self, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads the next frame, or `Ok(None)` once the peer has closed.
    async fn recv(&self) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Starts a clean close from our side.
    async fn close(&self) -> Result<(), Self::Error>;

    fn id(&self) -> ConnectionId;
}
