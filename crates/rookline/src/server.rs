//! `RookServer` builder and accept loop.
//!
//! This is the entry point for running a Rookline server. It ties the
//! layers together: transport → protocol → coordinator → registry/store.

use std::net::SocketAddr;
use std::sync::Arc;

use rookline_protocol::{Codec, JsonCodec};
use rookline_session::IdentityProvider;
use rookline_store::GameStore;
use rookline_transport::{Transport, WebSocketTransport};

use crate::RookError;
use crate::coordinator::GameCoordinator;
use crate::handler::handle_connection;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address the WebSocket listener binds to. Port 0 picks a free one.
    pub bind_addr: String,
    /// Frames larger than this are rejected with a validation error.
    pub max_message_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            max_message_bytes: 64 * 1024,
        }
    }
}

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<S: GameStore, I: IdentityProvider, C: Codec> {
    pub(crate) coordinator: GameCoordinator<S, I>,
    pub(crate) codec: C,
    pub(crate) config: ServerConfig,
}

/// Builder for configuring and starting a Rookline server.
///
/// # Example
///
/// ```rust,no_run
/// use rookline::prelude::*;
///
/// # async fn start() -> Result<(), RookError> {
/// let server = RookServer::builder()
///     .bind("0.0.0.0:8080")
///     .build(MemoryGameStore::new(), MemoryIdentityProvider::new())
///     .await?;
/// server.run().await
/// # }
/// ```
#[derive(Debug, Default)]
pub struct RookServerBuilder {
    config: ServerConfig,
}

impl RookServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.config.bind_addr = addr.to_string();
        self
    }

    /// Sets the largest accepted inbound frame, in bytes.
    pub fn max_message_bytes(mut self, limit: usize) -> Self {
        self.config.max_message_bytes = limit;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ServerConfig) -> Self {
        self.config = config;
        self
    }

    /// Binds the listener and assembles the server.
    ///
    /// Uses `JsonCodec` and `WebSocketTransport`.
    pub async fn build<S, I>(
        self,
        store: S,
        identity: I,
    ) -> Result<RookServer<S, I, JsonCodec>, RookError>
    where
        S: GameStore,
        I: IdentityProvider,
    {
        let transport = WebSocketTransport::bind(&self.config.bind_addr).await?;

        let state = Arc::new(ServerState {
            coordinator: GameCoordinator::new(store, identity),
            codec: JsonCodec,
            config: self.config,
        });

        Ok(RookServer { transport, state })
    }
}

/// A bound Rookline server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct RookServer<S: GameStore, I: IdentityProvider, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<S, I, C>>,
}

impl RookServer<rookline_store::MemoryGameStore, rookline_session::MemoryIdentityProvider, JsonCodec> {
    /// Creates a new builder.
    pub fn builder() -> RookServerBuilder {
        RookServerBuilder::new()
    }
}

impl<S, I, C> RookServer<S, I, C>
where
    S: GameStore,
    I: IdentityProvider,
    C: Codec,
{
    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.transport.local_addr()
    }

    pub fn config(&self) -> &ServerConfig {
        &self.state.config
    }

    /// Runs the accept loop, spawning a handler task per connection.
    ///
    /// Runs until the process is terminated. A failed accept (a bad
    /// upgrade, say) is logged and the loop carries on.
    pub async fn run(mut self) -> Result<(), RookError> {
        tracing::info!(addr = %self.config().bind_addr, "Rookline server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
