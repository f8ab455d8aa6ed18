//! # Rookline
//!
//! A two-player chess server with live play over WebSockets.
//!
//! Clients send [`ClientCommand`](rookline_protocol::ClientCommand)s
//! (connect, move, leave, resign) as JSON frames. The server checks
//! identity, seat, and turn, runs the move through the rules engine,
//! persists the game, and pushes the new position to everyone watching.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rookline::prelude::*;
//!
//! # async fn start() -> Result<(), RookError> {
//! let store = MemoryGameStore::new();
//! store.create_game("casual").await;
//!
//! let server = RookServerBuilder::new()
//!     .bind("127.0.0.1:8080")
//!     .build(store, MemoryIdentityProvider::new())
//!     .await?;
//! server.run().await
//! # }
//! ```

mod coordinator;
mod error;
mod handler;
mod server;

pub use coordinator::GameCoordinator;
pub use error::{CommandError, ErrorKind, RookError};
pub use server::{RookServer, RookServerBuilder, ServerConfig};

/// Everything needed to stand up a server and talk to it.
pub mod prelude {
    pub use crate::{
        CommandError, ErrorKind, GameCoordinator, RookError, RookServer,
        RookServerBuilder, ServerConfig,
    };
    pub use rookline_protocol::{
        ClientCommand, Codec, CommandType, GameId, GameRecord, JsonCodec,
        ServerMessage, Username, WireMove,
    };
    pub use rookline_rules::{
        Board, Color, Game, GameStatus, Move, Piece, PieceType, Position,
    };
    pub use rookline_session::{
        IdentityProvider, MemoryIdentityProvider, OutboundSender,
        SessionError, SessionRegistry,
    };
    pub use rookline_store::{GameStore, MemoryGameStore, StoreError};
}
