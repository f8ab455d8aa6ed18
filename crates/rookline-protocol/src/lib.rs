//! Wire protocol for Rookline.
//!
//! This crate defines what clients and the server say to each other:
//!
//! - **Types** ([`ClientCommand`], [`ServerMessage`], [`GameRecord`]):
//!   the structures that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those structures
//!   are converted to and from frame bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw frames) and the game
//! coordinator. It knows nothing about connections or who is logged in.
//!
//! ```text
//! Transport (bytes) → Protocol (ClientCommand) → Coordinator → ServerMessage
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ClientCommand, CommandType, GameId, GameRecord, ServerMessage, Username,
    WireMove,
};
