//! Player identity and live connection tracking for Rookline.
//!
//! This crate answers two questions for the game coordinator:
//!
//! 1. **Who is this?** The [`IdentityProvider`] trait turns the auth
//!    token carried by every command into a [`Username`].
//! 2. **Who is watching?** The [`SessionRegistry`] maps each connected
//!    username to the game room it joined and the channel feeding its
//!    socket.
//!
//! # How it fits in the stack
//!
//! ```text
//! Coordinator (above)  ← resolves tokens, fans messages out to rooms
//!     ↕
//! Session Layer (this crate)  ← identity + username → channel map
//!     ↕
//! Protocol Layer (below)  ← provides Username, GameId, ServerMessage
//! ```
//!
//! [`Username`]: rookline_protocol::Username

mod error;
mod identity;
mod registry;

pub use error::SessionError;
pub use identity::{IdentityProvider, MemoryIdentityProvider};
pub use registry::{OutboundSender, SessionRegistry};
