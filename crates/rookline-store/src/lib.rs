//! Game persistence for Rookline.
//!
//! The coordinator never holds a game in memory between commands. Each
//! command fetches the [`GameRecord`](rookline_protocol::GameRecord),
//! works on a local copy, and writes the whole record back through
//! [`GameStore`].
//!
//! # Key types
//!
//! - [`GameStore`]: the trait a storage backend implements
//! - [`MemoryGameStore`]: a process-local backend for demos and tests
//! - [`StoreError`]: what a backend can report

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryGameStore;
pub use store::GameStore;
