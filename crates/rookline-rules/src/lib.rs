//! Chess rules for Rookline.
//!
//! This crate is pure computation with no I/O and no async.
//! It is organised leaves first:
//!
//! - **Types** ([`Color`], [`Piece`], [`Position`], [`Move`]): small
//!   `Copy` values that also travel on the wire.
//! - **Board** ([`Board`]): an 8×8 grid with get/set and nothing else.
//! - **Move generation** ([`candidate_moves`]): pseudo-legal moves per
//!   piece type.
//! - **Game** ([`Game`]): turn state machine that filters out
//!   self-check and detects check, checkmate, and stalemate.
//!
//! Castling and en passant are not part of the rule set.
//!
//! ```rust
//! use rookline_rules::{Color, Game, Move, Position};
//!
//! let mut game = Game::new();
//! game.make_move(Move::new(Position::new(2, 5), Position::new(4, 5)))?;
//! assert_eq!(game.turn(), Color::Black);
//! # Ok::<(), rookline_rules::RulesError>(())
//! ```

mod board;
mod error;
mod game;
mod movegen;
mod types;

pub use board::Board;
pub use error::RulesError;
pub use game::{Game, GameStatus};
pub use movegen::{candidate_moves, is_attacked_by};
pub use types::{Color, Move, Piece, PieceType, Position};
