//! Core protocol types for Rookline's wire format.
//!
//! This module defines every type that travels "on the wire": the
//! commands a client sends, the messages the server pushes back, and the
//! game record both sides agree on.
//!
//! Field names are camelCase and tags are SCREAMING_SNAKE_CASE because
//! that is what browser clients speak:
//!
//! ```text
//! → {"commandType":"MAKE_MOVE","authToken":"…","gameId":7,
//!    "move":{"startRow":2,"startCol":5,"endRow":4,"endCol":5}}
//! ← {"serverMessageType":"LOAD_GAME","game":{…}}
//! ← {"serverMessageType":"NOTIFICATION","message":"…"}
//! ← {"serverMessageType":"ERROR","errorMessage":"Error: …"}
//! ```

use std::fmt;

use rookline_rules::{Color, Game, Move, PieceType, Position, RulesError};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a game in the store.
///
/// A newtype rather than a bare `u32` so a game id can't be confused with
/// a row or column index. `#[serde(transparent)]` keeps it a plain number
/// on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u32);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A player's account name, as resolved from an auth token.
///
/// This is the identity everything else keys on: seats, registry
/// entries, and notification text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Client → Server
// ---------------------------------------------------------------------------

/// Which operation a [`ClientCommand`] asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandType {
    /// Join a game's room (as a player or an observer).
    Connect,
    /// Play a move. Requires [`ClientCommand::chess_move`].
    MakeMove,
    /// Leave the room, giving up the seat if one is held.
    Leave,
    /// Concede. Only seated players may resign.
    Resign,
}

/// A move as it appears on the wire: four raw coordinates.
///
/// Coordinates are deliberately unchecked integers here so that an
/// out-of-range square is reported as a validation error with a useful
/// message, not as an opaque decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireMove {
    pub start_row: i64,
    pub start_col: i64,
    pub end_row: i64,
    pub end_col: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceType>,
}

impl WireMove {
    /// Converts to a rules-engine move.
    ///
    /// # Errors
    /// Returns [`RulesError::OutOfBounds`] if any coordinate is outside
    /// `1..=8`.
    pub fn to_move(&self) -> Result<Move, RulesError> {
        Ok(Move {
            start: Position::try_new(self.start_row, self.start_col)?,
            end: Position::try_new(self.end_row, self.end_col)?,
            promotion: self.promotion,
        })
    }
}

impl From<Move> for WireMove {
    fn from(mv: Move) -> Self {
        Self {
            start_row: i64::from(mv.start.row()),
            start_col: i64::from(mv.start.col()),
            end_row: i64::from(mv.end.row()),
            end_col: i64::from(mv.end.col()),
            promotion: mv.promotion,
        }
    }
}

/// One command from a client. Every command carries its own auth token;
/// there is no session-level login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCommand {
    pub command_type: CommandType,
    pub auth_token: String,
    pub game_id: GameId,
    /// Present only for [`CommandType::MakeMove`].
    #[serde(rename = "move", default, skip_serializing_if = "Option::is_none")]
    pub chess_move: Option<WireMove>,
}

impl ClientCommand {
    fn new(command_type: CommandType, token: &str, game_id: GameId) -> Self {
        Self {
            command_type,
            auth_token: token.to_string(),
            game_id,
            chess_move: None,
        }
    }

    pub fn connect(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Connect, token, game_id)
    }

    pub fn make_move(token: &str, game_id: GameId, mv: Move) -> Self {
        Self {
            chess_move: Some(mv.into()),
            ..Self::new(CommandType::MakeMove, token, game_id)
        }
    }

    pub fn leave(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Leave, token, game_id)
    }

    pub fn resign(token: &str, game_id: GameId) -> Self {
        Self::new(CommandType::Resign, token, game_id)
    }
}

// ---------------------------------------------------------------------------
// Game record
// ---------------------------------------------------------------------------

/// A game as the store keeps it: the rules state plus who sits where.
///
/// Seats belong to the record, not to the [`Game`], because they are
/// bookkeeping about accounts and the rules engine has no notion of
/// accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id: GameId,
    pub white_username: Option<Username>,
    pub black_username: Option<Username>,
    pub game_name: String,
    pub game: Game,
}

impl GameRecord {
    /// A new game in the starting position with both seats open.
    pub fn new(game_id: GameId, game_name: impl Into<String>) -> Self {
        Self {
            game_id,
            white_username: None,
            black_username: None,
            game_name: game_name.into(),
            game: Game::new(),
        }
    }

    /// The username holding `color`'s seat.
    pub fn player(&self, color: Color) -> Option<&Username> {
        match color {
            Color::White => self.white_username.as_ref(),
            Color::Black => self.black_username.as_ref(),
        }
    }

    /// The color `username` plays, or `None` for an observer.
    ///
    /// If the same account holds both seats, White wins the tie.
    pub fn seat_of(&self, username: &Username) -> Option<Color> {
        if self.white_username.as_ref() == Some(username) {
            Some(Color::White)
        } else if self.black_username.as_ref() == Some(username) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Puts `username` in `color`'s seat, replacing any occupant.
    pub fn seat(&mut self, color: Color, username: Username) {
        match color {
            Color::White => self.white_username = Some(username),
            Color::Black => self.black_username = Some(username),
        }
    }

    /// Opens `color`'s seat. Board and turn are untouched.
    pub fn clear_seat(&mut self, color: Color) {
        match color {
            Color::White => self.white_username = None,
            Color::Black => self.black_username = None,
        }
    }
}

// ---------------------------------------------------------------------------
// Server → Client
// ---------------------------------------------------------------------------

/// A message pushed to a client. One per event, never batched.
///
/// `#[serde(tag = "serverMessageType")]` produces internally tagged JSON,
/// e.g. `{ "serverMessageType": "NOTIFICATION", "message": "…" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "serverMessageType", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerMessage {
    /// Full snapshot of a game; clients replace their copy wholesale.
    LoadGame { game: GameRecord },

    /// Human-readable event text (joins, moves, check, resignations).
    Notification { message: String },

    /// A rejected command, sent only to whoever issued it.
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl ServerMessage {
    pub fn load_game(game: GameRecord) -> Self {
        Self::LoadGame { game }
    }

    pub fn notification(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
        }
    }

    /// Builds an error message. The text gets an `Error: ` prefix so
    /// clients can print it verbatim.
    pub fn error(reason: impl fmt::Display) -> Self {
        Self::Error {
            error_message: format!("Error: {reason}"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
