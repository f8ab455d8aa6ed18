//! Value types shared by the board, the move generator, and the game.
//!
//! Everything here is small and `Copy`: a piece is two tags, a position
//! is two bytes, a move is two positions and an optional promotion. They
//! travel on the wire inside a game snapshot, so each derives serde with
//! the SCREAMING_CASE tags clients expect (`"WHITE"`, `"PAWN"`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::RulesError;

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// The two sides of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Returns the other side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row a pawn of this color starts on (and may double-step from).
    pub(crate) const fn pawn_start_row(self) -> u8 {
        match self {
            Self::White => 2,
            Self::Black => 7,
        }
    }

    /// Row a pawn of this color promotes on.
    pub(crate) const fn last_row(self) -> u8 {
        match self {
            Self::White => 8,
            Self::Black => 1,
        }
    }

    /// Row delta of a single pawn step.
    pub(crate) const fn forward(self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "White"),
            Self::Black => write!(f, "Black"),
        }
    }
}

// ---------------------------------------------------------------------------
// PieceType / Piece
// ---------------------------------------------------------------------------

/// The six kinds of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PieceType {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceType {
    /// Types a pawn may promote to, in the order candidates are generated.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Single-letter code used in move notation (`Q`, `N`, ...).
    pub const fn letter(self) -> char {
        match self {
            Self::King => 'K',
            Self::Queen => 'Q',
            Self::Rook => 'R',
            Self::Bishop => 'B',
            Self::Knight => 'N',
            Self::Pawn => 'P',
        }
    }
}

/// A piece on the board. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub color: Color,
    pub piece_type: PieceType,
}

impl Piece {
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A square on the board, 1-indexed.
///
/// Row 1 is White's back rank, column 1 is the a-file. The fields are
/// private so a `Position` is always on the board: untrusted input goes
/// through [`Position::try_new`], and stepping off the edge with
/// [`Position::offset`] yields `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition", into = "RawPosition")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Builds a position from 1-indexed coordinates.
    ///
    /// # Errors
    /// Returns [`RulesError::OutOfBounds`] unless both are in `1..=8`.
    pub fn try_new(row: i64, col: i64) -> Result<Self, RulesError> {
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            Ok(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(RulesError::OutOfBounds { row, col })
        }
    }

    /// Builds a position the caller already knows to be on the board.
    ///
    /// # Panics
    /// Panics if either coordinate is outside `1..=8`. Intended for
    /// constants and tests.
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row >= 1 && row <= 8 && col >= 1 && col <= 8);
        Self { row, col }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the square `(d_row, d_col)` away, or `None` off the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (1..=8).contains(&row) && (1..=8).contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// All 64 squares, row-major from a1.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=8u8).flat_map(|row| (1..=8u8).map(move |col| Self { row, col }))
    }

    pub(crate) const fn index(self) -> (usize, usize) {
        (self.row as usize - 1, self.col as usize - 1)
    }
}

/// Algebraic form: column letter then row digit (`e4`).
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col - 1) as char;
        write!(f, "{file}{}", self.row)
    }
}

/// Serde shape for [`Position`]: `{ "row": 2, "col": 5 }`, validated on
/// the way in.
#[derive(Serialize, Deserialize)]
struct RawPosition {
    row: i64,
    col: i64,
}

impl TryFrom<RawPosition> for Position {
    type Error = RulesError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::try_new(raw.row, raw.col)
    }
}

impl From<Position> for RawPosition {
    fn from(pos: Position) -> Self {
        Self {
            row: i64::from(pos.row),
            col: i64::from(pos.col),
        }
    }
}

// ---------------------------------------------------------------------------
// Move
// ---------------------------------------------------------------------------

/// A move from one square to another, with an optional promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Move {
    pub start: Position,
    pub end: Position,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub const fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            promotion: None,
        }
    }

    pub const fn with_promotion(
        start: Position,
        end: Position,
        promotion: PieceType,
    ) -> Self {
        Self {
            start,
            end,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.start, self.end)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.letter())?;
        }
        Ok(())
    }
}
