//! The 8×8 board.
//!
//! A board is a plain grid of optional pieces. It knows nothing about
//! turns, check, or legality; it only stores and overwrites squares.
//! Cloning it is a 64-cell copy, which is what the game uses as a
//! scratch board when simulating moves.

use serde::{Deserialize, Serialize};

use crate::{Color, Piece, PieceType, Position};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// An 8×8 grid of optional pieces.
///
/// `squares[0]` is row 1 (White's back rank), `squares[r][0]` is the
/// a-file. On the wire this is an array of eight rows, each an array of
/// eight `null`-or-piece cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// The standard starting layout.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (i, kind) in BACK_RANK.iter().enumerate() {
            board.squares[0][i] = Some(Piece::new(Color::White, *kind));
            board.squares[1][i] =
                Some(Piece::new(Color::White, PieceType::Pawn));
            board.squares[6][i] =
                Some(Piece::new(Color::Black, PieceType::Pawn));
            board.squares[7][i] = Some(Piece::new(Color::Black, *kind));
        }
        board
    }

    /// Returns the piece on `pos`, if any.
    pub fn piece(&self, pos: Position) -> Option<Piece> {
        let (r, c) = pos.index();
        self.squares[r][c]
    }

    /// Overwrites `pos` with `piece` (or clears it with `None`).
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        let (r, c) = pos.index();
        self.squares[r][c] = piece;
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.piece(pos).map(|p| (pos, p)))
    }

    /// The first king of `color` in row-major order.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.color == color && p.piece_type == PieceType::King)
            .map(|(pos, _)| pos)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}
