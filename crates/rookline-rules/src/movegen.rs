//! Pseudo-legal move generation.
//!
//! One pure function per movement family, dispatched on [`PieceType`].
//! "Pseudo-legal" means geometrically possible: these functions do not
//! care whether the mover's own king ends up attacked. Filtering that out
//! is the game's job (see [`crate::Game::valid_moves`]).
//!
//! Output order is fixed: direction and offset tables are walked in the
//! order declared below, and promotion candidates come out as
//! queen, rook, bishop, knight.

use crate::{Board, Color, Move, Piece, PieceType, Position};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
];

/// Candidate moves for the piece on `pos`, ignoring self-check.
///
/// Returns an empty list when `pos` is empty.
pub fn candidate_moves(board: &Board, pos: Position) -> Vec<Move> {
    let Some(piece) = board.piece(pos) else {
        return Vec::new();
    };

    match piece.piece_type {
        PieceType::Rook => slide(board, pos, piece.color, &ROOK_DIRECTIONS),
        PieceType::Bishop => {
            slide(board, pos, piece.color, &BISHOP_DIRECTIONS)
        }
        PieceType::Queen => slide(board, pos, piece.color, &QUEEN_DIRECTIONS),
        PieceType::Knight => leap(board, pos, piece.color, &KNIGHT_OFFSETS),
        PieceType::King => leap(board, pos, piece.color, &KING_OFFSETS),
        PieceType::Pawn => pawn(board, pos, piece.color),
    }
}

/// Returns `true` if any piece of `attacker` has a candidate move ending
/// on `target`.
pub fn is_attacked_by(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces()
        .filter(|(_, p)| p.color == attacker)
        .any(|(pos, _)| {
            candidate_moves(board, pos).iter().any(|m| m.end == target)
        })
}

fn is_enemy(board: &Board, pos: Position, color: Color) -> bool {
    matches!(board.piece(pos), Some(Piece { color: c, .. }) if c != color)
}

/// Rays: keep going over empty squares, stop on the first occupied one,
/// and include it only if it holds an enemy.
fn slide(
    board: &Board,
    from: Position,
    color: Color,
    directions: &[(i8, i8)],
) -> Vec<Move> {
    let mut moves = Vec::new();
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(to) = cursor {
            match board.piece(to) {
                None => moves.push(Move::new(from, to)),
                Some(other) => {
                    if other.color != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            cursor = to.offset(d_row, d_col);
        }
    }
    moves
}

/// Single hops: each offset once, onto an empty or enemy square.
fn leap(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i8, i8)],
) -> Vec<Move> {
    offsets
        .iter()
        .filter_map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter(|&to| board.piece(to).is_none() || is_enemy(board, to, color))
        .map(|to| Move::new(from, to))
        .collect()
}

fn pawn(board: &Board, from: Position, color: Color) -> Vec<Move> {
    let mut moves = Vec::new();
    let forward = color.forward();

    if let Some(one) = from.offset(forward, 0) {
        if board.piece(one).is_none() {
            push_pawn_move(&mut moves, from, one, color);

            if from.row() == color.pawn_start_row() {
                if let Some(two) = one.offset(forward, 0) {
                    if board.piece(two).is_none() {
                        push_pawn_move(&mut moves, from, two, color);
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        if let Some(to) = from.offset(forward, d_col) {
            if is_enemy(board, to, color) {
                push_pawn_move(&mut moves, from, to, color);
            }
        }
    }

    moves
}

/// Adds a pawn move, expanding it into one move per promotion type when
/// it lands on the last rank.
fn push_pawn_move(
    moves: &mut Vec<Move>,
    from: Position,
    to: Position,
    color: Color,
) {
    if to.row() == color.last_row() {
        moves.extend(
            PieceType::PROMOTIONS
                .iter()
                .map(|&kind| Move::with_promotion(from, to, kind)),
        );
    } else {
        moves.push(Move::new(from, to));
    }
}
