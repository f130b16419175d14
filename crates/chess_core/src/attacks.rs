//! Attack queries on top of cozy-chess's precomputed tables.
//!
//! The evaluator and move orderer ask "who attacks this square?" far more
//! often than they generate moves, so these work directly on bitboards and
//! never touch move generation.

use cozy_chess::{
    get_bishop_moves, get_king_moves, get_knight_moves, get_pawn_attacks, get_rook_moves,
    BitBoard, Board, Color, Piece, Square,
};

/// All pieces of `by` that attack `sq`, given the current occupancy.
pub fn attackers(board: &Board, sq: Square, by: Color) -> BitBoard {
    let occupied = board.occupied();
    let queens = board.pieces(Piece::Queen);
    let diagonal = board.pieces(Piece::Bishop) | queens;
    let orthogonal = board.pieces(Piece::Rook) | queens;

    // A pawn of `by` attacks `sq` iff a pawn of the other color on `sq` would attack it back.
    let all = (get_pawn_attacks(sq, !by) & board.pieces(Piece::Pawn))
        | (get_knight_moves(sq) & board.pieces(Piece::Knight))
        | (get_bishop_moves(sq, occupied) & diagonal)
        | (get_rook_moves(sq, occupied) & orthogonal)
        | (get_king_moves(sq) & board.pieces(Piece::King));

    all & board.colors(by)
}

#[inline]
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    !attackers(board, sq, by).is_empty()
}

/// Union of every square attacked by `by`.
pub fn attacked_squares(board: &Board, by: Color) -> BitBoard {
    let occupied = board.occupied();
    let mut attacked = BitBoard::EMPTY;

    for sq in board.colored_pieces(by, Piece::Pawn) {
        attacked = attacked | get_pawn_attacks(sq, by);
    }
    for sq in board.colored_pieces(by, Piece::Knight) {
        attacked = attacked | get_knight_moves(sq);
    }
    for sq in board.colored_pieces(by, Piece::Bishop) {
        attacked = attacked | get_bishop_moves(sq, occupied);
    }
    for sq in board.colored_pieces(by, Piece::Rook) {
        attacked = attacked | get_rook_moves(sq, occupied);
    }
    for sq in board.colored_pieces(by, Piece::Queen) {
        attacked = attacked | get_bishop_moves(sq, occupied) | get_rook_moves(sq, occupied);
    }
    for sq in board.colored_pieces(by, Piece::King) {
        attacked = attacked | get_king_moves(sq);
    }
    attacked
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
