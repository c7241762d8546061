//! Square name conversions (`e4` <-> 28).

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{Bitboard, Square};

#[rustfmt::skip]
pub const SQUARE_NAMES: [&str; 64] = [
    "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
    "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
    "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
    "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
];

/// Lowercase name of a square index (`0..=63`).
#[inline]
pub fn square_name(square: Square) -> &'static str {
    SQUARE_NAMES[(square & 63) as usize]
}

/// Parse a square name such as `e4`.
pub fn algebraic_to_square(text: &str) -> ChessResult<Square> {
    match text.as_bytes() {
        [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok((rank - b'1') * 8 + (file - b'a')),
        _ => Err(ChessError::InvalidAlgebraicSquare(text.to_owned())),
    }
}

/// Names of every square in a bitboard, lowest first.
pub fn bitboard_to_algebraic(mut bitboard: Bitboard) -> Vec<&'static str> {
    let mut names = Vec::with_capacity(bitboard.count_ones() as usize);
    while bitboard != 0 {
        names.push(square_name(bitboard.trailing_zeros() as Square));
        bitboard &= bitboard - 1;
    }
    names
}
