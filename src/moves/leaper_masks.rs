//! Leaper attack tables for pawns, knights and kings.
//!
//! Each entry is built by shifting a single-bit mask in the piece's fixed
//! directions. A shift that would wrap across the a/h file edge is masked off
//! first, and shifts past rank 1 or rank 8 fall off the word.

use crate::game_state::chess_types::*;

/// Pawn capture targets, white in `0..64`, black in `64..128`.
pub const PAWN_MASK: [Bitboard; 128] = generate_pawn_masks();
pub const KNIGHT_MASK: [Bitboard; 64] = generate_knight_masks();
pub const KING_MASK: [Bitboard; 64] = generate_king_masks();

#[inline]
pub const fn pawn_mask(color: Color, square: Square) -> Bitboard {
    PAWN_MASK[color.index() * 64 + square as usize]
}

#[inline]
pub const fn knight_mask(square: Square) -> Bitboard {
    KNIGHT_MASK[square as usize]
}

#[inline]
pub const fn king_mask(square: Square) -> Bitboard {
    KING_MASK[square as usize]
}

const fn generate_pawn_masks() -> [Bitboard; 128] {
    let mut table = [0u64; 128];
    let mut sq = 0usize;

    while sq < 64 {
        let from = 1u64 << sq;

        let white = from & !RANK_8;
        table[sq] = ((white & !FILE_A) << 7) | ((white & !FILE_H) << 9);

        let black = from & !RANK_1;
        table[64 + sq] = ((black & !FILE_A) >> 9) | ((black & !FILE_H) >> 7);

        sq += 1;
    }

    table
}

const fn generate_knight_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let from = 1u64 << sq;
        let not_a = from & !FILE_A;
        let not_h = from & !FILE_H;
        let not_ab = from & !(FILE_A | FILE_B);
        let not_gh = from & !(FILE_G | FILE_H);

        table[sq] = (not_a >> 17)
            | (not_a << 15)
            | (not_h >> 15)
            | (not_h << 17)
            | (not_ab >> 10)
            | (not_ab << 6)
            | (not_gh >> 6)
            | (not_gh << 10);
        sq += 1;
    }

    table
}

const fn generate_king_masks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let from = 1u64 << sq;
        let not_a = from & !FILE_A;
        let not_h = from & !FILE_H;

        table[sq] = (from >> 8)
            | (from << 8)
            | (not_a >> 9)
            | (not_a >> 1)
            | (not_a << 7)
            | (not_h >> 7)
            | (not_h << 1)
            | (not_h << 9);
        sq += 1;
    }

    table
}
