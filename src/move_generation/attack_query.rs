//! Attack queries over a `GameState`.
//!
//! `attacked_by` builds the full attack union of one side; the move generator
//! reuses that union for castling, and `is_in_check` tests it against the
//! king. `is_square_attacked` answers for a single square by looking outward
//! from the target instead.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::leaper_masks::{king_mask, knight_mask, pawn_mask};
use crate::moves::magic_tables::{lookup_bishop, lookup_rook};

#[inline(always)]
pub const fn white_pawn_attacks(pawns: Bitboard) -> Bitboard {
    ((pawns & !FILE_A) << 7) | ((pawns & !FILE_H) << 9)
}

#[inline(always)]
pub const fn black_pawn_attacks(pawns: Bitboard) -> Bitboard {
    ((pawns & !FILE_A) >> 9) | ((pawns & !FILE_H) >> 7)
}

/// Squares attacked by a set of pawns of `color`.
#[inline(always)]
pub const fn pawn_attacks(color: Color, pawns: Bitboard) -> Bitboard {
    match color {
        Color::White => white_pawn_attacks(pawns),
        Color::Black => black_pawn_attacks(pawns),
    }
}

#[inline(always)]
pub fn knight_attacks(mut knights: Bitboard) -> Bitboard {
    let mut attacks = 0u64;
    while knights != 0 {
        attacks |= knight_mask(knights.trailing_zeros() as Square);
        knights &= knights - 1;
    }
    attacks
}

#[inline(always)]
pub fn king_attacks(kings: Bitboard) -> Bitboard {
    if kings == 0 {
        0
    } else {
        king_mask(kings.trailing_zeros() as Square)
    }
}

#[inline(always)]
pub fn bishop_attacks(mut bishops: Bitboard, my_occ: Bitboard, full_occ: Bitboard) -> Bitboard {
    let mut attacks = 0u64;
    while bishops != 0 {
        attacks |= lookup_bishop(bishops.trailing_zeros() as Square, my_occ, full_occ);
        bishops &= bishops - 1;
    }
    attacks
}

#[inline(always)]
pub fn rook_attacks(mut rooks: Bitboard, my_occ: Bitboard, full_occ: Bitboard) -> Bitboard {
    let mut attacks = 0u64;
    while rooks != 0 {
        attacks |= lookup_rook(rooks.trailing_zeros() as Square, my_occ, full_occ);
        rooks &= rooks - 1;
    }
    attacks
}

#[inline(always)]
pub fn queen_attacks(queens: Bitboard, my_occ: Bitboard, full_occ: Bitboard) -> Bitboard {
    bishop_attacks(queens, my_occ, full_occ) | rook_attacks(queens, my_occ, full_occ)
}

/// Every square `attacker` attacks, excluding squares holding its own pieces.
pub fn attacked_by(game_state: &GameState, attacker: Color) -> Bitboard {
    let my_occ = game_state.occupancy(attacker);
    let full_occ = game_state.occupancy_all();

    pawn_attacks(attacker, game_state.pieces(PieceKind::Pawn, attacker))
        | knight_attacks(game_state.pieces(PieceKind::Knight, attacker))
        | bishop_attacks(game_state.pieces(PieceKind::Bishop, attacker), my_occ, full_occ)
        | rook_attacks(game_state.pieces(PieceKind::Rook, attacker), my_occ, full_occ)
        | queen_attacks(game_state.pieces(PieceKind::Queen, attacker), my_occ, full_occ)
        | king_attacks(game_state.pieces(PieceKind::King, attacker))
}

/// True when `color`'s king stands on a square the opponent attacks.
///
/// After `make_move`, call this with the side that just moved to reject a
/// pseudo-legal move that left its own king en prise.
#[inline]
pub fn is_in_check(game_state: &GameState, color: Color) -> bool {
    attacked_by(game_state, color.opposite()) & game_state.pieces(PieceKind::King, color) != 0
}

/// True when any piece of `attacker` attacks `square`.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker: Color) -> bool {
    let full_occ = game_state.occupancy_all();
    let defender = attacker.opposite();

    // A pawn of `attacker` hits `square` exactly when a defender pawn on
    // `square` would hit the attacker's pawn.
    if pawn_mask(defender, square) & game_state.pieces(PieceKind::Pawn, attacker) != 0 {
        return true;
    }
    if knight_mask(square) & game_state.pieces(PieceKind::Knight, attacker) != 0 {
        return true;
    }
    if king_mask(square) & game_state.pieces(PieceKind::King, attacker) != 0 {
        return true;
    }

    let queens = game_state.pieces(PieceKind::Queen, attacker);
    let diagonal = game_state.pieces(PieceKind::Bishop, attacker) | queens;
    if lookup_bishop(square, 0, full_occ) & diagonal != 0 {
        return true;
    }
    let straight = game_state.pieces(PieceKind::Rook, attacker) | queens;
    lookup_rook(square, 0, full_occ) & straight != 0
}

/// Opposing pieces that attack `color`'s king.
pub fn checkers(game_state: &GameState, color: Color) -> Bitboard {
    let Some(king) = game_state.king_square(color) else {
        return 0;
    };
    let attacker = color.opposite();
    let full_occ = game_state.occupancy_all();
    let queens = game_state.pieces(PieceKind::Queen, attacker);

    (pawn_mask(color, king) & game_state.pieces(PieceKind::Pawn, attacker))
        | (knight_mask(king) & game_state.pieces(PieceKind::Knight, attacker))
        | (lookup_bishop(king, 0, full_occ)
            & (game_state.pieces(PieceKind::Bishop, attacker) | queens))
        | (lookup_rook(king, 0, full_occ) & (game_state.pieces(PieceKind::Rook, attacker) | queens))
}
