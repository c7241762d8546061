//! Pseudo-legal move generation.
//!
//! Moves are emitted without checking whether they leave the mover's king
//! attacked. Callers follow make, `is_in_check` on the side that moved, and
//! unmake when the move turns out illegal.

use std::ops::Deref;

use crate::game_state::chess_rules::MAX_MOVES;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::attack_query::attacked_by;
use crate::moves::leaper_masks::{king_mask, knight_mask, pawn_mask};
use crate::moves::magic_tables::{lookup_bishop, lookup_rook};
use crate::moves::move_descriptions::*;

/// Fixed-capacity move buffer, filled in place without allocating.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    #[inline]
    pub const fn new() -> Self {
        Self {
            moves: [NULL_MOVE; MAX_MOVES],
            len: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, mv: Move) {
        assert!(self.len < MAX_MOVES, "move list overflow past {MAX_MOVES} moves");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MoveList {
    type Target = [Move];

    #[inline]
    fn deref(&self) -> &[Move] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|mv| move_to_long_algebraic(*mv)))
            .finish()
    }
}

pub trait MoveGenerator {
    /// Append every pseudo-legal move for the side to move to `out`.
    fn generate_moves_into(&self, game_state: &GameState, out: &mut MoveList);

    fn generate_moves(&self, game_state: &GameState) -> MoveList {
        let mut out = MoveList::new();
        self.generate_moves_into(game_state, &mut out);
        out
    }
}

/// Table-driven generator over the magic and leaper attack tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicMoveGenerator;

impl MoveGenerator for MagicMoveGenerator {
    #[inline]
    fn generate_moves_into(&self, game_state: &GameState, out: &mut MoveList) {
        generate_moves_into(game_state, out);
    }
}

#[inline]
pub fn generate_moves(game_state: &GameState) -> MoveList {
    let mut out = MoveList::new();
    generate_moves_into(game_state, &mut out);
    out
}

/// Clears `out` and fills it with the pseudo-legal moves of `game_state`.
pub fn generate_moves_into(game_state: &GameState, out: &mut MoveList) {
    out.clear();

    let side = game_state.side_to_move();
    let my_occ = game_state.occupancy(side);
    let opp_occ = game_state.occupancy(side.opposite());
    let full_occ = my_occ | opp_occ;

    generate_pawn_moves(game_state, out, side, opp_occ, full_occ);

    add_piece_moves(game_state.pieces(PieceKind::Knight, side), opp_occ, out, |from| {
        knight_mask(from) & !my_occ
    });
    add_piece_moves(game_state.pieces(PieceKind::Bishop, side), opp_occ, out, |from| {
        lookup_bishop(from, my_occ, full_occ)
    });
    add_piece_moves(game_state.pieces(PieceKind::Rook, side), opp_occ, out, |from| {
        lookup_rook(from, my_occ, full_occ)
    });
    add_piece_moves(game_state.pieces(PieceKind::Queen, side), opp_occ, out, |from| {
        lookup_bishop(from, my_occ, full_occ) | lookup_rook(from, my_occ, full_occ)
    });

    generate_king_moves(game_state, out, side, my_occ, opp_occ, full_occ);
}

/// Emit one move per target for every piece in `pieces`.
#[inline(always)]
fn add_piece_moves<F>(mut pieces: Bitboard, opp_occ: Bitboard, out: &mut MoveList, targets: F)
where
    F: Fn(Square) -> Bitboard,
{
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        add_targets(from, targets(from), opp_occ, out);
        pieces &= pieces - 1;
    }
}

#[inline(always)]
fn add_targets(from: Square, mut targets: Bitboard, opp_occ: Bitboard, out: &mut MoveList) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let kind = if opp_occ & square_bb(to) != 0 {
            FLAG_CAPTURE
        } else {
            MoveKind::Quiet.bits()
        };
        out.push(encode_move_bits(from, to, kind));
        targets &= targets - 1;
    }
}

fn generate_pawn_moves(
    game_state: &GameState,
    out: &mut MoveList,
    side: Color,
    opp_occ: Bitboard,
    full_occ: Bitboard,
) {
    let en_passant_target = game_state.en_passant_target();
    let (start_rank, promotion_rank) = match side {
        Color::White => (RANK_2, RANK_8),
        Color::Black => (RANK_7, RANK_1),
    };
    let forward = |bb: Bitboard| match side {
        Color::White => bb << 8,
        Color::Black => bb >> 8,
    };

    let mut pawns = game_state.pieces(PieceKind::Pawn, side);
    while pawns != 0 {
        let from_bb = pawns & pawns.wrapping_neg();
        let from = from_bb.trailing_zeros() as Square;

        let mut targets = forward(from_bb) & !full_occ;
        targets |= forward(forward(from_bb & start_rank) & targets) & !full_occ;
        let attacks = pawn_mask(side, from) & (opp_occ | en_passant_target);
        targets |= attacks;

        while targets != 0 {
            let to_bb = targets & targets.wrapping_neg();
            let to = to_bb.trailing_zeros() as Square;

            let mut kind = MoveKind::Quiet.bits();
            if to_bb & opp_occ != 0 {
                kind |= FLAG_CAPTURE;
            }
            if to_bb & attacks & en_passant_target != 0 {
                kind |= MoveKind::EnPassant.bits();
            }
            if forward(forward(from_bb)) == to_bb {
                kind |= MoveKind::DoublePawnPush.bits();
            }

            if to_bb & promotion_rank != 0 {
                for piece_bits in 0..4u8 {
                    out.push(encode_move_bits(from, to, kind | FLAG_PROMOTION | piece_bits));
                }
            } else {
                out.push(encode_move_bits(from, to, kind));
            }

            targets &= targets - 1;
        }

        pawns &= pawns - 1;
    }
}

fn generate_king_moves(
    game_state: &GameState,
    out: &mut MoveList,
    side: Color,
    my_occ: Bitboard,
    opp_occ: Bitboard,
    full_occ: Bitboard,
) {
    let Some(from) = game_state.king_square(side) else {
        return;
    };
    add_targets(from, king_mask(from) & !my_occ, opp_occ, out);

    let (kingside, queenside, home) = match side {
        Color::White => (CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE, E1),
        Color::Black => (CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, E8),
    };
    let rights = game_state.castling_rights();
    if rights & (kingside | queenside) == 0 || from != home {
        return;
    }

    // One opposing attack union covers the king's square and both paths.
    let opp_attacks = attacked_by(game_state, side.opposite());
    if opp_attacks & square_bb(from) != 0 {
        return;
    }
    let rook = make_piece(PieceKind::Rook, side);

    if rights & kingside != 0 && game_state.piece_at(from + 3) == rook {
        let path = square_bb(from + 1) | square_bb(from + 2);
        if path & (full_occ | opp_attacks) == 0 {
            out.push(encode_move(from, from + 2, MoveKind::KingCastle));
        }
    }

    if rights & queenside != 0 && game_state.piece_at(from - 4) == rook {
        let king_path = square_bb(from - 1) | square_bb(from - 2);
        let rook_only = square_bb(from - 3);
        if (king_path & (full_occ | opp_attacks)) | (rook_only & full_occ) == 0 {
            out.push(encode_move(from, from - 2, MoveKind::QueenCastle));
        }
    }
}
