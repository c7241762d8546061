//! Sliding-piece geometry: relevant blocker masks, ray-walk attack generation
//! and blocker subset enumeration.
//!
//! Everything here is slow and exact. It is used to fill the dense magic
//! tables and to verify magic candidates; the move generator never calls the
//! ray walkers directly.

use crate::game_state::chess_types::*;

/// Sliding piece family, selecting rook or bishop geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    Bishop,
    Rook,
}

impl Slider {
    pub const fn name(self) -> &'static str {
        match self {
            Slider::Bishop => "bishop",
            Slider::Rook => "rook",
        }
    }

    #[inline]
    pub const fn blocker_mask(self, square: Square) -> Bitboard {
        match self {
            Slider::Bishop => BISHOP_BLOCKER_MASK[square as usize],
            Slider::Rook => ROOK_BLOCKER_MASK[square as usize],
        }
    }

    #[inline]
    pub const fn attacks_on_the_fly(self, square: Square, blockers: Bitboard) -> Bitboard {
        match self {
            Slider::Bishop => bishop_attacks_on_the_fly(square, blockers),
            Slider::Rook => rook_attacks_on_the_fly(square, blockers),
        }
    }
}

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Squares whose occupancy can change a rook's attacks. The last square of
/// each ray is left out because nothing lies beyond it.
pub const ROOK_BLOCKER_MASK: [Bitboard; 64] = generate_blocker_masks(&ROOK_DIRECTIONS);

/// Bishop counterpart of [`ROOK_BLOCKER_MASK`].
pub const BISHOP_BLOCKER_MASK: [Bitboard; 64] = generate_blocker_masks(&BISHOP_DIRECTIONS);

const fn on_board(rank: i8, file: i8) -> bool {
    rank >= 0 && rank < 8 && file >= 0 && file < 8
}

const fn generate_blocker_masks(directions: &[(i8, i8); 4]) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as i8;
        let file = (sq % 8) as i8;
        let mut mask = 0u64;
        let mut d = 0usize;

        while d < 4 {
            let (dr, df) = directions[d];
            let mut r = rank + dr;
            let mut f = file + df;
            // Stop one short of the edge: the next step must still be on board.
            while on_board(r + dr, f + df) {
                mask |= 1u64 << (r * 8 + f);
                r += dr;
                f += df;
            }
            d += 1;
        }

        table[sq] = mask;
        sq += 1;
    }

    table
}

const fn attacks_on_the_fly(square: Square, blockers: Bitboard, directions: &[(i8, i8); 4]) -> Bitboard {
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    let mut attacks = 0u64;
    let mut d = 0usize;

    while d < 4 {
        let (dr, df) = directions[d];
        let mut r = rank + dr;
        let mut f = file + df;
        while on_board(r, f) {
            let bit = 1u64 << (r * 8 + f);
            attacks |= bit;
            if blockers & bit != 0 {
                break;
            }
            r += dr;
            f += df;
        }
        d += 1;
    }

    attacks
}

/// Rook attacks from `square`, stopping on (and including) the first blocker
/// in each direction.
pub const fn rook_attacks_on_the_fly(square: Square, blockers: Bitboard) -> Bitboard {
    attacks_on_the_fly(square, blockers, &ROOK_DIRECTIONS)
}

pub const fn bishop_attacks_on_the_fly(square: Square, blockers: Bitboard) -> Bitboard {
    attacks_on_the_fly(square, blockers, &BISHOP_DIRECTIONS)
}

/// Every subset of a mask, starting at the empty set.
///
/// Uses the carry-rippler step `(subset - mask) & mask`, which walks all
/// `2^popcount(mask)` subsets and wraps back to zero.
#[derive(Debug, Clone)]
pub struct BlockerSubsets {
    mask: Bitboard,
    next: Bitboard,
    done: bool,
}

impl BlockerSubsets {
    pub fn new(mask: Bitboard) -> Self {
        Self {
            mask,
            next: 0,
            done: false,
        }
    }
}

impl Iterator for BlockerSubsets {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        if self.done {
            return None;
        }
        let subset = self.next;
        self.next = subset.wrapping_sub(self.mask) & self.mask;
        if self.next == 0 {
            self.done = true;
        }
        Some(subset)
    }
}
