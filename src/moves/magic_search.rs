//! Offline magic number search.
//!
//! A Las Vegas search: draw sparse random candidates until one maps every
//! blocker subset of a square to a distinct slot. Run once through the
//! `magic_finder` binary; the results are pasted into
//! [`crate::moves::magic_tables`].

use rand::Rng;
use tracing::{debug, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::moves::magic_tables::magic_index;
use crate::moves::slider_masks::{BlockerSubsets, Slider};

/// Default bound used by the finder binary.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 100_000_000;

/// AND of three draws. Few set bits hash blocker sets far better than a
/// uniform word.
#[inline]
pub fn sparse_candidate<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}

/// Reusable scratch for collision checks. Slots are stamped with the attempt
/// number so the buffer never needs clearing between candidates.
struct SlotStamps {
    stamps: Vec<u64>,
    attempt: u64,
}

impl SlotStamps {
    fn new(slots: usize) -> Self {
        Self {
            stamps: vec![0; slots],
            attempt: 0,
        }
    }

    fn accepts(&mut self, subsets: &[Bitboard], magic: u64, mask: Bitboard) -> bool {
        self.attempt += 1;
        for &blockers in subsets {
            let slot = &mut self.stamps[magic_index(blockers, magic, mask)];
            if *slot == self.attempt {
                return false;
            }
            *slot = self.attempt;
        }
        true
    }
}

/// True when `magic` sends every subset of `mask` to its own index.
pub fn is_collision_free(magic: u64, mask: Bitboard) -> bool {
    let subsets: Vec<Bitboard> = BlockerSubsets::new(mask).collect();
    SlotStamps::new(subsets.len()).accepts(&subsets, magic, mask)
}

/// Search for a collision-free magic for one slider on one square.
pub fn find_magic<R: Rng + ?Sized>(
    slider: Slider,
    square: Square,
    rng: &mut R,
    max_attempts: u64,
) -> ChessResult<u64> {
    let mask = slider.blocker_mask(square);
    let subsets: Vec<Bitboard> = BlockerSubsets::new(mask).collect();
    let mut stamps = SlotStamps::new(subsets.len());

    for attempt in 1..=max_attempts {
        let candidate = sparse_candidate(rng);
        if stamps.accepts(&subsets, candidate, mask) {
            debug!(
                slider = slider.name(),
                square,
                attempt,
                magic = %format!("{candidate:#018X}"),
                "found magic"
            );
            return Ok(candidate);
        }
    }

    warn!(slider = slider.name(), square, max_attempts, "magic search exhausted");
    Err(ChessError::MagicSearchExhausted {
        square,
        attempts: max_attempts,
    })
}

/// Magics for all 64 squares, in square order.
pub fn find_all_magics<R: Rng + ?Sized>(
    slider: Slider,
    rng: &mut R,
    max_attempts: u64,
) -> ChessResult<[u64; 64]> {
    let mut magics = [0u64; 64];
    for square in 0..64u8 {
        magics[square as usize] = find_magic(slider, square, rng, max_attempts)?;
    }
    Ok(magics)
}

/// Render a table as a Rust constant, four entries per line.
pub fn format_magic_table(name: &str, magics: &[u64; 64]) -> String {
    let mut out = format!("pub const {name}: [u64; 64] = [\n");
    for row in magics.chunks(4) {
        out.push_str("    ");
        let cells: Vec<String> = row.iter().map(|m| format!("0x{m:016X},")).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out.push_str("];\n");
    out
}
