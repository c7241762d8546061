//! Zobrist hashing support for fast position identity.
//!
//! The keys are generated from a fixed seed so hashes are deterministic across
//! runs, which is useful for testing and debugging. The table is built once on
//! first use and is read-only afterwards, so it can be shared across threads.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

const ZOBRIST_SEED: u64 = 0x5F8C_9A72_D3B1_E4C7;

/// Slot used when no en-passant target is set.
const EN_PASSANT_NONE: usize = 8;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[u64; 64]; PIECE_COUNT],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant: [u64; 9],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[0u64; 64]; PIECE_COUNT];
    for piece in &mut piece_square {
        for key in piece.iter_mut() {
            *key = rng.random::<u64>();
        }
    }

    let side_to_move = rng.random::<u64>();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random::<u64>();
    }

    let mut en_passant = [0u64; 9];
    for key in &mut en_passant {
        *key = rng.random::<u64>();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant,
    }
}

/// Return the Zobrist key for a `(piece, square)` occupancy term.
#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    tables().piece_square[piece as usize][square as usize]
}

/// Return the Zobrist key contribution for castling rights mask (`0..=15`).
#[inline]
pub fn castling_key(castling_rights: CastlingRights) -> u64 {
    tables().castling[(castling_rights & 0x0F) as usize]
}

/// Return the key for an en-passant target bitboard; an empty target maps to
/// the dedicated "none" key.
#[inline]
pub fn en_passant_key(en_passant_target: Bitboard) -> u64 {
    let slot = if en_passant_target == 0 {
        EN_PASSANT_NONE
    } else {
        (en_passant_target.trailing_zeros() % 8) as usize
    };
    tables().en_passant[slot]
}

/// Return the side-to-move toggle key (xor in when black to move).
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position key from scratch.
///
/// Play never calls this; make/unmake maintain the key incrementally. It is
/// the reference the incremental key is audited against.
pub fn compute_zobrist_key(game_state: &GameState) -> u64 {
    let mut key = 0u64;

    for piece in 0..PIECE_COUNT as Piece {
        let mut bb = game_state.piece_bb(piece);
        while bb != 0 {
            let sq = bb.trailing_zeros() as Square;
            key ^= piece_square_key(piece, sq);
            bb &= bb - 1;
        }
    }

    if game_state.side_to_move() == Color::Black {
        key ^= side_to_move_key();
    }

    key ^= castling_key(game_state.castling_rights());
    key ^= en_passant_key(game_state.en_passant_target());

    key
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn play(game: &mut GameState, moves: &[&str]) {
        for text in moves {
            let mv = long_algebraic_to_move(text, game).expect("move should resolve");
            game.make_move(mv);
        }
    }

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = GameState::new_game();
        let b = GameState::new_game();
        let c = GameState::from_fen(crate::game_state::chess_rules::STARTING_POSITION_FEN)
            .expect("FEN should parse");
        assert_eq!(a.zobrist_key(), b.zobrist_key());
        assert_eq!(a.zobrist_key(), c.zobrist_key());
        assert_eq!(a.zobrist_key(), compute_zobrist_key(&a));
    }

    #[test]
    fn side_to_move_changes_hash() {
        let w = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").expect("FEN should parse");
        assert_ne!(w.zobrist_key(), b.zobrist_key());
    }

    #[test]
    fn castling_rights_change_hash() {
        let with_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("FEN should parse");
        let without_rights =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").expect("FEN should parse");
        let kingside_only =
            GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w K - 0 1").expect("FEN should parse");
        assert_ne!(with_rights.zobrist_key(), without_rights.zobrist_key());
        assert_ne!(with_rights.zobrist_key(), kingside_only.zobrist_key());
    }

    #[test]
    fn en_passant_target_changes_hash() {
        let no_ep =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let ep = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        assert_ne!(no_ep.zobrist_key(), ep.zobrist_key());
    }

    #[test]
    fn piece_placement_changes_hash() {
        let a = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        let b = GameState::from_fen("4k3/8/8/8/8/8/3P4/4K3 w - - 0 1").expect("FEN should parse");
        assert_ne!(a.zobrist_key(), b.zobrist_key());
    }

    #[test]
    fn played_position_matches_imported_position() {
        let mut game = GameState::new_game();
        play(&mut game, &["e2e4"]);
        let imported = GameState::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .expect("FEN should parse");
        assert_eq!(game.zobrist_key(), imported.zobrist_key());
        assert_eq!(game.zobrist_key(), compute_zobrist_key(&game));
    }

    #[test]
    fn knight_shuffle_transposes_back_to_start() {
        let start = GameState::new_game();
        let mut game = GameState::new_game();
        play(&mut game, &["g1f3", "g8f6", "f3g1", "f6g8"]);
        assert_eq!(game.zobrist_key(), start.zobrist_key());
    }
}
