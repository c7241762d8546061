//! Canonical chess-rule constants.
//!
//! Static rule data shared by state setup, make/unmake and move generation:
//! the starting layout, capacity limits, and the per-square castling masks.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Capacity of the make/unmake history stacks, in plies.
pub const MAX_GAME_LENGTH: usize = 1024;

/// Upper bound on pseudo-legal moves from any reachable position.
pub const MAX_MOVES: usize = 256;

/// Castling rights are ANDed with the entries for a move's from- and to-square.
///
/// Only the king and rook home squares clear anything, so touching one of them
/// (moving from it, or capturing onto it) drops the matching rights.
pub const CASTLING_MASK_BY_SQUARE: [CastlingRights; 64] = [
    0xE, 0xF, 0xF, 0xF, 0xC, 0xF, 0xF, 0xD, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, 0xF, //
    0xB, 0xF, 0xF, 0xF, 0x3, 0xF, 0xF, 0x7, //
];

/// Back-rank layout shared by both sides, a-file first.
pub const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];
