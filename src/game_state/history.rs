use crate::game_state::chess_rules::MAX_GAME_LENGTH;
use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::{Move, NULL_MOVE};

/// Per-ply snapshots pushed by `make_move` and consumed by `unmake_move`.
///
/// Stored as parallel fixed arrays indexed by ply. Entries at or above the
/// current ply are stale and carry no meaning.
#[derive(Debug, Clone)]
pub struct History {
    pub zobrist_key: [u64; MAX_GAME_LENGTH],
    pub castling_rights: [CastlingRights; MAX_GAME_LENGTH],
    pub en_passant_target: [Bitboard; MAX_GAME_LENGTH],
    pub captured_piece: [Piece; MAX_GAME_LENGTH],
    pub halfmove_clock: [u16; MAX_GAME_LENGTH],
    pub fullmove_number: [u16; MAX_GAME_LENGTH],
    pub moves: [Move; MAX_GAME_LENGTH],
}

impl History {
    pub fn new_boxed() -> Box<Self> {
        Box::new(Self {
            zobrist_key: [0; MAX_GAME_LENGTH],
            castling_rights: [0; MAX_GAME_LENGTH],
            en_passant_target: [0; MAX_GAME_LENGTH],
            captured_piece: [NO_PIECE; MAX_GAME_LENGTH],
            halfmove_clock: [0; MAX_GAME_LENGTH],
            fullmove_number: [0; MAX_GAME_LENGTH],
            moves: [NULL_MOVE; MAX_GAME_LENGTH],
        })
    }

    /// True when the first `ply` entries of both stacks agree.
    pub fn same_prefix(&self, other: &Self, ply: usize) -> bool {
        self.zobrist_key[..ply] == other.zobrist_key[..ply]
            && self.castling_rights[..ply] == other.castling_rights[..ply]
            && self.en_passant_target[..ply] == other.en_passant_target[..ply]
            && self.captured_piece[..ply] == other.captured_piece[..ply]
            && self.halfmove_clock[..ply] == other.halfmove_clock[..ply]
            && self.fullmove_number[..ply] == other.fullmove_number[..ply]
            && self.moves[..ply] == other.moves[..ply]
    }
}
