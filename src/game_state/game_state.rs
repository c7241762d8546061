//! Core incremental board state representation.
//!
//! `GameState` stores one bitboard per piece, a square-to-piece mailbox kept
//! in lockstep with those bitboards, per-side occupancy, rights and clocks,
//! and the Zobrist key. Every mutation goes through the placement primitives
//! below so the mailbox, bitboards, occupancy and key can never drift apart.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::BACK_RANK_LAYOUT;
use crate::game_state::chess_types::*;
use crate::game_state::history::History;
use crate::moves::move_descriptions::Move;
use crate::search::zobrist::{
    castling_key, compute_zobrist_key, en_passant_key, piece_square_key, side_to_move_key,
};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

/// Incremental game state optimized for fast move making/unmaking.
#[derive(Debug, Clone)]
pub struct GameState {
    // --- Bitboard representation ---
    pub(crate) piece_bb: [Bitboard; PIECE_COUNT],
    pub(crate) mailbox: [Piece; 64],
    pub(crate) occupancy_by_color: [Bitboard; 2],

    // --- Side and state flags ---
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Bitboard,

    // --- Clocks / move counters ---
    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    // --- Incremental hashing ---
    pub(crate) zobrist_key: u64,

    // --- Make/unmake stack ---
    pub(crate) ply: usize,
    pub(crate) history: Box<History>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            piece_bb: [0; PIECE_COUNT],
            mailbox: [NO_PIECE; 64],
            occupancy_by_color: [0; 2],

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_target: 0,

            halfmove_clock: 0,
            fullmove_number: 1,

            zobrist_key: castling_key(0) ^ en_passant_key(0),

            ply: 0,
            history: History::new_boxed(),
        }
    }
}

/// Two states are equal when the positions, counters and every live history
/// entry agree. Stale slots above the ply are ignored.
impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.piece_bb == other.piece_bb
            && self.mailbox == other.mailbox
            && self.occupancy_by_color == other.occupancy_by_color
            && self.side_to_move == other.side_to_move
            && self.castling_rights == other.castling_rights
            && self.en_passant_target == other.en_passant_target
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
            && self.zobrist_key == other.zobrist_key
            && self.ply == other.ply
            && self.history.same_prefix(&other.history, self.ply)
    }
}

impl Eq for GameState {}

impl GameState {
    /// Empty board, white to move, no rights.
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, placed square by square.
    pub fn new_game() -> Self {
        let mut game_state = Self::new_empty();

        for (file, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
            let file = file as Square;
            game_state.put_piece(make_piece(*kind, Color::White), file);
            game_state.put_piece(make_piece(PieceKind::Pawn, Color::White), 8 + file);
            game_state.put_piece(make_piece(PieceKind::Pawn, Color::Black), 48 + file);
            game_state.put_piece(make_piece(*kind, Color::Black), 56 + file);
        }
        game_state.set_castling_rights(CASTLE_ALL);

        game_state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    // --- Placement primitives (shared by setters and make/unmake) ---

    #[inline(always)]
    pub(crate) fn add_piece(&mut self, piece: Piece, square: Square) {
        let bb = square_bb(square);
        self.piece_bb[piece as usize] |= bb;
        self.occupancy_by_color[piece_color(piece).index()] |= bb;
        self.mailbox[square as usize] = piece;
        self.zobrist_key ^= piece_square_key(piece, square);
    }

    /// Take whatever stands on `square` off the board and return it.
    #[inline(always)]
    pub(crate) fn remove_piece(&mut self, square: Square) -> Piece {
        let piece = self.mailbox[square as usize];
        let bb = square_bb(square);
        self.piece_bb[piece as usize] &= !bb;
        self.occupancy_by_color[piece_color(piece).index()] &= !bb;
        self.mailbox[square as usize] = NO_PIECE;
        self.zobrist_key ^= piece_square_key(piece, square);
        piece
    }

    /// Slide the piece on `from` to the empty square `to`.
    #[inline(always)]
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.mailbox[from as usize];
        let from_to = square_bb(from) | square_bb(to);
        self.piece_bb[piece as usize] ^= from_to;
        self.occupancy_by_color[piece_color(piece).index()] ^= from_to;
        self.mailbox[from as usize] = NO_PIECE;
        self.mailbox[to as usize] = piece;
        self.zobrist_key ^= piece_square_key(piece, from) ^ piece_square_key(piece, to);
    }

    // --- Setters (position import) ---

    /// Reset to an empty board and drop all history.
    pub fn clear(&mut self) {
        *self = Self::new_empty();
    }

    /// Place `piece` on `square`, replacing any occupant.
    pub fn put_piece(&mut self, piece: Piece, square: Square) {
        assert!((piece as usize) < PIECE_COUNT, "put_piece with invalid piece id {piece}");
        if self.mailbox[square as usize] != NO_PIECE {
            self.remove_piece(square);
        }
        self.add_piece(piece, square);
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        if self.side_to_move != color {
            self.zobrist_key ^= side_to_move_key();
            self.side_to_move = color;
        }
    }

    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        let rights = rights & CASTLE_ALL;
        self.zobrist_key ^= castling_key(self.castling_rights) ^ castling_key(rights);
        self.castling_rights = rights;
    }

    pub fn set_en_passant_target(&mut self, square: Option<Square>) {
        let target = square.map_or(0, square_bb);
        self.zobrist_key ^= en_passant_key(self.en_passant_target) ^ en_passant_key(target);
        self.en_passant_target = target;
    }

    pub fn set_halfmove_clock(&mut self, halfmove_clock: u16) {
        self.halfmove_clock = halfmove_clock;
    }

    pub fn set_fullmove_number(&mut self, fullmove_number: u16) {
        self.fullmove_number = fullmove_number;
    }

    // --- Getters ---

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.mailbox[square as usize]
    }

    #[inline]
    pub fn piece_bb(&self, piece: Piece) -> Bitboard {
        self.piece_bb[piece as usize]
    }

    #[inline]
    pub fn pieces(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.piece_bb[make_piece(kind, color) as usize]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_by_color[0] | self.occupancy_by_color[1]
    }

    /// Square of `color`'s king, or `None` on a board without one.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces(PieceKind::King, color);
        (kings != 0).then(|| kings.trailing_zeros() as Square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Bitboard {
        self.en_passant_target
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        (self.en_passant_target != 0).then(|| self.en_passant_target.trailing_zeros() as Square)
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    /// Plies made since construction or the last `clear`.
    #[inline]
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Most recently made move that has not been unmade.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.ply.checked_sub(1).map(|top| self.history.moves[top])
    }

    /// Audit every board invariant.
    ///
    /// The hot path never calls this; tests and tooling do after long random
    /// sequences of make/unmake.
    pub fn validate(&self) -> ChessResult<()> {
        let mut union = 0u64;
        for piece in 0..PIECE_COUNT as Piece {
            let bb = self.piece_bb[piece as usize];
            if union & bb != 0 {
                return Err(violation(format!(
                    "piece {piece} overlaps another piece bitboard"
                )));
            }
            union |= bb;
        }

        for sq in 0..64u8 {
            let piece = self.mailbox[sq as usize];
            let bit = square_bb(sq);
            if piece == NO_PIECE {
                if union & bit != 0 {
                    return Err(violation(format!("mailbox empty on {sq} but a bitboard is set")));
                }
            } else if self.piece_bb.get(piece as usize).map_or(true, |bb| bb & bit == 0) {
                return Err(violation(format!(
                    "mailbox holds {piece} on {sq} without the matching bitboard bit"
                )));
            }
        }

        let [white, black] = self.occupancy_by_color;
        if white & black != 0 {
            return Err(violation("white and black occupancy overlap".to_owned()));
        }
        for color in [Color::White, Color::Black] {
            let expected = ALL_PIECE_KINDS
                .iter()
                .fold(0u64, |acc, kind| acc | self.pieces(*kind, color));
            if self.occupancy(color) != expected {
                return Err(violation(format!("{color:?} occupancy does not match its pieces")));
            }
        }

        if self.en_passant_target.count_ones() > 1 {
            return Err(violation("en-passant target has more than one bit".to_owned()));
        }
        if self.castling_rights & !CASTLE_ALL != 0 {
            return Err(violation("castling rights outside the low four bits".to_owned()));
        }
        if self.zobrist_key != compute_zobrist_key(self) {
            return Err(violation("zobrist key differs from full recomputation".to_owned()));
        }

        Ok(())
    }
}

fn violation(detail: String) -> ChessError {
    ChessError::InvariantViolation(detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn new_game_matches_starting_fen() {
        let built = GameState::new_game();
        let parsed = GameState::from_fen(STARTING_POSITION_FEN).expect("FEN should parse");
        assert_eq!(built, parsed);
        assert_eq!(built.get_fen(), STARTING_POSITION_FEN);
        built.validate().expect("start position should be consistent");
    }

    #[test]
    fn starting_position_piece_layout() {
        let game = GameState::new_game();
        assert_eq!(game.piece_at(E1), W_KING);
        assert_eq!(game.piece_at(D8), B_QUEEN);
        assert_eq!(game.piece_at(27), NO_PIECE);
        assert_eq!(game.pieces(PieceKind::Pawn, Color::White), RANK_2);
        assert_eq!(game.occupancy(Color::Black), RANK_8 | (RANK_8 >> 8));
        assert_eq!(game.occupancy_all().count_ones(), 32);
        assert_eq!(game.king_square(Color::Black), Some(E8));
        assert_eq!(game.castling_rights(), CASTLE_ALL);
        assert_eq!(game.last_move(), None);
    }

    #[test]
    fn put_piece_replaces_occupant() {
        let mut game = GameState::new_empty();
        game.put_piece(W_ROOK, 27);
        game.put_piece(B_KNIGHT, 27);
        assert_eq!(game.piece_at(27), B_KNIGHT);
        assert_eq!(game.piece_bb(W_ROOK), 0);
        assert_eq!(game.occupancy(Color::White), 0);
        game.validate().expect("replacement should keep the board consistent");
    }

    #[test]
    fn setters_keep_hash_consistent() {
        let mut game = GameState::new_empty();
        game.put_piece(W_KING, E1);
        game.put_piece(B_KING, E8);
        game.set_side_to_move(Color::Black);
        game.set_castling_rights(CASTLE_BLACK_KINGSIDE);
        game.set_en_passant_target(Some(20));
        game.validate().expect("setters should maintain the key");

        game.set_en_passant_target(None);
        game.set_side_to_move(Color::White);
        game.set_castling_rights(0);
        game.validate().expect("setters should maintain the key");
    }

    #[test]
    fn validate_catches_a_desynchronized_mailbox() {
        let mut game = GameState::new_game();
        game.mailbox[27] = W_QUEEN;
        assert!(matches!(game.validate(), Err(ChessError::InvariantViolation(_))));
    }

    #[test]
    fn validate_catches_a_stale_hash() {
        let mut game = GameState::new_game();
        game.zobrist_key ^= 1;
        assert!(matches!(game.validate(), Err(ChessError::InvariantViolation(_))));
    }

    #[test]
    fn clear_resets_everything() {
        let mut game = GameState::new_game();
        game.clear();
        assert_eq!(game, GameState::new_empty());
    }
}
