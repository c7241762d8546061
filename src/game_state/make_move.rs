//! Make/unmake protocol.
//!
//! `make_move` pushes a snapshot onto the history stacks, applies the move
//! through the placement primitives and patches the Zobrist key as it goes.
//! `unmake_move` runs the inverse handler and restores the snapshot verbatim.
//! Calls must nest like a stack.

use crate::game_state::chess_rules::{CASTLING_MASK_BY_SQUARE, MAX_GAME_LENGTH};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::*;
use crate::search::zobrist::{castling_key, en_passant_key, side_to_move_key};

/// Square of the pawn removed by an en-passant capture landing on `to`.
#[inline(always)]
const fn en_passant_victim_square(to: Square, mover: Color) -> Square {
    match mover {
        Color::White => to - 8,
        Color::Black => to + 8,
    }
}

/// Rook origin and destination for a castle whose king lands on `to`.
#[inline(always)]
const fn castle_rook_squares(kind: MoveKind, to: Square) -> (Square, Square) {
    match kind {
        MoveKind::KingCastle => (to + 1, to - 1),
        _ => (to - 2, to + 1),
    }
}

impl GameState {
    /// Apply a pseudo-legal move for the side to move.
    ///
    /// Panics when the history is full, when the move's kind tag is
    /// unassigned, or when the board contradicts the move (nothing on the
    /// origin, a capture onto an empty square, castling without the rook).
    pub fn make_move(&mut self, mv: Move) {
        assert!(
            self.ply < MAX_GAME_LENGTH,
            "make_move past the history capacity of {MAX_GAME_LENGTH} plies"
        );

        let from = move_from(mv);
        let to = move_to(mv);
        let kind = move_kind(mv);
        let us = self.side_to_move;
        let moving = self.mailbox[from as usize];
        assert!(
            moving != NO_PIECE,
            "make_move {} from an empty square",
            move_to_long_algebraic(mv)
        );

        let ply = self.ply;
        self.history.zobrist_key[ply] = self.zobrist_key;
        self.history.castling_rights[ply] = self.castling_rights;
        self.history.en_passant_target[ply] = self.en_passant_target;
        self.history.halfmove_clock[ply] = self.halfmove_clock;
        self.history.fullmove_number[ply] = self.fullmove_number;
        self.history.moves[ply] = mv;

        self.zobrist_key ^= side_to_move_key()
            ^ castling_key(self.castling_rights)
            ^ en_passant_key(self.en_passant_target);
        self.en_passant_target = 0;

        let captured = match kind {
            MoveKind::Quiet => {
                self.move_piece(from, to);
                NO_PIECE
            }
            MoveKind::DoublePawnPush => {
                self.move_piece(from, to);
                self.en_passant_target = square_bb(en_passant_victim_square(to, us));
                NO_PIECE
            }
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                let (rook_from, rook_to) = castle_rook_squares(kind, to);
                assert!(
                    self.mailbox[rook_from as usize] == make_piece(PieceKind::Rook, us),
                    "castling {} without a rook on {rook_from}",
                    move_to_long_algebraic(mv)
                );
                self.move_piece(from, to);
                self.move_piece(rook_from, rook_to);
                NO_PIECE
            }
            MoveKind::Capture => {
                let captured = self.take_captured(to, mv);
                self.move_piece(from, to);
                captured
            }
            MoveKind::EnPassant => {
                let captured = self.take_captured(en_passant_victim_square(to, us), mv);
                self.move_piece(from, to);
                captured
            }
            _ => {
                let captured = if kind.is_capture() {
                    self.take_captured(to, mv)
                } else {
                    NO_PIECE
                };
                let promoted = promoted_piece(kind, us).unwrap_or(NO_PIECE);
                self.remove_piece(from);
                self.add_piece(promoted, to);
                captured
            }
        };
        self.history.captured_piece[ply] = captured;

        self.zobrist_key ^= en_passant_key(self.en_passant_target);

        self.castling_rights &= CASTLING_MASK_BY_SQUARE[from as usize] & CASTLING_MASK_BY_SQUARE[to as usize];
        self.zobrist_key ^= castling_key(self.castling_rights);

        if piece_kind(moving) == Some(PieceKind::Pawn) || captured != NO_PIECE {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = us.opposite();
        self.ply += 1;
    }

    /// Undo the most recent `make_move`.
    ///
    /// Panics when there is nothing to undo.
    pub fn unmake_move(&mut self) {
        assert!(self.ply > 0, "unmake_move with empty history");

        self.ply -= 1;
        let ply = self.ply;
        let us = self.side_to_move.opposite();
        self.side_to_move = us;

        let mv = self.history.moves[ply];
        let captured = self.history.captured_piece[ply];
        let from = move_from(mv);
        let to = move_to(mv);
        let kind = move_kind(mv);

        match kind {
            MoveKind::Quiet | MoveKind::DoublePawnPush => self.move_piece(to, from),
            MoveKind::KingCastle | MoveKind::QueenCastle => {
                let (rook_from, rook_to) = castle_rook_squares(kind, to);
                self.move_piece(to, from);
                self.move_piece(rook_to, rook_from);
            }
            MoveKind::Capture => {
                self.move_piece(to, from);
                self.add_piece(captured, to);
            }
            MoveKind::EnPassant => {
                self.move_piece(to, from);
                self.add_piece(captured, en_passant_victim_square(to, us));
            }
            _ => {
                self.remove_piece(to);
                self.add_piece(make_piece(PieceKind::Pawn, us), from);
                if kind.is_capture() {
                    self.add_piece(captured, to);
                }
            }
        }

        // The primitives above toggled piece keys; the snapshot supersedes them.
        self.zobrist_key = self.history.zobrist_key[ply];
        self.castling_rights = self.history.castling_rights[ply];
        self.en_passant_target = self.history.en_passant_target[ply];
        self.halfmove_clock = self.history.halfmove_clock[ply];
        self.fullmove_number = self.history.fullmove_number[ply];
    }

    #[inline(always)]
    fn take_captured(&mut self, square: Square, mv: Move) -> Piece {
        let captured = self.mailbox[square as usize];
        assert!(
            captured != NO_PIECE,
            "capture {} finds no piece on {square}",
            move_to_long_algebraic(mv)
        );
        self.remove_piece(square)
    }
}
