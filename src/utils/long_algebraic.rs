//! Long algebraic move text (`e2e4`, `e7e8q`).
//!
//! Text carries only squares and a promotion letter, so parsing resolves it
//! against the pseudo-legal moves of a position to recover the move kind.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::generate_moves;
pub use crate::moves::move_descriptions::move_to_long_algebraic;
use crate::moves::move_descriptions::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> ChessResult<Move> {
    let invalid = || ChessError::InvalidLongAlgebraic(long_algebraic.to_owned());

    if !long_algebraic.is_ascii() || !(4..=5).contains(&long_algebraic.len()) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&long_algebraic[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&long_algebraic[2..4]).map_err(|_| invalid())?;
    let promotion = match long_algebraic.as_bytes().get(4) {
        None => None,
        Some(ch) => Some(char_to_promotion(char::from(*ch)).ok_or_else(invalid)?),
    };

    generate_moves(game_state)
        .iter()
        .copied()
        .find(|mv| {
            move_from(*mv) == from
                && move_to(*mv) == to
                && move_kind(*mv).promotion_piece_kind() == promotion
        })
        .ok_or_else(|| ChessError::NoSuchMove(long_algebraic.to_owned()))
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
