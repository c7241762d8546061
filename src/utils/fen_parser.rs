//! FEN-to-GameState parser.
//!
//! Drives the `GameState` setters field by field, so an imported position
//! carries the same mailbox, occupancy and Zobrist key as one reached by play.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(ChessError::MissingFenField("board layout"))?;
    let side_part = parts.next().ok_or(ChessError::MissingFenField("side to move"))?;
    let castling_part = parts.next().ok_or(ChessError::MissingFenField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(ChessError::MissingFenField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(ChessError::MissingFenField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(ChessError::MissingFenField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(ChessError::TrailingFenFields);
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    let side_to_move = parse_side_to_move(side_part)?;
    game_state.set_side_to_move(side_to_move);
    game_state.set_castling_rights(parse_castling_rights(castling_part)?);
    let en_passant = parse_en_passant_square(en_passant_part, side_to_move, &game_state)?;
    game_state.set_en_passant_target(en_passant);
    game_state.set_halfmove_clock(parse_counter("halfmove clock", halfmove_part)?);
    game_state.set_fullmove_number(parse_counter("fullmove number", fullmove_part)?);

    Ok(game_state)
}

fn invalid(field: &'static str, value: &str) -> ChessError {
    ChessError::InvalidFenField {
        field,
        value: value.to_owned(),
    }
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout", board_part));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::InvalidFenToken(ch));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = piece_from_fen_char(ch).ok_or(ChessError::InvalidFenToken(ch))?;
            if file >= 8 {
                return Err(invalid("board layout", rank_str));
            }

            game_state.put_piece(piece, (board_rank * 8 + file) as Square);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board layout", rank_str));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid("side to move", side_part)),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid("castling rights", castling_part)),
        }
    }

    Ok(rights)
}

/// The target must sit behind a pawn of the side that just double-pushed:
/// rank 6 over a black pawn when White moves, rank 3 over a white pawn when
/// Black moves.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
    game_state: &GameState,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid("en-passant square", en_passant_part))?;
    let (rank, pushed_pawn_square) = match side_to_move {
        Color::White => (5, square.wrapping_sub(8)),
        Color::Black => (2, square.wrapping_add(8)),
    };
    let pushed_pawn = make_piece(PieceKind::Pawn, side_to_move.opposite());
    if square / 8 != rank || game_state.piece_at(pushed_pawn_square) != pushed_pawn {
        return Err(invalid("en-passant square", en_passant_part));
    }

    Ok(Some(square))
}

fn parse_counter(field: &'static str, text: &str) -> ChessResult<u16> {
    text.parse::<u16>().map_err(|_| invalid(field, text))
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(make_piece(kind, color))
}
