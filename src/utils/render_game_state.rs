//! Terminal-oriented Unicode board renderer.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::attack_query::checkers;
use crate::utils::algebraic::{bitboard_to_algebraic, square_name};

/// Render the board to a Unicode string for terminal output, rank 8 on top.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            out.push(piece_to_unicode(game_state.piece_at(rank * 8 + file)));
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

/// Board plus the side to move, rights, en-passant target, checking pieces
/// and key.
pub fn render_game_state_with_status(game_state: &GameState) -> String {
    let checking = bitboard_to_algebraic(checkers(game_state, game_state.side_to_move()));
    format!(
        "{}\n\nside: {:?}  castling: {:04b}  en passant: {}  checkers: {}  key: {:#018x}",
        render_game_state(game_state),
        game_state.side_to_move(),
        game_state.castling_rights(),
        game_state.en_passant_square().map_or("-", square_name),
        if checking.is_empty() { "-".to_owned() } else { checking.join(" ") },
        game_state.zobrist_key()
    )
}

fn piece_to_unicode(piece: Piece) -> char {
    match piece {
        W_PAWN => '♙',
        W_KNIGHT => '♘',
        W_BISHOP => '♗',
        W_ROOK => '♖',
        W_QUEEN => '♕',
        W_KING => '♔',
        B_PAWN => '♟',
        B_KNIGHT => '♞',
        B_BISHOP => '♝',
        B_ROOK => '♜',
        B_QUEEN => '♛',
        B_KING => '♚',
        _ => '·',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ranks_top_down() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[4], "5 · · · · · · · · 5");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
    }

    #[test]
    fn status_line_reports_side_and_rights() {
        let text = render_game_state_with_status(&GameState::new_game());
        assert!(text.contains("side: White"));
        assert!(text.contains("castling: 1111"));
        assert!(text.contains("en passant: -"));
        assert!(text.contains("checkers: -"));
    }

    #[test]
    fn status_line_names_checking_pieces() {
        let game_state = GameState::from_fen("4k3/8/8/8/1b6/8/8/r3K3 w - - 0 1").expect("FEN should parse");
        let text = render_game_state_with_status(&game_state);
        assert!(text.contains("checkers: a1 b4"), "{text}");
    }
}
