//! Crate root module declarations for the magic-bitboard chess core.
//!
//! Exposes the board state with its make/unmake protocol, the attack tables
//! and magic search, pseudo-legal move generation with perft, Zobrist hashing,
//! and the text utilities (FEN, move text, board rendering).

pub mod chess_errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod history;
    pub mod make_move;
}

pub mod moves {
    pub mod leaper_masks;
    pub mod magic_search;
    pub mod magic_tables;
    pub mod move_descriptions;
    pub mod slider_masks;
}

pub mod move_generation {
    pub mod attack_query;
    pub mod move_generator;
    pub mod perft;
}

pub mod search {
    pub mod zobrist;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
