//! Perft node counting.
//!
//! Walks the game tree with the make, verify, unmake protocol: every
//! pseudo-legal move is made, discarded if it leaves the mover in check, and
//! always unmade before the next sibling is tried.

use std::ops::AddAssign;

use crate::game_state::game_state::GameState;
use crate::move_generation::attack_query::is_in_check;
use crate::move_generation::move_generator::{MoveGenerator, MoveList};
use crate::moves::move_descriptions::{move_kind, Move, MoveKind};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

impl AddAssign for PerftCounts {
    fn add_assign(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Make `mv` and report whether it was legal. An illegal move is unmade
/// before returning; a legal one is left on the board.
#[inline]
fn make_if_legal(game_state: &mut GameState, mv: Move) -> bool {
    let mover = game_state.side_to_move();
    game_state.make_move(mv);
    if is_in_check(game_state, mover) {
        game_state.unmake_move();
        return false;
    }
    true
}

/// Legal leaf count at `depth`.
pub fn perft<G: MoveGenerator>(generator: &G, game_state: &mut GameState, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut moves = MoveList::new();
    generator.generate_moves_into(game_state, &mut moves);

    let mut nodes = 0u64;
    for &mv in moves.iter() {
        if !make_if_legal(game_state, mv) {
            continue;
        }
        nodes += if depth == 1 {
            1
        } else {
            perft(generator, game_state, depth - 1)
        };
        game_state.unmake_move();
    }

    nodes
}

/// Leaf count plus a breakdown of the moves that reach the leaves.
pub fn perft_counts<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut moves = MoveList::new();
    generator.generate_moves_into(game_state, &mut moves);

    let mut total = PerftCounts::default();
    for &mv in moves.iter() {
        if !make_if_legal(game_state, mv) {
            continue;
        }
        if depth == 1 {
            total += leaf_counts(game_state, move_kind(mv));
        } else {
            total += perft_counts(generator, game_state, depth - 1);
        }
        game_state.unmake_move();
    }

    total
}

fn leaf_counts(game_state: &GameState, kind: MoveKind) -> PerftCounts {
    PerftCounts {
        nodes: 1,
        captures: kind.is_capture() as u64,
        en_passant: (kind == MoveKind::EnPassant) as u64,
        castles: kind.is_castle() as u64,
        promotions: kind.is_promotion() as u64,
        checks: is_in_check(game_state, game_state.side_to_move()) as u64,
    }
}

/// Per-root-move node counts, in generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &mut GameState,
    depth: u8,
) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let moves = generator.generate_moves(game_state);
    let mut out = Vec::with_capacity(moves.len());
    for &mv in moves.iter() {
        if !make_if_legal(game_state, mv) {
            continue;
        }
        out.push((mv, perft(generator, game_state, depth - 1)));
        game_state.unmake_move();
    }

    out
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::game_state::chess_types::*;
    use crate::move_generation::move_generator::{generate_moves, MagicMoveGenerator};
    use crate::moves::move_descriptions::move_to_long_algebraic;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    fn assert_perft(fen: &str, expected: &[u64]) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let before = game.clone();
        for (depth_idx, nodes) in expected.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;
            assert_eq!(
                perft(&MagicMoveGenerator, &mut game, depth),
                *nodes,
                "{fen} depth {depth}"
            );
            assert_eq!(game, before, "perft must leave the board untouched");
        }
    }

    fn counts(fen: &str, depth: u8) -> PerftCounts {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        perft_counts(&MagicMoveGenerator, &mut game, depth)
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&MagicMoveGenerator, &mut game, 0), 1);
        assert_eq!(perft_counts(&MagicMoveGenerator, &mut game, 0).nodes, 1);
        assert!(perft_divide(&MagicMoveGenerator, &mut game, 0).is_empty());
    }

    #[test]
    fn perft_starting_position() {
        assert_perft(
            crate::game_state::chess_rules::STARTING_POSITION_FEN,
            &[20, 400, 8_902, 197_281],
        );
    }

    #[test]
    #[ignore = "slow in debug builds"]
    fn perft_starting_position_depth_5() {
        let mut game = GameState::new_game();
        assert_eq!(perft(&MagicMoveGenerator, &mut game, 5), 4_865_609);
    }

    #[test]
    fn perft_kiwipete() {
        assert_perft(KIWIPETE, &[48, 2_039, 97_862]);
    }

    #[test]
    fn perft_position_3() {
        assert_perft(POSITION_3, &[14, 191, 2_812, 43_238]);
    }

    #[test]
    fn perft_position_4() {
        assert_perft(POSITION_4, &[6, 264, 9_467]);
    }

    #[test]
    fn perft_position_5() {
        assert_perft(POSITION_5, &[44, 1_486, 62_379]);
    }

    #[test]
    fn perft_counts_starting_position() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(
            counts(start, 3),
            PerftCounts {
                nodes: 8_902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
            }
        );
    }

    #[test]
    fn perft_counts_kiwipete() {
        assert_eq!(
            counts(KIWIPETE, 1),
            PerftCounts {
                nodes: 48,
                captures: 8,
                en_passant: 0,
                castles: 2,
                promotions: 0,
                checks: 0,
            }
        );
        assert_eq!(
            counts(KIWIPETE, 2),
            PerftCounts {
                nodes: 2_039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
            }
        );
        assert_eq!(
            counts(KIWIPETE, 3),
            PerftCounts {
                nodes: 97_862,
                captures: 17_102,
                en_passant: 45,
                castles: 3_162,
                promotions: 0,
                checks: 993,
            }
        );
    }

    #[test]
    fn perft_counts_position_3_and_4() {
        assert_eq!(
            counts(POSITION_3, 3),
            PerftCounts {
                nodes: 2_812,
                captures: 209,
                en_passant: 2,
                castles: 0,
                promotions: 0,
                checks: 267,
            }
        );
        assert_eq!(
            counts(POSITION_4, 2),
            PerftCounts {
                nodes: 264,
                captures: 87,
                en_passant: 0,
                castles: 6,
                promotions: 48,
                checks: 10,
            }
        );
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut game = GameState::from_fen(KIWIPETE).expect("FEN should parse");
        let divide = perft_divide(&MagicMoveGenerator, &mut game, 2);
        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 2_039);

        let castle = divide
            .iter()
            .find(|(mv, _)| move_to_long_algebraic(*mv) == "e1g1")
            .expect("kiwipete allows short castling");
        assert_eq!(castle.1, 43);
    }

    /// Play seeded random legal games, auditing the board after every move and
    /// unwinding back to the start at the end.
    #[test]
    fn random_walks_round_trip_and_stay_consistent() {
        let mut rng = StdRng::seed_from_u64(0x5EED_CAFE);

        for fen in [crate::game_state::chess_rules::STARTING_POSITION_FEN, KIWIPETE, POSITION_4] {
            let start = GameState::from_fen(fen).expect("FEN should parse");
            let mut game = start.clone();
            let mut made = 0usize;

            for _ in 0..200 {
                let moves = generate_moves(&game);
                let mut legal: Vec<Move> = Vec::new();
                for &mv in moves.iter() {
                    let before = game.clone();
                    if make_if_legal(&mut game, mv) {
                        legal.push(mv);
                        game.unmake_move();
                    }
                    assert_eq!(game, before, "make/unmake of {}", move_to_long_algebraic(mv));
                }
                if legal.is_empty() {
                    break;
                }

                let mv = legal[rng.random_range(0..legal.len())];
                game.make_move(mv);
                made += 1;
                game.validate().expect("random walk should keep the board consistent");
            }

            for _ in 0..made {
                game.unmake_move();
            }
            assert_eq!(game, start);
        }
    }

    #[test]
    fn castling_rights_never_come_back_during_play() {
        let mut rng = StdRng::seed_from_u64(17);
        let start = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");
        let mut game = start.clone();
        let mut rights_by_ply = vec![game.castling_rights()];

        for _ in 0..120 {
            let moves = generate_moves(&game);
            let legal: Vec<Move> = moves
                .iter()
                .copied()
                .filter(|&mv| {
                    let ok = make_if_legal(&mut game, mv);
                    if ok {
                        game.unmake_move();
                    }
                    ok
                })
                .collect();
            if legal.is_empty() {
                break;
            }

            let previous = game.castling_rights();
            game.make_move(legal[rng.random_range(0..legal.len())]);
            let current = game.castling_rights();
            assert_eq!(current & !previous, 0, "a cleared right reappeared");
            rights_by_ply.push(current);
        }

        // Unwinding restores each earlier rights field exactly.
        while let Some(expected) = rights_by_ply.pop() {
            assert_eq!(game.castling_rights(), expected);
            if game.ply() == 0 {
                break;
            }
            game.unmake_move();
        }
        assert_eq!(game, start);
        assert_eq!(game.castling_rights(), CASTLE_ALL);
    }
}
