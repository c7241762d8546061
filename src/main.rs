use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use magic_chess::chess_errors::ChessResult;
use magic_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use magic_chess::game_state::game_state::GameState;
use magic_chess::move_generation::attack_query::is_in_check;
use magic_chess::move_generation::move_generator::{generate_moves, MagicMoveGenerator, MoveList};
use magic_chess::move_generation::perft::{perft, perft_divide};
use magic_chess::moves::magic_tables::init_attack_tables;
use magic_chess::moves::move_descriptions::{move_to_long_algebraic, Move};
use magic_chess::utils::render_game_state::render_game_state_with_status;

#[derive(Debug, Parser)]
#[command(name = "magic_chess", about = "Magic-bitboard move generation tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count legal leaf nodes to a fixed depth.
    Perft {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
        #[arg(long, default_value_t = 5)]
        depth: u8,
        /// Print the node count under each root move.
        #[arg(long)]
        divide: bool,
    },
    /// Render a position and its legal moves.
    Show {
        #[arg(long, default_value = STARTING_POSITION_FEN)]
        fen: String,
    },
    /// Raw make/unmake throughput over the starting position's moves.
    Nps {
        #[arg(long, default_value_t = 1_000_000)]
        iterations: u64,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> ChessResult<()> {
    init_attack_tables();

    match command {
        Command::Perft { fen, depth, divide } => run_perft(&fen, depth, divide),
        Command::Show { fen } => run_show(&fen),
        Command::Nps { iterations } => {
            run_nps(iterations);
            Ok(())
        }
    }
}

fn run_perft(fen: &str, depth: u8, divide: bool) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    let started = Instant::now();

    let nodes = if divide {
        let mut total = 0u64;
        for (mv, nodes) in perft_divide(&MagicMoveGenerator, &mut game, depth) {
            println!("{}: {nodes}", move_to_long_algebraic(mv));
            total += nodes;
        }
        total
    } else {
        perft(&MagicMoveGenerator, &mut game, depth)
    };

    let elapsed = started.elapsed();
    println!("\nnodes: {nodes}");
    info!(
        depth,
        nodes,
        elapsed_ms = elapsed.as_millis() as u64,
        nps = (nodes as f64 / elapsed.as_secs_f64().max(1e-9)) as u64,
        "perft finished"
    );
    Ok(())
}

fn run_show(fen: &str) -> ChessResult<()> {
    let mut game = GameState::from_fen(fen)?;
    println!("{}", render_game_state_with_status(&game));
    println!("fen: {}", game.get_fen());

    let mover = game.side_to_move();
    let mut legal = Vec::new();
    for &mv in generate_moves(&game).iter() {
        game.make_move(mv);
        if !is_in_check(&game, mover) {
            legal.push(move_to_long_algebraic(mv));
        }
        game.unmake_move();
    }
    println!("legal moves ({}): {}", legal.len(), legal.join(" "));
    if is_in_check(&game, mover) {
        println!("{mover:?} is in check");
    }
    Ok(())
}

/// Cycle make/unmake over a fixed move cache, with no generation in the loop.
fn run_nps(iterations: u64) {
    let mut game = GameState::new_game();
    let moves: MoveList = generate_moves(&game);
    let cache: Vec<Move> = moves.to_vec();

    let started = Instant::now();
    for i in 0..iterations {
        let mv = cache[(i % cache.len() as u64) as usize];
        game.make_move(mv);
        game.unmake_move();
    }
    let elapsed = started.elapsed();

    info!(
        iterations,
        elapsed_ms = elapsed.as_millis() as u64,
        nps = (iterations as f64 / elapsed.as_secs_f64().max(1e-9)) as u64,
        "make/unmake benchmark finished"
    );
    println!("{} make/unmake pairs in {elapsed:?}", iterations);
}
