//! Searches fresh magic multipliers and prints them as Rust constants.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use magic_chess::moves::magic_search::{find_all_magics, format_magic_table, DEFAULT_MAX_ATTEMPTS};
use magic_chess::moves::slider_masks::Slider;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SliderArg {
    Rook,
    Bishop,
    Both,
}

#[derive(Debug, Parser)]
#[command(name = "magic_finder", about = "Offline magic bitboard multiplier search")]
struct Args {
    #[arg(long, value_enum, default_value_t = SliderArg::Both)]
    slider: SliderArg,
    /// Seed for the candidate generator; the same seed gives the same tables.
    #[arg(long, default_value_t = 0x00C0_FFEE)]
    seed: u64,
    /// Candidates tried per square before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let sliders: &[(Slider, &str)] = match args.slider {
        SliderArg::Rook => &[(Slider::Rook, "ROOK_MAGICS")],
        SliderArg::Bishop => &[(Slider::Bishop, "BISHOP_MAGICS")],
        SliderArg::Both => &[(Slider::Rook, "ROOK_MAGICS"), (Slider::Bishop, "BISHOP_MAGICS")],
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    for (slider, name) in sliders {
        info!(slider = slider.name(), seed = args.seed, "searching magics");
        match find_all_magics(*slider, &mut rng, args.max_attempts) {
            Ok(magics) => println!("{}", format_magic_table(name, &magics)),
            Err(err) => {
                error!("{err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
