#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for Cat Chase.
//!
//! Reads one command per line from standard input and prints the grid (or a
//! JSON document with `--json`) after every accepted turn. Rejections go to
//! standard error so scripted callers can keep stdout machine-readable.

mod commands;
mod leaderboard;
mod session;

use std::{io, path::PathBuf};

use anyhow::Result;
use cat_chase_rendering::Glyphs;
use cat_chase_system_reshuffle::{
    Config as ReshuffleConfig, DEFAULT_MAX_MOVED, DEFAULT_PROBABILITY,
};
use clap::Parser;
use rand::Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    leaderboard::Leaderboard,
    session::{Options, Session},
};

/// Largest seed drawn when `--seed` is omitted.
const MAX_RANDOM_SEED: u64 = (1 << 31) - 1;

#[derive(Debug, Parser)]
#[command(
    name = "cat-chase",
    version,
    about = "Chase the mouse across a 20x30 grid of obstacles"
)]
struct Args {
    /// Seed for the obstacle layout; a random seed is drawn when omitted.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Print each snapshot as a single JSON line instead of a grid.
    #[arg(long)]
    json: bool,
    /// Draw the grid with emoji instead of C, M and #.
    #[arg(long)]
    emoji: bool,
    /// Record wins on the leaderboard under this four-letter tag.
    #[arg(long, value_name = "NAME")]
    name: Option<String>,
    /// Leaderboard file to use instead of the platform data directory.
    #[arg(long, value_name = "PATH")]
    leaderboard: Option<PathBuf>,
    /// Chance that a completed turn relocates obstacles.
    #[arg(long, value_name = "P", default_value_t = DEFAULT_PROBABILITY)]
    reshuffle_probability: f64,
    /// Largest number of obstacles relocated by one reshuffle.
    #[arg(long, value_name = "COUNT", default_value_t = DEFAULT_MAX_MOVED)]
    reshuffle_max: usize,
    /// Seed the reshuffle from the layout seed so a game replays exactly.
    #[arg(long)]
    replay: bool,
}

impl Args {
    fn options(&self) -> Options {
        Options {
            json: self.json,
            glyphs: Glyphs::select(self.emoji),
            player: self.name.clone(),
            leaderboard: self.leaderboard.clone().or_else(Leaderboard::default_path),
            reshuffle: ReshuffleConfig::new(self.reshuffle_probability, self.reshuffle_max),
            replay: self.replay,
        }
    }
}

/// Entry point for the Cat Chase command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(random_seed);
    info!(seed, "starting session");

    let mut session = Session::start(args.options(), seed)?;
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    session.run(io::stdin().lock(), &mut out, &mut err)
}

/// Draws a fresh layout seed.
pub(crate) fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..=MAX_RANDOM_SEED)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
