#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Post-turn obstacle reshuffling system.
//!
//! After a completed turn a few obstacles may hop to random free cells. The
//! random source is owned by the [`Reshuffler`] and is independent of the game
//! seed unless the caller opts into [`Reshuffler::seeded`], so by default a
//! game cannot be replayed from its seed alone.
//!
//! Relocation does not re-run the placement checks. It can strand the mouse or
//! cut the actors apart; [`Config::with_preserve_reachability`] discards such
//! relocations instead.

use std::collections::BTreeSet;

use cat_chase_core::{is_playable, GameState, Grid, ObstacleShuffle, Position};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Chance that a completed turn relocates obstacles.
pub const DEFAULT_PROBABILITY: f64 = 0.2;
/// Largest number of obstacles relocated by a single reshuffle.
pub const DEFAULT_MAX_MOVED: usize = 3;

/// Configuration parameters required to construct the reshuffler.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    probability: f64,
    max_moved: usize,
    preserve_reachability: bool,
}

impl Config {
    /// Creates a configuration; `probability` is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(probability: f64, max_moved: usize) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };

        Self {
            probability,
            max_moved,
            preserve_reachability: false,
        }
    }

    /// Returns a copy that discards relocations breaking playability.
    #[must_use]
    pub const fn with_preserve_reachability(self, preserve_reachability: bool) -> Self {
        Self {
            preserve_reachability,
            ..self
        }
    }

    /// Chance in `[0, 1]` that a turn triggers a reshuffle.
    #[must_use]
    pub const fn probability(&self) -> f64 {
        self.probability
    }

    /// Upper bound on obstacles relocated per reshuffle.
    #[must_use]
    pub const fn max_moved(&self) -> usize {
        self.max_moved
    }

    /// Whether relocations that break playability are discarded.
    #[must_use]
    pub const fn preserve_reachability(&self) -> bool {
        self.preserve_reachability
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PROBABILITY, DEFAULT_MAX_MOVED)
    }
}

/// Stateful system that probabilistically relocates obstacles.
#[derive(Clone, Debug)]
pub struct Reshuffler<R = ChaCha8Rng> {
    config: Config,
    rng: R,
}

impl Reshuffler<ChaCha8Rng> {
    /// Creates a reshuffler drawing from operating-system entropy.
    #[must_use]
    pub fn from_entropy(config: Config) -> Self {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Creates a reshuffler whose draws are reproducible from `seed`.
    #[must_use]
    pub fn seeded(config: Config, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Reshuffler<R> {
    /// Creates a reshuffler around a caller-supplied random source.
    #[must_use]
    pub fn with_rng(config: Config, rng: R) -> Self {
        Self { config, rng }
    }

    /// Configuration driving the reshuffler.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Returns `state` unchanged or a successor with a few obstacles moved to
    /// cells that hold neither an obstacle, the cat nor the mouse.
    ///
    /// Only playing states are considered.
    pub fn maybe_reshuffle(&mut self, state: GameState) -> GameState {
        if !state.is_playing() || !self.rng.gen_bool(self.config.probability) {
            return state;
        }

        let obstacles: Vec<Position> = state.grid().obstacles().iter().copied().collect();
        let limit = self.config.max_moved.min(obstacles.len());
        if limit == 0 {
            return state;
        }

        let count = self.rng.gen_range(1..=limit);
        let removed: Vec<Position> = obstacles
            .choose_multiple(&mut self.rng, count)
            .copied()
            .collect();
        let mut remaining: BTreeSet<Position> = state.grid().obstacles().clone();
        for cell in &removed {
            let _ = remaining.remove(cell);
        }

        let cat = state.cat().position();
        let mouse = state.mouse().position();
        let free: Vec<Position> = Position::all()
            .filter(|cell| !remaining.contains(cell) && *cell != cat && *cell != mouse)
            .collect();
        let placed: Vec<Position> = free
            .choose_multiple(&mut self.rng, count.min(free.len()))
            .copied()
            .collect();
        if placed.is_empty() {
            return state;
        }
        remaining.extend(placed.iter().copied());

        let next = state.with_grid(Grid::new(remaining));
        if self.config.preserve_reachability && !is_playable(&next) {
            debug!(?removed, ?placed, "discarded reshuffle that broke playability");
            return state;
        }

        debug!(?removed, ?placed, "relocated obstacles");
        next
    }
}

impl<R: Rng> ObstacleShuffle for Reshuffler<R> {
    fn maybe_reshuffle(&mut self, state: GameState) -> GameState {
        Reshuffler::maybe_reshuffle(self, state)
    }
}
