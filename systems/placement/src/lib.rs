#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded placement system that generates playable opening layouts.
//!
//! Every random draw comes from a single [`ChaCha8Rng`] seeded with the game
//! seed, so the same seed reproduces the same obstacles, cat and mouse on any
//! machine. Layouts are sampled and rejected until one satisfies
//! [`is_playable`], up to a hard attempt ceiling.

use std::collections::BTreeSet;

use cat_chase_core::{is_playable, Cat, GameState, Grid, Mouse, Position, CELL_COUNT};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, trace, warn};

/// Attempt ceiling applied by [`create_game`].
pub const MAX_ATTEMPTS: u32 = 5_000;

/// Configuration parameters that bound the layout sampler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_attempts: u32,
    min_obstacles: usize,
    max_obstacles: usize,
}

impl Config {
    /// Creates a configuration with an explicit attempt ceiling and an
    /// inclusive obstacle-count range.
    #[must_use]
    pub const fn new(max_attempts: u32, min_obstacles: usize, max_obstacles: usize) -> Self {
        Self {
            max_attempts,
            min_obstacles,
            max_obstacles,
        }
    }

    /// Returns a copy with a different attempt ceiling.
    #[must_use]
    pub const fn with_max_attempts(self, max_attempts: u32) -> Self {
        Self {
            max_attempts,
            ..self
        }
    }

    /// Returns a copy with a different inclusive obstacle-count range.
    #[must_use]
    pub const fn with_obstacle_range(self, min_obstacles: usize, max_obstacles: usize) -> Self {
        Self {
            min_obstacles,
            max_obstacles,
            ..self
        }
    }

    /// Maximum number of layouts sampled before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Smallest obstacle count a layout may receive.
    #[must_use]
    pub const fn min_obstacles(&self) -> usize {
        self.min_obstacles
    }

    /// Largest obstacle count a layout may receive.
    #[must_use]
    pub const fn max_obstacles(&self) -> usize {
        self.max_obstacles
    }

    fn validate(&self) -> Result<(), PlacementError> {
        let reason = if self.max_attempts == 0 {
            "attempt ceiling must be positive"
        } else if self.min_obstacles > self.max_obstacles {
            "minimum obstacle count exceeds the maximum"
        } else if self.max_obstacles > CELL_COUNT - 2 {
            "obstacles must leave room for both actors"
        } else {
            return Ok(());
        };

        Err(PlacementError::InvalidConfig { reason })
    }
}

impl Default for Config {
    /// Roughly 10% to 20% of the grid is blocked.
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, (CELL_COUNT / 10).max(1), (CELL_COUNT / 5).max(2))
    }
}

/// Failures raised while generating a layout.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlacementError {
    /// No sampled layout satisfied the playability checks.
    #[error("no playable layout found for seed {seed} within {attempts} attempts")]
    GenerationFailure {
        /// Seed the caller asked for.
        seed: u64,
        /// Number of layouts that were sampled and rejected.
        attempts: u32,
    },
    /// The configuration cannot produce a layout.
    #[error("invalid placement configuration: {reason}")]
    InvalidConfig {
        /// Constraint the configuration violates.
        reason: &'static str,
    },
}

/// Pure system that turns a seed into the opening [`GameState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Placement {
    config: Config,
}

impl Placement {
    /// Creates a placement system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration driving the sampler.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Generates the first playable layout drawn from `seed`.
    pub fn generate(&self, seed: u64) -> Result<GameState, PlacementError> {
        self.config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for attempt in 1..=self.config.max_attempts {
            if let Some(state) = self.sample(&mut rng, seed) {
                info!(
                    seed,
                    attempt,
                    obstacles = state.grid().obstacle_count(),
                    cat = %state.cat().position(),
                    mouse = %state.mouse().position(),
                    "generated playable layout"
                );
                return Ok(state);
            }
        }

        warn!(
            seed,
            attempts = self.config.max_attempts,
            "no playable layout within the attempt ceiling"
        );
        Err(PlacementError::GenerationFailure {
            seed,
            attempts: self.config.max_attempts,
        })
    }

    fn sample(&self, rng: &mut ChaCha8Rng, seed: u64) -> Option<GameState> {
        // Draws stay in `u32` so a seed yields the same layout on 32 and
        // 64-bit targets.
        let min = self.config.min_obstacles as u32;
        let max = self.config.max_obstacles as u32;
        let target = rng.gen_range(min..=max) as usize;
        let mut obstacles = BTreeSet::new();
        while obstacles.len() < target {
            let index = rng.gen_range(0..CELL_COUNT as u32) as usize;
            if let Some(cell) = Position::from_index(index) {
                let _ = obstacles.insert(cell);
            }
        }

        let grid = Grid::new(obstacles);
        let mut free: Vec<Position> = grid.free_cells().collect();
        free.shuffle(rng);
        let (cat, mouse) = match free.as_slice() {
            [cat, mouse, ..] => (*cat, *mouse),
            _ => return None,
        };

        let state = GameState::new(grid, Cat::at(cat), Mouse::at(mouse), seed);
        if !is_playable(&state) {
            trace!(%cat, %mouse, obstacles = target, "rejected unplayable layout");
            return None;
        }

        Some(state)
    }
}

/// Generates the opening state for `seed` using the default configuration.
pub fn create_game(seed: u64) -> Result<GameState, PlacementError> {
    Placement::default().generate(seed)
}
