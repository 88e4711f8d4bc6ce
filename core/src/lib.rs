#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Cat Chase engine.
//!
//! This crate defines the value types that every other crate exchanges: grid
//! coordinates, the obstacle layout, both actors and the aggregate
//! [`GameState`] snapshot. Snapshots are immutable; every transition helper
//! returns a brand-new value and leaves the receiver untouched. The crate also
//! hosts the pure move validator ([`valid_moves`]), the reachability search
//! ([`path_exists`]) and the two capabilities the turn engine composes:
//! [`MousePolicy`] and [`ObstacleShuffle`].

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

mod moves;
mod navigation;

pub use moves::{legal_steps, valid_moves};
pub use navigation::{is_playable, path_exists};

/// Number of rows in the playing field.
pub const ROWS: u32 = 20;
/// Number of columns in the playing field.
pub const COLUMNS: u32 = 30;
/// Total number of cells in the playing field.
pub const CELL_COUNT: usize = (ROWS * COLUMNS) as usize;

/// Message attached to a state once the cat wins.
pub const CATCH_MESSAGE: &str = "You caught the mouse!";

/// Location of a single grid cell expressed as row and column coordinates.
///
/// Values can only be constructed inside the fixed `ROWS` x `COLUMNS` bounds,
/// so holding a `Position` is proof that it lies on the grid. Ordering is
/// row-major.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct Position {
    row: u32,
    column: u32,
}

impl Position {
    /// Creates a position, rejecting coordinates outside the grid.
    pub fn new(row: i32, column: i32) -> Result<Self, GeometryError> {
        let row_in_bounds = u32::try_from(row).map_or(false, |value| value < ROWS);
        let column_in_bounds = u32::try_from(column).map_or(false, |value| value < COLUMNS);
        if row_in_bounds && column_in_bounds {
            Ok(Self {
                row: row.unsigned_abs(),
                column: column.unsigned_abs(),
            })
        } else {
            Err(GeometryError::OutOfBounds { row, column })
        }
    }

    /// Recovers the position stored at the provided row-major cell index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }

        Some(Self {
            row: (index / COLUMNS as usize) as u32,
            column: (index % COLUMNS as usize) as u32,
        })
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Self::from_index)
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Row-major index of the cell, in `0..CELL_COUNT`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.row as usize * COLUMNS as usize + self.column as usize
    }

    /// Neighbouring cell one step in `direction`, or `None` past the edge.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Option<Self> {
        let (row_delta, column_delta) = direction.delta();
        let row = i32::try_from(self.row).ok()?.checked_add(row_delta)?;
        let column = i32::try_from(self.column).ok()?.checked_add(column_delta)?;
        Self::new(row, column).ok()
    }

    /// Computes the Manhattan distance between two positions.
    #[must_use]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column)
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = GeometryError;

    fn try_from((row, column): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(row, column)
    }
}

impl From<Position> for (i32, i32) {
    fn from(position: Position) -> Self {
        // Both coordinates are below 30, so the conversion is lossless.
        (position.row as i32, position.column as i32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal movement directions available to the cat.
///
/// Variants are declared in the canonical iteration order used by the move
/// validator so downstream tie-breaks stay reproducible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in canonical order: up, down, left, right.
    pub const ALL: [Direction; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row and column delta applied by a single step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Lower-case token naming the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    /// Parses a direction token, ignoring case and surrounding whitespace.
    ///
    /// The WASD key aliases are accepted alongside the full names.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "up" | "w" => Ok(Self::Up),
            "down" | "s" => Ok(Self::Down),
            "left" | "a" => Ok(Self::Left),
            "right" | "d" => Ok(Self::Right),
            _ => Err(ParseDirectionError(token.to_owned())),
        }
    }
}

/// Token that did not name a direction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised direction '{0}'")]
pub struct ParseDirectionError(String);

impl ParseDirectionError {
    /// Original token supplied by the caller.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// The two participants of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// Player-controlled pursuer.
    Cat,
    /// Heuristically-controlled evader.
    Mouse,
}

impl Actor {
    /// Lower-case name of the actor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cat => "cat",
            Self::Mouse => "mouse",
        }
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Actor {
    type Err = ParseActorError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "cat" => Ok(Self::Cat),
            "mouse" => Ok(Self::Mouse),
            _ => Err(ParseActorError(token.to_owned())),
        }
    }
}

/// Token that did not name an actor.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised actor '{0}'")]
pub struct ParseActorError(String);

/// Geometry violations raised while constructing positions or grids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum GeometryError {
    /// A coordinate pair falls outside the fixed grid.
    #[error("position ({row}, {column}) lies outside the 20x30 grid")]
    OutOfBounds {
        /// Requested row.
        row: i32,
        /// Requested column.
        column: i32,
    },
    /// An obstacle handed to a grid falls outside the fixed grid.
    #[error("obstacle at ({row}, {column}) lies outside the 20x30 grid")]
    InvalidGeometry {
        /// Offending obstacle row.
        row: i32,
        /// Offending obstacle column.
        column: i32,
    },
}

/// Immutable obstacle layout for one state snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    obstacles: BTreeSet<Position>,
}

impl Grid {
    /// Creates a grid from obstacles that are already known to be in bounds.
    #[must_use]
    pub fn new(obstacles: BTreeSet<Position>) -> Self {
        Self { obstacles }
    }

    /// Creates an empty grid without any obstacles.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid from raw coordinates, rejecting any that fall outside.
    pub fn from_coordinates<I>(coordinates: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        let mut obstacles = BTreeSet::new();
        for (row, column) in coordinates {
            let position = Position::new(row, column)
                .map_err(|_| GeometryError::InvalidGeometry { row, column })?;
            let _ = obstacles.insert(position);
        }
        Ok(Self { obstacles })
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        ROWS
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        COLUMNS
    }

    /// Reports whether raw coordinates lie inside the grid.
    #[must_use]
    pub fn in_bounds(&self, row: i32, column: i32) -> bool {
        Position::new(row, column).is_ok()
    }

    /// Reports whether the cell holds an obstacle.
    #[must_use]
    pub fn is_blocked(&self, position: Position) -> bool {
        self.obstacles.contains(&position)
    }

    /// Obstacles in row-major order.
    #[must_use]
    pub fn obstacles(&self) -> &BTreeSet<Position> {
        &self.obstacles
    }

    /// Number of obstacles on the grid.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    /// Iterates the cells that hold no obstacle, in row-major order.
    pub fn free_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |cell| !self.is_blocked(*cell))
    }
}

/// Player-controlled pursuer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cat {
    position: Position,
}

impl Cat {
    /// Places the cat at the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell currently occupied by the cat.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Heuristically-controlled evader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mouse {
    position: Position,
}

impl Mouse {
    /// Places the mouse at the provided cell.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self { position }
    }

    /// Cell currently occupied by the mouse.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }
}

/// Lifecycle of a single game. `Won` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The cat is still chasing.
    Playing,
    /// The mouse has been caught or trapped.
    Won,
}

impl GameStatus {
    /// Lower-case label used by adapters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Won => "won",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable snapshot of a game.
///
/// While the status is [`GameStatus::Playing`] the cat and mouse occupy
/// distinct, obstacle-free cells. Transitions never edit a snapshot; they
/// build the successor with the helpers below.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    grid: Grid,
    cat: Cat,
    mouse: Mouse,
    seed: u64,
    status: GameStatus,
    message: Option<String>,
}

impl GameState {
    /// Assembles a playing state from its parts.
    #[must_use]
    pub fn new(grid: Grid, cat: Cat, mouse: Mouse, seed: u64) -> Self {
        Self {
            grid,
            cat,
            mouse,
            seed,
            status: GameStatus::Playing,
            message: None,
        }
    }

    /// Obstacle layout of the snapshot.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The cat.
    #[must_use]
    pub const fn cat(&self) -> Cat {
        self.cat
    }

    /// The mouse.
    #[must_use]
    pub const fn mouse(&self) -> Mouse {
        self.mouse
    }

    /// Seed the game was generated from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Reports whether the game still accepts moves.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Human-readable message attached to the snapshot, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Cell occupied by the requested actor.
    #[must_use]
    pub const fn position_of(&self, actor: Actor) -> Position {
        match actor {
            Actor::Cat => self.cat.position,
            Actor::Mouse => self.mouse.position,
        }
    }

    /// Successor with both actors relocated, still playing and without a message.
    #[must_use]
    pub fn with_positions(&self, cat: Position, mouse: Position) -> Self {
        Self {
            grid: self.grid.clone(),
            cat: Cat::at(cat),
            mouse: Mouse::at(mouse),
            seed: self.seed,
            status: GameStatus::Playing,
            message: None,
        }
    }

    /// Successor that keeps actors and status but swaps the obstacle layout.
    #[must_use]
    pub fn with_grid(&self, grid: Grid) -> Self {
        Self {
            grid,
            cat: self.cat,
            mouse: self.mouse,
            seed: self.seed,
            status: self.status,
            message: self.message.clone(),
        }
    }

    /// Terminal successor with the cat on `cat` and the mouse left in place.
    #[must_use]
    pub fn won(&self, cat: Position, message: impl Into<String>) -> Self {
        Self {
            grid: self.grid.clone(),
            cat: Cat::at(cat),
            mouse: self.mouse,
            seed: self.seed,
            status: GameStatus::Won,
            message: Some(message.into()),
        }
    }

    /// Reports whether the playing invariant holds: the actors are apart and
    /// neither stands on an obstacle. Terminal states always satisfy it.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        if !self.is_playing() {
            return true;
        }

        let cat = self.cat.position;
        let mouse = self.mouse.position;
        cat != mouse && !self.grid.is_blocked(cat) && !self.grid.is_blocked(mouse)
    }
}

/// Capability that picks the mouse's next cell.
///
/// Implementations must be pure: identical states yield identical answers.
/// `None` means the mouse has no legal move and is trapped.
pub trait MousePolicy {
    /// Chooses the mouse's destination for the provided post-cat-move state.
    fn choose(&self, state: &GameState) -> Option<Position>;
}

/// Capability applied to the state produced by every completed turn.
pub trait ObstacleShuffle {
    /// Returns either the input state or a successor with relocated obstacles.
    fn maybe_reshuffle(&mut self, state: GameState) -> GameState;
}

/// Shuffle that never relocates anything, for fully deterministic engines.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoShuffle;

impl ObstacleShuffle for NoShuffle {
    fn maybe_reshuffle(&mut self, state: GameState) -> GameState {
        state
    }
}
