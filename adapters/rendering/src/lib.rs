#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared presentation contracts for Cat Chase adapters.
//!
//! Adapters never inspect the engine's internals; they draw a [`GameState`]
//! through the text grid produced by [`render_grid`] or publish it as a
//! machine-readable [`StateDocument`].

use cat_chase_core::{GameState, Position, COLUMNS, ROWS};
use serde::{Deserialize, Serialize};

/// Symbols used for each kind of cell when drawing the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Symbol drawn on the cat's cell.
    pub cat: &'static str,
    /// Symbol drawn on the mouse's cell.
    pub mouse: &'static str,
    /// Symbol drawn on obstacle cells.
    pub obstacle: &'static str,
    /// Symbol drawn on free cells.
    pub empty: &'static str,
}

impl Glyphs {
    /// Single-width glyphs that render in any terminal.
    #[must_use]
    pub const fn text() -> Self {
        Self {
            cat: "C",
            mouse: "M",
            obstacle: "#",
            empty: "\u{2588}",
        }
    }

    /// Emoji glyphs. Emoji occupy two terminal columns, so free cells are
    /// padded to the same width.
    #[must_use]
    pub const fn emoji() -> Self {
        Self {
            cat: "\u{1f431}",
            mouse: "\u{1f42d}",
            obstacle: "\u{1f9f1}",
            empty: " \u{2588}",
        }
    }

    /// Selects the emoji set when `emoji` is true, the text set otherwise.
    #[must_use]
    pub const fn select(emoji: bool) -> Self {
        if emoji {
            Self::emoji()
        } else {
            Self::text()
        }
    }

    /// Glyph for a single cell. The cat wins over the mouse when both share
    /// a cell, which only happens after a catch.
    #[must_use]
    pub fn cell(&self, state: &GameState, position: Position) -> &'static str {
        if position == state.cat().position() {
            self.cat
        } else if position == state.mouse().position() {
            self.mouse
        } else if state.grid().is_blocked(position) {
            self.obstacle
        } else {
            self.empty
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self::text()
    }
}

/// Draws the full board as `ROWS` newline-separated lines of `COLUMNS`
/// glyphs each, without a trailing newline.
#[must_use]
pub fn render_grid(state: &GameState, glyphs: &Glyphs) -> String {
    let mut lines = Vec::with_capacity(ROWS as usize);
    for row in 0..ROWS {
        let mut line = String::new();
        for column in 0..COLUMNS {
            let index = (row * COLUMNS + column) as usize;
            if let Some(position) = Position::from_index(index) {
                line.push_str(glyphs.cell(state, position));
            }
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Status line printed underneath the grid.
#[must_use]
pub fn status_line(state: &GameState) -> String {
    format!("Status: {}", state.status())
}

/// Serializable view of a snapshot consumed by scripted front-ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDocument {
    /// Lower-case status label, `playing` or `won`.
    pub status: String,
    /// Feedback message, empty while no message is attached.
    pub message: String,
    /// Grid dimensions as `[rows, columns]`.
    pub grid_size: [u32; 2],
    /// Cat cell as `[row, column]`.
    pub cat: Position,
    /// Mouse cell as `[row, column]`.
    pub mouse: Position,
    /// Obstacle cells in row-major order.
    pub obstacles: Vec<Position>,
    /// Seed the layout was generated from.
    pub seed: u64,
}

impl StateDocument {
    /// Captures the provided snapshot.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            status: state.status().as_str().to_owned(),
            message: state.message().unwrap_or_default().to_owned(),
            grid_size: [ROWS, COLUMNS],
            cat: state.cat().position(),
            mouse: state.mouse().position(),
            obstacles: state.grid().obstacles().iter().copied().collect(),
            seed: state.seed(),
        }
    }

    /// Encodes the document as a single JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&GameState> for StateDocument {
    fn from(state: &GameState) -> Self {
        Self::capture(state)
    }
}
