#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic one-ply pursuit heuristic that steers the mouse.

use cat_chase_core::{legal_steps, valid_moves, Actor, GameState, MousePolicy, Position};

/// Pure policy that moves the mouse greedily away from the cat.
///
/// Candidates are the mouse's legal moves. Each is scored by distance from the
/// cat, then by how many moves the mouse would have from there, then by the
/// smallest row and column. The highest score wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pursuit;

impl MousePolicy for Pursuit {
    fn choose(&self, state: &GameState) -> Option<Position> {
        valid_moves(state, Actor::Mouse)
            .into_iter()
            .max_by_key(|candidate| score(state, *candidate))
    }
}

/// Chooses the mouse's next cell, or `None` when it is trapped.
#[must_use]
pub fn choose_mouse_move(state: &GameState) -> Option<Position> {
    Pursuit.choose(state)
}

/// Lexicographic score of a candidate cell. Field order is significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MoveScore {
    /// Manhattan distance between the candidate and the cat.
    pub distance: u32,
    /// Legal moves the mouse would have from the candidate.
    pub escape_routes: usize,
    /// Candidate row, negated so smaller rows rank higher.
    pub negated_row: i64,
    /// Candidate column, negated so smaller columns rank higher.
    pub negated_column: i64,
}

/// Scores `candidate` as a mouse destination in `state`.
#[must_use]
pub fn score(state: &GameState, candidate: Position) -> MoveScore {
    let cat = state.cat().position();
    MoveScore {
        distance: candidate.manhattan_distance(cat),
        escape_routes: legal_steps(state.grid(), candidate, Some(cat)).len(),
        negated_row: -i64::from(candidate.row()),
        negated_column: -i64::from(candidate.column()),
    }
}
