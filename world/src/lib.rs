#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative turn engine for Cat Chase.
//!
//! A turn is the cat's step followed by the win check, the mouse's reply and
//! the obstacle reshuffle. [`TurnEngine`] runs that sequence against an
//! immutable [`GameState`] and hands back a [`MoveOutcome`] holding either a
//! brand-new snapshot or the untouched input alongside the rejection.

use cat_chase_core::{valid_moves, Actor, CATCH_MESSAGE};
use tracing::{debug, info, warn};

pub use cat_chase_core::{
    Direction, GameState, GameStatus, MousePolicy, NoShuffle, ObstacleShuffle, Position,
};

/// Reasons a turn is refused. The input state is always left as it was.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    /// The direction was not recognised or the target cell cannot be entered.
    #[error("Invalid move")]
    InvalidMove(#[source] InvalidMoveReason),
    /// The game already reached its terminal state.
    #[error("Game already ended.")]
    GameOver,
}

/// Detail explaining why a move was invalid.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveReason {
    /// The token does not name a direction.
    #[error("unrecognised direction '{0}'")]
    UnknownDirection(String),
    /// The cat would leave the grid.
    #[error("target cell lies outside the grid")]
    OutOfBounds,
    /// The cat would walk into an obstacle.
    #[error("target cell holds an obstacle")]
    Obstacle,
}

/// Result of asking the engine to play one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    state: GameState,
    rejection: Option<TurnError>,
}

impl MoveOutcome {
    fn accepted(state: GameState) -> Self {
        Self {
            state,
            rejection: None,
        }
    }

    fn rejected(state: GameState, error: TurnError) -> Self {
        Self {
            state,
            rejection: Some(error),
        }
    }

    /// Reports whether the turn was played.
    #[must_use]
    pub fn success(&self) -> bool {
        self.rejection.is_none()
    }

    /// State after the turn, or the input state when the turn was refused.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Consumes the outcome, yielding the resulting state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Reason the turn was refused, if it was.
    #[must_use]
    pub fn rejection(&self) -> Option<&TurnError> {
        self.rejection.as_ref()
    }

    /// Feedback for the player: the rejection, the win message, or nothing.
    #[must_use]
    pub fn message(&self) -> String {
        match &self.rejection {
            Some(error) => error.to_string(),
            None => self.state.message().unwrap_or_default().to_owned(),
        }
    }
}

/// Orchestrates complete turns by composing a mouse policy with an obstacle
/// shuffle.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine<P, S> {
    policy: P,
    shuffle: S,
}

impl<P, S> TurnEngine<P, S>
where
    P: MousePolicy,
    S: ObstacleShuffle,
{
    /// Creates an engine from its two collaborators.
    #[must_use]
    pub fn new(policy: P, shuffle: S) -> Self {
        Self { policy, shuffle }
    }

    /// Policy steering the mouse.
    #[must_use]
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Shuffle applied after completed turns.
    #[must_use]
    pub fn shuffle(&self) -> &S {
        &self.shuffle
    }

    /// Plays one turn from a raw direction token such as `"Up"` or `"left"`.
    pub fn apply_move(&mut self, state: &GameState, token: &str) -> MoveOutcome {
        let direction = if state.is_playing() {
            token.parse::<Direction>().map_err(|error| {
                TurnError::InvalidMove(InvalidMoveReason::UnknownDirection(
                    error.token().to_owned(),
                ))
            })
        } else {
            Err(TurnError::GameOver)
        };

        match direction {
            Ok(direction) => self.apply(state, direction),
            Err(error) => {
                debug!(%error, token, "move rejected");
                MoveOutcome::rejected(state.clone(), error)
            }
        }
    }

    /// Plays one turn in the provided direction.
    pub fn apply(&mut self, state: &GameState, direction: Direction) -> MoveOutcome {
        match self.try_apply(state, direction) {
            Ok(next) => MoveOutcome::accepted(next),
            Err(error) => {
                debug!(%error, %direction, "move rejected");
                MoveOutcome::rejected(state.clone(), error)
            }
        }
    }

    /// Plays one turn, returning the successor state or the rejection.
    pub fn try_apply(
        &mut self,
        state: &GameState,
        direction: Direction,
    ) -> Result<GameState, TurnError> {
        if !state.is_playing() {
            return Err(TurnError::GameOver);
        }

        let from = state.cat().position();
        let target = from
            .offset(direction)
            .ok_or(TurnError::InvalidMove(InvalidMoveReason::OutOfBounds))?;
        if state.grid().is_blocked(target) {
            return Err(TurnError::InvalidMove(InvalidMoveReason::Obstacle));
        }
        info!(%direction, %from, to = %target, "cat moved");

        let mouse = state.mouse().position();
        if target == mouse {
            info!(cell = %target, "cat caught the mouse");
            return Ok(state.won(target, CATCH_MESSAGE));
        }

        let after_cat = state.with_positions(target, mouse);
        let legal = valid_moves(&after_cat, Actor::Mouse);
        let choice = if legal.is_empty() {
            None
        } else {
            match self.policy.choose(&after_cat) {
                Some(cell) if legal.contains(&cell) => Some(cell),
                Some(cell) => {
                    warn!(%cell, "mouse policy chose an illegal cell");
                    None
                }
                None => None,
            }
        };
        // A policy without a legal answer forfeits like a trapped mouse.
        let Some(next_mouse) = choice else {
            info!(cell = %mouse, "mouse trapped");
            return Ok(state.won(target, CATCH_MESSAGE));
        };
        debug!(from = %mouse, to = %next_mouse, "mouse moved");

        let next = after_cat.with_positions(target, next_mouse);
        Ok(self.shuffle.maybe_reshuffle(next))
    }
}

/// Query functions that provide read-only access to game snapshots.
pub mod query {
    use cat_chase_core::{Direction, GameState};

    pub use cat_chase_core::{is_playable, path_exists, valid_moves};

    /// Directions the cat may take without leaving the grid or hitting an
    /// obstacle, in canonical order.
    #[must_use]
    pub fn legal_directions(state: &GameState) -> Vec<Direction> {
        let cat = state.cat().position();
        Direction::ALL
            .into_iter()
            .filter(|direction| {
                cat.offset(*direction)
                    .map_or(false, |cell| !state.grid().is_blocked(cell))
            })
            .collect()
    }
}
