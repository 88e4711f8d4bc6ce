//! Line-driven game session shared by interactive and scripted play.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use cat_chase_core::{Actor, GameState, GameStatus};
use cat_chase_rendering::{render_grid, status_line, Glyphs, StateDocument};
use cat_chase_system_placement::create_game;
use cat_chase_system_pursuit::Pursuit;
use cat_chase_system_reshuffle::{Config as ReshuffleConfig, Reshuffler};
use cat_chase_world::{query, TurnEngine, TurnError};
use tracing::{debug, info, warn};

use crate::{
    commands::{Command, HELP},
    leaderboard::Leaderboard,
};

/// Line printed to stderr for input that cannot be played.
const INVALID_MOVE: &str = "Invalid move";

/// Presentation and persistence choices fixed for the lifetime of a session.
#[derive(Clone, Debug)]
pub(crate) struct Options {
    /// Emit one JSON document per snapshot instead of a drawn grid.
    pub(crate) json: bool,
    /// Glyph set used for the drawn grid.
    pub(crate) glyphs: Glyphs,
    /// Player tag recorded on the leaderboard after a win.
    pub(crate) player: Option<String>,
    /// Location of the leaderboard file, if one could be resolved.
    pub(crate) leaderboard: Option<PathBuf>,
    /// Obstacle reshuffle tuning.
    pub(crate) reshuffle: ReshuffleConfig,
    /// Seed the reshuffle from the layout seed so games replay exactly.
    pub(crate) replay: bool,
}

/// A running game plus the engine driving it.
pub(crate) struct Session {
    options: Options,
    engine: TurnEngine<Pursuit, Reshuffler>,
    state: GameState,
    moves: u32,
}

impl Session {
    /// Generates the layout for `seed` and opens a session on it.
    pub(crate) fn start(options: Options, seed: u64) -> Result<Self> {
        let state = create_game(seed)
            .with_context(|| format!("failed to generate a layout for seed {seed}"))?;
        Ok(Self::from_state(options, state))
    }

    fn from_state(options: Options, state: GameState) -> Self {
        let engine = build_engine(&options, state.seed());
        Self {
            options,
            engine,
            state,
            moves: 0,
        }
    }

    /// Reads commands until `quit` or end of input. Snapshots go to `out`,
    /// rejections go to `err`.
    pub(crate) fn run<R, W, E>(&mut self, input: R, out: &mut W, err: &mut E) -> Result<()>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        if !self.options.json {
            writeln!(out, "{HELP}\n")?;
        }
        self.show(out)?;

        for line in input.lines() {
            let line = line.context("failed to read command")?;
            match Command::parse(&line) {
                Some(Command::Quit) => break,
                Some(Command::State) => self.show(out)?,
                Some(Command::Help) => writeln!(out, "{HELP}")?,
                Some(Command::NewGame) => {
                    self.restart(crate::random_seed())?;
                    self.show(out)?;
                }
                Some(Command::Scores) => self.show_scores(out, err)?,
                Some(Command::Moves(actor)) => self.show_moves(actor, out)?,
                Some(Command::Move(direction)) => {
                    let outcome = self.engine.apply(&self.state, direction);
                    match outcome.rejection().cloned() {
                        Some(TurnError::GameOver) => {
                            debug!(%direction, "move after the game ended");
                            writeln!(err, "{INVALID_MOVE}")?;
                        }
                        Some(rejection) => writeln!(err, "{rejection}")?,
                        None => {
                            self.moves = self.moves.saturating_add(1);
                            self.state = outcome.into_state();
                            self.show(out)?;
                            if self.state.status() == GameStatus::Won {
                                self.finish(out, err)?;
                            }
                        }
                    }
                }
                None => {
                    debug!(%line, "unrecognised command");
                    writeln!(err, "{INVALID_MOVE}")?;
                }
            }
            out.flush()?;
        }

        Ok(())
    }

    fn restart(&mut self, seed: u64) -> Result<()> {
        info!(seed, "new game");
        let state = create_game(seed)
            .with_context(|| format!("failed to generate a layout for seed {seed}"))?;
        self.engine = build_engine(&self.options, seed);
        self.state = state;
        self.moves = 0;
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.options.json {
            let line = StateDocument::capture(&self.state).to_json_line()?;
            writeln!(out, "{line}")?;
        } else {
            writeln!(out, "{}", render_grid(&self.state, &self.options.glyphs))?;
            writeln!(out, "{}", status_line(&self.state))?;
        }
        Ok(())
    }

    fn finish<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> Result<()> {
        info!(moves = self.moves, seed = self.state.seed(), "game won");
        if !self.options.json {
            if let Some(message) = self.state.message() {
                writeln!(out, "{message}")?;
            }
            writeln!(out, "Moves: {}", self.moves)?;
        }

        let (Some(player), Some(path)) = (&self.options.player, &self.options.leaderboard) else {
            return Ok(());
        };
        let mut board = Leaderboard::load(path);
        if let Err(error) = board.record(player, self.moves) {
            warn!(path = %board.path().display(), "score not saved: {error:#}");
            writeln!(err, "Could not save score: {error:#}")?;
        }
        Ok(())
    }

    fn show_moves<W: Write>(&self, actor: Actor, out: &mut W) -> Result<()> {
        let cells = query::valid_moves(&self.state, actor);
        if self.options.json {
            writeln!(out, "{}", serde_json::to_string(&cells)?)?;
            return Ok(());
        }

        let listed = if cells.is_empty() {
            "none".to_owned()
        } else {
            cells
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(out, "Legal moves for the {actor}: {listed}")?;
        Ok(())
    }

    fn show_scores<W: Write, E: Write>(&self, out: &mut W, err: &mut E) -> Result<()> {
        let Some(path) = &self.options.leaderboard else {
            writeln!(err, "Leaderboard unavailable")?;
            return Ok(());
        };

        let board = Leaderboard::load(path);
        if self.options.json {
            writeln!(out, "{}", serde_json::to_string(board.entries())?)?;
        } else {
            writeln!(out, "{}", board.render())?;
        }
        Ok(())
    }
}

fn build_engine(options: &Options, seed: u64) -> TurnEngine<Pursuit, Reshuffler> {
    let shuffle = if options.replay {
        Reshuffler::seeded(options.reshuffle, seed)
    } else {
        Reshuffler::from_entropy(options.reshuffle)
    };
    TurnEngine::new(Pursuit, shuffle)
}
