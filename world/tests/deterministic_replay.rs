use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use cat_chase_system_placement::create_game;
use cat_chase_system_pursuit::Pursuit;
use cat_chase_system_reshuffle::{Config, Reshuffler};
use cat_chase_world::{
    Direction, GameState, GameStatus, MousePolicy, NoShuffle, ObstacleShuffle, Position,
    TurnEngine,
};

#[test]
fn seed_alone_replays_without_reshuffling() {
    let first = replay(TurnEngine::new(Pursuit, NoShuffle), 7);
    let second = replay(TurnEngine::new(Pursuit, NoShuffle), 7);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn seeded_reshuffle_replays_identically() {
    let first = replay(
        TurnEngine::new(Pursuit, Reshuffler::seeded(Config::default(), 0x5eed)),
        42,
    );
    let second = replay(
        TurnEngine::new(Pursuit, Reshuffler::seeded(Config::default(), 0x5eed)),
        42,
    );

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn replay_records_every_scripted_move() {
    let outcome = replay(TurnEngine::new(Pursuit, NoShuffle), 3);

    assert!(!outcome.turns.is_empty());
    assert!(outcome.turns.len() <= scripted_moves().len());
    if let Some(position) = outcome
        .turns
        .iter()
        .position(|turn| turn.status == GameStatus::Won)
    {
        assert_eq!(position, outcome.turns.len() - 1, "play stops at the win");
    }
}

fn replay<P, S>(mut engine: TurnEngine<P, S>, seed: u64) -> ReplayOutcome
where
    P: MousePolicy,
    S: ObstacleShuffle,
{
    let mut state = create_game(seed).expect("seed should produce a playable layout");
    let mut turns = Vec::new();

    for direction in scripted_moves() {
        let outcome = engine.apply(&state, direction);
        let accepted = outcome.success();
        state = outcome.into_state();
        turns.push(TurnRecord::capture(direction, accepted, &state));
        if state.status() == GameStatus::Won {
            break;
        }
    }

    ReplayOutcome { turns }
}

fn scripted_moves() -> Vec<Direction> {
    [
        Direction::Up,
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ]
    .into_iter()
    .cycle()
    .take(120)
    .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    turns: Vec<TurnRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct TurnRecord {
    direction: Direction,
    accepted: bool,
    status: GameStatus,
    cat: Position,
    mouse: Position,
    obstacles: Vec<Position>,
}

impl TurnRecord {
    fn capture(direction: Direction, accepted: bool, state: &GameState) -> Self {
        Self {
            direction,
            accepted,
            status: state.status(),
            cat: state.cat().position(),
            mouse: state.mouse().position(),
            obstacles: state.grid().obstacles().iter().copied().collect(),
        }
    }
}
