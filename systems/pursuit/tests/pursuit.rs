use cat_chase_core::{valid_moves, Actor, Cat, GameState, Grid, Mouse, MousePolicy, Position};
use cat_chase_system_placement::create_game;
use cat_chase_system_pursuit::{choose_mouse_move, score, Pursuit};

fn at(row: i32, column: i32) -> Position {
    Position::new(row, column).expect("in bounds")
}

#[test]
fn mouse_never_closes_the_distance() {
    // Left would bring the mouse next to the cat. The three other moves all
    // reach distance 3 with four exits, so the smallest row wins.
    let state = GameState::new(Grid::empty(), Cat::at(at(10, 8)), Mouse::at(at(10, 10)), 0);

    assert_eq!(choose_mouse_move(&state), Some(at(9, 10)));
}

#[test]
fn ties_on_distance_prefer_more_escape_routes() {
    // Cat at (0, 0), mouse at (1, 1): down to (2, 1) and right to (1, 2) both
    // reach distance 3 with four exits each, so the smaller row wins.
    let state = GameState::new(Grid::empty(), Cat::at(at(0, 0)), Mouse::at(at(1, 1)), 0);
    assert_eq!(choose_mouse_move(&state), Some(at(1, 2)));

    // Walls beside (1, 2) leave it two exits; (2, 1) keeps four and wins.
    let grid = Grid::from_coordinates([(0, 2), (1, 3)]).expect("valid grid");
    let cornered = GameState::new(grid, Cat::at(at(0, 0)), Mouse::at(at(1, 1)), 0);
    assert_eq!(score(&cornered, at(1, 2)).escape_routes, 2);
    assert_eq!(score(&cornered, at(2, 1)).escape_routes, 4);
    assert_eq!(choose_mouse_move(&cornered), Some(at(2, 1)));
}

#[test]
fn remaining_ties_prefer_smallest_row_then_column() {
    // Cat directly above the mouse: down, left and right are equally far with
    // four exits each. Left and right share the smaller row; left has the
    // smaller column.
    let state = GameState::new(Grid::empty(), Cat::at(at(4, 10)), Mouse::at(at(5, 10)), 0);
    assert_eq!(choose_mouse_move(&state), Some(at(5, 9)));

    let grid = Grid::from_coordinates([(5, 9)]).expect("valid grid");
    let blocked = GameState::new(grid, Cat::at(at(4, 10)), Mouse::at(at(5, 10)), 0);
    assert_eq!(choose_mouse_move(&blocked), Some(at(5, 11)));
}

#[test]
fn trapped_mouse_yields_no_move() {
    let grid = Grid::from_coordinates([(1, 0)]).expect("valid grid");
    let state = GameState::new(grid, Cat::at(at(0, 1)), Mouse::at(at(0, 0)), 0);

    assert!(valid_moves(&state, Actor::Mouse).is_empty());
    assert_eq!(choose_mouse_move(&state), None);
}

#[test]
fn choice_is_always_a_valid_move() {
    for seed in [1_u64, 7, 42, 1_000] {
        let state = create_game(seed).expect("seed should produce a playable layout");
        let choice = Pursuit.choose(&state).expect("fresh layouts leave the mouse a move");
        assert!(valid_moves(&state, Actor::Mouse).contains(&choice));
    }
}

#[test]
fn repeated_invocations_agree() {
    for seed in [3_u64, 11, 99] {
        let state = create_game(seed).expect("seed should produce a playable layout");
        let snapshot = state.clone();
        let first = choose_mouse_move(&state);
        let second = choose_mouse_move(&state);
        assert_eq!(first, second);
        assert_eq!(state, snapshot, "the heuristic must not touch the state");
    }
}
