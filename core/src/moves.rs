//! Legal-move validation shared by the engine, the mouse policy and placement.

use crate::{Actor, Direction, GameState, Grid, Position};

/// Orthogonal neighbours of `from` that lie on the grid, hold no obstacle and
/// differ from `exclude`, listed in up, down, left, right order.
#[must_use]
pub fn legal_steps(grid: &Grid, from: Position, exclude: Option<Position>) -> Vec<Position> {
    Direction::ALL
        .iter()
        .filter_map(|direction| from.offset(*direction))
        .filter(|cell| !grid.is_blocked(*cell))
        .filter(|cell| Some(*cell) != exclude)
        .collect()
}

/// Computes the cells the actor may step onto from its current position.
///
/// The mouse may never step onto the cat, so the cat's cell is excluded for
/// it. The cat gets no such exclusion: stepping onto the mouse is a catch,
/// which the turn engine resolves.
#[must_use]
pub fn valid_moves(state: &GameState, actor: Actor) -> Vec<Position> {
    let exclude = match actor {
        Actor::Cat => None,
        Actor::Mouse => Some(state.cat().position()),
    };
    legal_steps(state.grid(), state.position_of(actor), exclude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cat, Mouse};

    fn at(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("in bounds")
    }

    #[test]
    fn moves_are_listed_in_canonical_order() {
        let state = GameState::new(Grid::empty(), Cat::at(at(5, 5)), Mouse::at(at(10, 10)), 0);
        assert_eq!(
            valid_moves(&state, Actor::Cat),
            vec![at(4, 5), at(6, 5), at(5, 4), at(5, 6)]
        );
    }

    #[test]
    fn corner_and_obstacles_prune_candidates() {
        let grid = Grid::from_coordinates([(0, 1)]).expect("valid grid");
        let state = GameState::new(grid, Cat::at(at(0, 0)), Mouse::at(at(10, 10)), 0);
        assert_eq!(valid_moves(&state, Actor::Cat), vec![at(1, 0)]);
    }

    #[test]
    fn mouse_never_steps_onto_the_cat() {
        let state = GameState::new(Grid::empty(), Cat::at(at(5, 6)), Mouse::at(at(5, 5)), 0);
        let mouse_moves = valid_moves(&state, Actor::Mouse);
        assert!(!mouse_moves.contains(&at(5, 6)));
        assert_eq!(mouse_moves, vec![at(4, 5), at(6, 5), at(5, 4)]);

        let cat_moves = valid_moves(&state, Actor::Cat);
        assert!(cat_moves.contains(&at(5, 5)), "the cat may step onto the mouse");
    }
}
