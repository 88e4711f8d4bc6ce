//! Breadth-first reachability over the obstacle grid.

use std::collections::VecDeque;

use crate::{legal_steps, Direction, GameState, Grid, Position, CELL_COUNT};

/// Reports whether `goal` can be reached from `start` through obstacle-free
/// cells using 4-connectivity.
///
/// The search visits each cell at most once, so the cost is bounded by the
/// grid's cell count.
#[must_use]
pub fn path_exists(grid: &Grid, start: Position, goal: Position) -> bool {
    if start == goal {
        return true;
    }

    let mut visited = vec![false; CELL_COUNT];
    let mut queue = VecDeque::new();
    visited[start.index()] = true;
    queue.push_back(start);

    while let Some(cell) = queue.pop_front() {
        for neighbor in Direction::ALL
            .iter()
            .filter_map(|direction| cell.offset(*direction))
        {
            if neighbor == goal {
                return true;
            }

            if grid.is_blocked(neighbor) || visited[neighbor.index()] {
                continue;
            }

            visited[neighbor.index()] = true;
            queue.push_back(neighbor);
        }
    }

    false
}

/// Checks the conditions a freshly generated layout must satisfy: the cat can
/// move somewhere other than the mouse's cell, the mouse can move somewhere
/// other than the cat's cell, and a path connects the two.
#[must_use]
pub fn is_playable(state: &GameState) -> bool {
    let grid = state.grid();
    let cat = state.cat().position();
    let mouse = state.mouse().position();

    !legal_steps(grid, cat, Some(mouse)).is_empty()
        && !legal_steps(grid, mouse, Some(cat)).is_empty()
        && path_exists(grid, cat, mouse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cat, Mouse};

    fn at(row: i32, column: i32) -> Position {
        Position::new(row, column).expect("in bounds")
    }

    #[test]
    fn open_grid_connects_opposite_corners() {
        assert!(path_exists(&Grid::empty(), at(0, 0), at(19, 29)));
    }

    #[test]
    fn wall_severs_the_grid() {
        let wall = (0..20).map(|row| (row, 15));
        let grid = Grid::from_coordinates(wall).expect("valid grid");
        assert!(!path_exists(&grid, at(0, 0), at(0, 29)));
        assert!(path_exists(&grid, at(0, 0), at(19, 14)));
    }

    #[test]
    fn walled_in_mouse_is_not_playable() {
        let grid =
            Grid::from_coordinates([(4, 5), (6, 5), (5, 4), (5, 6)]).expect("valid grid");
        let state = GameState::new(grid, Cat::at(at(0, 0)), Mouse::at(at(5, 5)), 0);
        assert!(!is_playable(&state));
    }

    #[test]
    fn mouse_whose_only_exit_is_the_cat_is_not_playable() {
        let grid = Grid::from_coordinates([(1, 0)]).expect("valid grid");
        let state = GameState::new(grid, Cat::at(at(0, 1)), Mouse::at(at(0, 0)), 0);
        assert!(!is_playable(&state));
    }

    #[test]
    fn open_layout_is_playable() {
        let state = GameState::new(Grid::empty(), Cat::at(at(0, 0)), Mouse::at(at(10, 10)), 0);
        assert!(is_playable(&state));
    }
}
