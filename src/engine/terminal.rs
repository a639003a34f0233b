//! Terminal-state detection.
//!
//! Every check here reads the grid in plain board space, so it gives the same
//! answer no matter which perspective a tilt last used.

use super::{can_merge, tilt, Direction, Grid};

/// True iff some tile holds exactly `winning_value`.
pub fn has_winning_tile(grid: &Grid, winning_value: u32) -> bool {
    grid.tiles().any(|t| t.value() == winning_value)
}

/// True iff an empty cell exists or two orthogonal neighbours can merge.
pub fn has_any_move(grid: &Grid) -> bool {
    if grid.count_empty() > 0 {
        return true;
    }
    let size = grid.size();
    for row in 0..size {
        for col in 0..size {
            let Some(tile) = grid.get(col, row) else { continue };
            // East and north neighbours cover every adjacent pair once.
            let neighbours = [grid.get(col + 1, row), grid.get(col, row + 1)];
            if neighbours.into_iter().flatten().any(|other| can_merge(tile.value(), other.value())) {
                return true;
            }
        }
    }
    false
}

/// Winning tile present, or nothing left to do.
pub fn is_game_over(grid: &Grid, winning_value: u32) -> bool {
    has_winning_tile(grid, winning_value) || !has_any_move(grid)
}

/// True if tilting toward `direction` would change the board.
pub fn can_tilt(grid: &Grid, direction: Direction) -> bool {
    let mut probe = grid.clone();
    tilt(&mut probe, direction).changed
}

/// Directions that would change the board, in `Direction::ALL` order.
pub fn legal_directions(grid: &Grid) -> Vec<Direction> {
    Direction::ALL.into_iter().filter(|&dir| can_tilt(grid, dir)).collect()
}
