//! Obstacle layout
//!
//! Walls are a pure function of the level: the layout is rebuilt from
//! scratch whenever it is needed, never patched incrementally.

use std::collections::HashSet;

use super::grid::Grid;
use super::state::{Position, Snake};

/// First level that has any walls
pub const FIRST_WALLED_LEVEL: u32 = 2;
/// Margin kept free along each edge the wall lines run parallel to
const MARGIN: i32 = 5;
/// Gap between consecutive wall cells on a line
const SPACING: usize = 4;
/// Wall lines sit at `OFFSET + level % n`
const OFFSET: i32 = 10;

/// Walls for `level`: a dotted horizontal and a dotted vertical line.
///
/// Cells falling outside `grid` are dropped, so small grids get fewer walls.
pub fn walls_for(level: u32, grid: Grid) -> HashSet<Position> {
    let mut walls = HashSet::new();
    if level < FIRST_WALLED_LEVEL {
        return walls;
    }

    let row = OFFSET + (level % 4) as i32;
    for x in (MARGIN..grid.width_i32().saturating_sub(MARGIN)).step_by(SPACING) {
        walls.insert(Position::new(x, row));
    }

    let col = OFFSET + (level % 5) as i32;
    for y in (MARGIN..grid.height_i32().saturating_sub(MARGIN)).step_by(SPACING) {
        walls.insert(Position::new(col, y));
    }

    walls.retain(|&p| grid.is_in_bounds(p));
    walls
}

/// Walls for `level` minus any cell the snake currently sits on.
pub fn active_walls(level: u32, grid: Grid, snake: &Snake) -> HashSet<Position> {
    let mut walls = walls_for(level, grid);
    let before = walls.len();
    walls.retain(|&p| !snake.occupies(p, true));
    if walls.len() != before {
        log::debug!(
            "Level {}: left out {} wall cell(s) under the snake",
            level,
            before - walls.len()
        );
    }
    walls
}
