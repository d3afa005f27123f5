use std::collections::HashSet;

use rand::Rng;
use rand::seq::IteratorRandom;

use super::grid::Grid;
use super::state::{Position, Snake};

/// Pick a cell that is neither on the snake nor on a wall.
///
/// Draws up to `max_attempts` uniform candidates, then falls back to choosing
/// uniformly among all free cells. Returns `None` only when no cell is free.
pub fn place_apple<R: Rng>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    walls: &HashSet<Position>,
    max_attempts: usize,
) -> Option<Position> {
    let is_free = |pos: &Position| !snake.occupies(*pos, true) && !walls.contains(pos);

    for _ in 0..max_attempts {
        let x = rng.gen_range(0..grid.width_i32());
        let y = rng.gen_range(0..grid.height_i32());
        let pos = Position::new(x, y);

        if is_free(&pos) {
            return Some(pos);
        }
    }

    log::debug!(
        "Apple placement fell back to scanning after {} attempts",
        max_attempts
    );
    grid.cells().filter(is_free).choose(rng)
}
