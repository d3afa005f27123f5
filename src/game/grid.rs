use super::state::Position;

/// The fixed playing field `[0, width) x [0, height)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Width in coordinate space, saturating at `i32::MAX`
    pub fn width_i32(&self) -> i32 {
        to_coord(self.width)
    }

    /// Height in coordinate space, saturating at `i32::MAX`
    pub fn height_i32(&self) -> i32 {
        to_coord(self.height)
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        usize::try_from(pos.x).is_ok_and(|x| x < self.width)
            && usize::try_from(pos.y).is_ok_and(|y| y < self.height)
    }

    /// Centre cell, rounding towards the bottom-right like integer division does
    pub fn center(&self) -> Position {
        Position::new(to_coord(self.width / 2), to_coord(self.height / 2))
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Position> + use<> {
        let width = self.width_i32();
        (0..self.height_i32()).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }
}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
