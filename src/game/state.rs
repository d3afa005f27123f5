use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
///
/// Segments are stored head first. Right after [`Snake::grow`] the last two
/// segments share a cell; the next [`Snake::advance`] separates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a snake whose body trails behind `head`, opposite to `direction`
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Shift every segment onto its predecessor's cell, then step the head.
    pub fn advance(&mut self, direction: Direction) {
        // Back to front, so each segment still reads its predecessor's old cell.
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].moved_in_direction(direction);
    }

    /// Append a copy of the tail segment
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Membership test, optionally skipping the head
    pub fn occupies(&self, pos: Position, include_head: bool) -> bool {
        let segments = if include_head {
            &self.body[..]
        } else {
            self.body_segments()
        };
        segments.contains(&pos)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.occupies(pos, false)
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the grid
    Boundary,
    /// Head hit an obstacle cell
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// No free cell was left for the next apple
    BoardFull,
}

/// Game state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    GameOver(EndReason),
}

/// Complete game state
///
/// Owned by whoever drives the ticks; the engine only borrows it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Heading used by the next tick
    pub direction: Direction,
    pub walls: HashSet<Position>,
    pub apple: Position,
    pub grid: Grid,
    pub score: u32,
    pub level: u32,
    /// Delay before the next tick should run
    pub tick_interval: Duration,
    /// Cosmetic animation phase in `[0, 2π]`
    pub phase: f32,
    pub steps: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a running level-1 state with no walls
    pub fn new(snake: Snake, apple: Position, grid: Grid, tick_interval: Duration) -> Self {
        Self {
            snake,
            direction: Direction::default(),
            walls: HashSet::new(),
            apple,
            grid,
            score: 0,
            level: 1,
            tick_interval,
            phase: 0.0,
            steps: 0,
            status: GameStatus::Running,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.grid.is_in_bounds(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos, true)
    }

    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }
}
