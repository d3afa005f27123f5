use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{
    action::{Action, Direction},
    apple::place_apple,
    config::GameConfig,
    grid::Grid,
    state::{CollisionType, EndReason, GameState, GameStatus, Position, Snake},
    walls::active_walls,
};

/// Information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the apple this step
    pub ate_apple: bool,
    /// Whether eating the apple moved the game to a new level
    pub level_up: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game is over after this step
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine<R> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<Pcg32> {
    /// Engine with a reproducible random stream
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.config.grid_width, self.config.grid_height)
    }

    /// Build a fresh level-1 game
    pub fn reset(&mut self) -> GameState {
        let grid = self.grid();
        let direction = Direction::default();
        let snake = Snake::new(grid.center(), direction, self.config.initial_snake_length);

        let mut state = GameState::new(
            snake,
            Position::new(0, 0),
            grid,
            self.config.tick_interval_for(1),
        );
        state.walls = active_walls(state.level, grid, &state.snake);
        self.respawn_apple(&mut state);

        log::debug!("New game on a {}x{} grid", grid.width, grid.height);
        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult {
                terminated: true,
                info: StepInfo::default(),
            };
        }

        // Steering (no 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.direction.is_opposite(new_direction) {
                state.direction = new_direction;
            }
        }

        state.snake.advance(state.direction);
        state.steps += 1;
        self.advance_phase(state);

        if let Some(collision_type) = self.check_collision(state) {
            self.end_game(state, EndReason::Collision(collision_type));
            return StepResult {
                terminated: true,
                info: StepInfo {
                    collision_type: Some(collision_type),
                    ..Default::default()
                },
            };
        }

        let mut info = StepInfo::default();
        if state.snake.head() == state.apple {
            info.ate_apple = true;
            info.level_up = self.eat_apple(state);
        }

        StepResult {
            terminated: state.is_game_over(),
            info,
        }
    }

    /// Check whether the head sits somewhere it may not
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !state.is_in_bounds(head) {
            return Some(CollisionType::Boundary);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_wall(head) {
            return Some(CollisionType::Wall);
        }

        None
    }

    /// Grow, score, rescale speed, rebuild walls and respawn the apple.
    /// Returns true if the level changed.
    fn eat_apple(&mut self, state: &mut GameState) -> bool {
        state.snake.grow();
        state.score += self.config.apple_score;

        let level = self.config.level_for_score(state.score);
        let level_up = level != state.level;
        state.level = level;
        state.tick_interval = self.config.tick_interval_for(level);
        state.walls = active_walls(level, state.grid, &state.snake);

        if level_up {
            log::info!(
                "Level {} reached (score {}, tick {:?}, {} wall cells)",
                level,
                state.score,
                state.tick_interval,
                state.walls.len()
            );
        }

        self.respawn_apple(state);
        level_up
    }

    fn respawn_apple(&mut self, state: &mut GameState) {
        match place_apple(
            &mut self.rng,
            state.grid,
            &state.snake,
            &state.walls,
            self.config.max_apple_attempts,
        ) {
            Some(apple) => state.apple = apple,
            None => self.end_game(state, EndReason::BoardFull),
        }
    }

    fn advance_phase(&self, state: &mut GameState) {
        state.phase += self.config.phase_step;
        if state.phase > TAU {
            state.phase = 0.0;
        }
    }

    fn end_game(&self, state: &mut GameState, reason: EndReason) {
        state.status = GameStatus::GameOver(reason);
        log::info!(
            "Game over ({:?}): score {}, level {}, length {}, {} ticks",
            reason,
            state.score,
            state.level,
            state.snake.len(),
            state.steps
        );
    }
}
