//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The driver owns a [`GameState`] and hands it to [`GameEngine::step`] once per tick.

pub mod action;
pub mod apple;
pub mod config;
pub mod engine;
pub mod grid;
pub mod state;
pub mod walls;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use apple::place_apple;
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use grid::Grid;
pub use state::{CollisionType, EndReason, GameState, GameStatus, Position, Snake};
pub use walls::{active_walls, walls_for};
