//! Grid Snake - a levelled Snake game for the terminal
//!
//! This library provides:
//! - Core game logic: movement, collisions, walls, apples, levels (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Session metrics (metrics module)
//! - The interactive tick driver (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
