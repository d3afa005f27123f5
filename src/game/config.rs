use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Largest grid side accepted by [`GameConfig::validate`]
pub const MAX_GRID_SIDE: usize = 1000;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    // Speed
    /// Tick interval at level 1, in milliseconds
    pub base_tick_ms: u64,
    /// Lower bound for the tick interval, in milliseconds
    pub min_tick_ms: u64,
    /// How much faster each level ticks, in milliseconds
    pub tick_step_ms: u64,

    // Scoring
    /// Points awarded per apple
    pub apple_score: u32,
    /// Points needed to advance one level
    pub score_per_level: u32,

    /// Cosmetic phase advance per running tick
    pub phase_step: f32,
    /// Random draws before apple placement falls back to scanning free cells
    pub max_apple_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 30,
            initial_snake_length: 3,
            base_tick_ms: 100,
            min_tick_ms: 40,
            tick_step_ms: 5,
            apple_score: 10,
            score_per_level: 50,
            phase_step: 0.05,
            max_apple_attempts: 1024,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::info!("Loaded game config from {}", path.display());
        Ok(config)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_width > 0 && self.grid_height > 0,
            "grid must be at least 1x1 (got {}x{})",
            self.grid_width,
            self.grid_height
        );
        ensure!(
            self.grid_width <= MAX_GRID_SIDE && self.grid_height <= MAX_GRID_SIDE,
            "grid sides are limited to {} cells (got {}x{})",
            MAX_GRID_SIDE,
            self.grid_width,
            self.grid_height
        );
        ensure!(self.initial_snake_length > 0, "initial snake length must be positive");
        // The snake is laid out leftwards from the centre column.
        ensure!(
            self.initial_snake_length <= self.grid_width / 2 + 1,
            "initial snake length {} does not fit a grid {} cells wide",
            self.initial_snake_length,
            self.grid_width
        );
        ensure!(self.score_per_level > 0, "score_per_level must be positive");
        ensure!(
            self.min_tick_ms <= self.base_tick_ms,
            "min_tick_ms ({}) exceeds base_tick_ms ({})",
            self.min_tick_ms,
            self.base_tick_ms
        );
        Ok(())
    }

    /// Level reached with the given score, starting at 1
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.score_per_level + 1
    }

    /// Delay between ticks at the given level, floored at `min_tick_ms`
    pub fn tick_interval_for(&self, level: u32) -> Duration {
        let speedup = u64::from(level.saturating_sub(1)).saturating_mul(self.tick_step_ms);
        let ms = self.base_tick_ms.saturating_sub(speedup).max(self.min_tick_ms);
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.initial_snake_length, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 15);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 15);
        assert_eq!(config.apple_score, 10);
    }

    #[test]
    fn test_level_for_score() {
        let config = GameConfig::default();
        assert_eq!(config.level_for_score(0), 1);
        assert_eq!(config.level_for_score(10), 1);
        assert_eq!(config.level_for_score(49), 1);
        assert_eq!(config.level_for_score(50), 2);
        assert_eq!(config.level_for_score(120), 3);
    }

    #[test]
    fn test_tick_interval_scaling() {
        let config = GameConfig::default();
        assert_eq!(config.tick_interval_for(1), Duration::from_millis(100));
        assert_eq!(config.tick_interval_for(2), Duration::from_millis(95));
        assert_eq!(config.tick_interval_for(12), Duration::from_millis(45));
        assert_eq!(config.tick_interval_for(13), Duration::from_millis(40));
        // Floored
        assert_eq!(config.tick_interval_for(14), Duration::from_millis(40));
        assert_eq!(config.tick_interval_for(1000), Duration::from_millis(40));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        assert!(GameConfig::new(0, 10).validate().is_err());
        assert!(GameConfig::new(3, 10).validate().is_err()); // snake of 3 needs width >= 4
        assert!(GameConfig::new(3_000_000_000, 30).validate().is_err());
        assert!(GameConfig::new(40, MAX_GRID_SIDE + 1).validate().is_err());
        assert!(GameConfig::new(MAX_GRID_SIDE, MAX_GRID_SIDE).validate().is_ok());

        let config = GameConfig {
            min_tick_ms: 200,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            score_per_level: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "grid_width": 20, "base_tick_ms": 150 }"#).unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.base_tick_ms, 150);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.min_tick_ms, 40);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("grid_snake_cfg_{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "grid_height": 12 }"#).unwrap();

        let config = GameConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.grid_height, 12);
        assert_eq!(config.grid_width, 40);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = GameConfig::load("/definitely/not/here/grid_snake.json");
        assert!(result.is_err());
    }
}
