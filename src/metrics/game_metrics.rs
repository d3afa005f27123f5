use std::time::{Duration, Instant};

/// Per-session numbers shown in the header. Nothing here outlives the process.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Clock stops when the current game ends
    pub clock_running: bool,
    pub best_score: u32,
    pub best_level: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            clock_running: true,
            best_score: 0,
            best_level: 1,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        if self.clock_running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.clock_running = true;
    }

    pub fn on_game_over(&mut self, final_score: u32, final_level: u32) {
        self.update();
        self.clock_running = false;
        self.games_played += 1;
        self.best_score = self.best_score.max(final_score);
        self.best_level = self.best_level.max(final_level);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_best_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(30, 1);
        assert_eq!(metrics.best_score, 30);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(10, 1);
        assert_eq!(metrics.best_score, 30); // Should not decrease
        assert_eq!(metrics.games_played, 2);

        metrics.on_game_over(60, 2);
        assert_eq!(metrics.best_score, 60);
        assert_eq!(metrics.best_level, 2);
        assert_eq!(metrics.games_played, 3);
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut metrics = GameMetrics::new();
        metrics.on_game_over(0, 1);
        let frozen = metrics.elapsed_time;

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);

        metrics.on_game_start();
        assert!(metrics.clock_running);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);
    }
}
