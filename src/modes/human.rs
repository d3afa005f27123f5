use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand_pcg::Pcg32;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, interval, interval_at};

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive play: owns the single game state and drives its ticks.
pub struct HumanMode {
    engine: GameEngine<Pcg32>,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Latest steering input since the last tick
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut engine = GameEngine::seeded(config, seed);
        let state = engine.reset();
        log::info!("Starting game with seed {}", seed);

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = self.new_tick_timer();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.on_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    self.on_tick(&mut tick_timer);
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Timer whose first tick lands one tick interval from now
    fn new_tick_timer(&self) -> Interval {
        let period = self.state.tick_interval;
        interval_at(Instant::now() + period, period)
    }

    /// Run one game tick, then schedule the next one with the interval the
    /// tick left behind (it shrinks as the level rises).
    fn on_tick(&mut self, tick_timer: &mut Interval) {
        self.update_game();
        tick_timer.reset_after(self.state.tick_interval);
    }

    /// Handle input; a fresh game also restarts the tick schedule.
    fn on_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if self.handle_event(event) {
            tick_timer.reset_after(self.state.tick_interval);
        }
    }

    /// Returns true if the game was reset
    fn handle_event(&mut self, event: Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if self.state.is_running() {
                    self.pending_direction = Some(direction);
                }
            }
            KeyAction::Restart => {
                if self.state.is_game_over() {
                    self.reset_game();
                    return true;
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
        false
    }

    fn update_game(&mut self) {
        let action = Action::from(self.pending_direction.take());
        let was_running = self.state.is_running();

        self.engine.step(&mut self.state, action);

        if was_running && self.state.is_game_over() {
            self.metrics.on_game_over(self.state.score, self.state.level);
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.metrics.on_game_start();
        self.pending_direction = None;
        log::info!("Game reset (best score this session: {})", self.metrics.best_score);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CollisionType, EndReason, GameStatus, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mode() -> HumanMode {
        let mut mode = HumanMode::new(GameConfig::default(), 11);
        mode.state.apple = Position::new(0, 0);
        mode
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.state.is_running());
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_last_direction_wins_between_ticks() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.pending_direction, Some(Direction::Down));

        let head = mode.state.snake.head();
        mode.update_game();

        assert_eq!(mode.state.direction, Direction::Down);
        assert_eq!(mode.state.snake.head(), head.moved_in_direction(Direction::Down));
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_quick_double_turn_cannot_reverse() {
        let mut mode = mode();
        // Up then Left before the tick: only Left reaches the engine, which rejects it
        mode.handle_event(key(KeyCode::Up));
        mode.handle_event(key(KeyCode::Left));
        mode.update_game();

        assert!(mode.state.is_running());
        assert_eq!(mode.state.direction, Direction::Right);
    }

    #[test]
    fn test_restart_ignored_while_running() {
        let mut mode = mode();
        mode.update_game();
        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.state.steps, 1);
    }

    #[test]
    fn test_game_reset() {
        let mut mode = mode();
        mode.state.score = 10;
        mode.state.status = GameStatus::GameOver(EndReason::Collision(CollisionType::Wall));

        mode.handle_event(key(KeyCode::F(1)));

        assert_eq!(mode.state.score, 0);
        assert!(mode.state.is_running());
    }

    #[test]
    fn test_steering_ignored_after_game_over() {
        let mut mode = mode();
        mode.state.status = GameStatus::GameOver(EndReason::Collision(CollisionType::Boundary));
        mode.handle_event(key(KeyCode::Up));
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_game_over_recorded_once() {
        let mut mode = mode();
        mode.state.snake.body[0] = Position::new(39, 15);
        mode.state.snake.body[1] = Position::new(38, 15);
        mode.state.snake.body[2] = Position::new(37, 15);

        mode.update_game();
        mode.update_game();

        assert!(mode.state.is_game_over());
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_tick_uses_interval_after_level_up() {
        let mut mode = mode();
        mode.state.score = 40;
        mode.state.apple = mode.state.snake.head().moved_in_direction(Direction::Right);
        let mut tick_timer = mode.new_tick_timer();

        let start = Instant::now();
        tick_timer.tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(100));

        // Fifth apple: level 2
        mode.on_tick(&mut tick_timer);
        assert_eq!(mode.state.level, 2);

        let eaten_at = Instant::now();
        tick_timer.tick().await;
        assert_eq!(eaten_at.elapsed(), Duration::from_millis(95));
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_rearms_tick_timer_with_base_interval() {
        let mut mode = mode();
        mode.state.tick_interval = Duration::from_millis(40);
        mode.state.status = GameStatus::GameOver(EndReason::Collision(CollisionType::Wall));
        let mut tick_timer = mode.new_tick_timer();

        tokio::time::advance(Duration::from_millis(30)).await;
        let restarted_at = Instant::now();
        mode.on_event(key(KeyCode::Char('r')), &mut tick_timer);
        assert!(mode.state.is_running());

        tick_timer.tick().await;
        assert_eq!(restarted_at.elapsed(), Duration::from_millis(100));
    }
}
