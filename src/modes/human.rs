use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::game::{ConfigError, GameConfig, GameState, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

/// Interactive play in the terminal
pub struct HumanMode {
    state: GameState,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Convenience for an entropy-seeded game
    pub fn with_config(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(GameState::new(config)?))
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = restore_on_error(Self::setup_terminal(), || {
            // Already failing; the setup error is the one worth reporting.
            let _ = execute!(stderr(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        log::info!(
            "Session finished: {} games, best score {}",
            self.stats.games_played,
            self.stats.best_score
        );

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Raw mode delivers Ctrl+C as a key; this catches SIGINT sent from elsewhere.
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let tick_interval = Duration::from_millis(self.state.config().tick_interval_ms);
        let mut tick_timer = interval_at(Instant::now() + tick_interval, tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.draw(terminal)?;

        loop {
            let redraw = tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(err).context("Failed to read terminal event");
                        }
                        None => {
                            self.should_quit = true;
                            false
                        }
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                    true
                }

                // Handle Ctrl+C
                _ = &mut ctrl_c => {
                    self.should_quit = true;
                    false
                }
            };

            if self.should_quit {
                break;
            }

            if redraw {
                self.draw(terminal)?;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.stats.update();
        let snapshot = self.state.snapshot();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.stats);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    /// Apply one terminal event; returns whether the screen needs a redraw
    fn handle_event(&mut self, event: Event) -> bool {
        let key = match event {
            Event::Key(key) => key,
            Event::Resize(..) => return true,
            _ => return false,
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match self.input_handler.handle_key_event(key, self.state.phase()) {
            KeyAction::Turn(direction) => {
                self.state.set_direction(direction);
                false
            }
            KeyAction::Restart => {
                self.reset_game();
                true
            }
            KeyAction::Quit => {
                self.should_quit = true;
                false
            }
            KeyAction::None => false,
        }
    }

    fn update_game(&mut self) -> TickOutcome {
        let outcome = self.state.update();
        self.stats.record(outcome, self.state.score);
        outcome
    }

    fn reset_game(&mut self) {
        self.state.reset();
        self.stats.on_game_start();
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

/// Run `restore` before handing back a failed result
fn restore_on_error<T>(result: Result<T>, restore: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Phase, Position};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        HumanMode::new(GameState::seeded(GameConfig::default(), 7).unwrap())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn crash(mode: &mut HumanMode) {
        mode.state.food = Position::new(0, 0);
        mode.handle_event(key(KeyCode::Up));
        while mode.state.phase() == Phase::Playing {
            mode.update_game();
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.phase(), Phase::Playing);
        assert_eq!(mode.state.score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_turn_key_sets_direction() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.state.direction(), Direction::Down);

        // Reverse of the current heading is dropped.
        mode.handle_event(key(KeyCode::Left));
        assert_eq!(mode.state.direction(), Direction::Down);
    }

    #[test]
    fn test_game_over_counts_and_restart() {
        let mut mode = mode();
        crash(&mut mode);
        assert_eq!(mode.stats.games_played, 1);

        // Movement keys do nothing until restart.
        mode.handle_event(key(KeyCode::Down));
        assert_eq!(mode.state.phase(), Phase::GameOver);

        assert!(mode.handle_event(key(KeyCode::Char('r'))));
        assert_eq!(mode.state.phase(), Phase::Playing);
        assert_eq!(mode.state.score, 0);
        assert_eq!(mode.state.snake.len(), 3);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut mode = mode();
        mode.state.food = Position::new(0, 0);
        mode.update_game();
        let head = mode.state.snake.head();

        assert!(!mode.handle_event(key(KeyCode::Char('r'))));
        assert_eq!(mode.state.snake.head(), head);
    }

    #[test]
    fn test_failed_setup_restores_terminal() {
        let mut restored = false;
        let result: Result<()> =
            restore_on_error(Err(anyhow::anyhow!("no tty")), || restored = true);
        assert!(result.is_err());
        assert!(restored);

        let mut restored = false;
        let result = restore_on_error(Ok(5), || restored = true);
        assert_eq!(result.unwrap(), 5);
        assert!(!restored);
    }

    #[test]
    fn test_with_config_rejects_invalid_config() {
        let config = GameConfig {
            step_size: 0,
            ..Default::default()
        };
        assert!(HumanMode::with_config(config).is_err());
        assert!(HumanMode::with_config(GameConfig::default()).is_ok());
    }

    #[test]
    fn test_ctrl_c_key_quits() {
        let mut mode = mode();
        mode.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
