use anyhow::{Context, Result, bail};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{DistanceField, GameConfig, GameEngine, GameState, StepStatus};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Keyboard-driven game session in the terminal
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    field: DistanceField,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    show_distances: bool,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(config.tile_size);
        let show_distances = config.show_distances;
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        let field = engine.distance_field(&state);

        Self {
            engine,
            state,
            field,
            metrics: GameMetrics::new(),
            renderer,
            input_handler: InputHandler::new(),
            show_distances,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.check_terminal_size()?;

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = match Self::open_terminal() {
            Ok(terminal) => terminal,
            Err(err) => {
                // Leave the shell usable even if the screen never came up
                let mut stderr = stderr();
                let _ = execute!(stderr, LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(err);
            }
        };

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    fn open_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    /// Refuse to start on a terminal that cannot show the whole board
    fn check_terminal_size(&self) -> Result<()> {
        let config = self.engine.config();
        let (columns, rows) = crossterm::terminal::size().context("Failed to query terminal size")?;
        let (needed_columns, needed_rows) =
            Renderer::required_size(config.board_size, config.tile_size);

        if columns < needed_columns || rows < needed_rows {
            bail!(
                "terminal is {columns}x{rows} but a {0}x{0} board with tile size {1} needs {needed_columns}x{needed_rows}",
                config.board_size,
                config.tile_size
            );
        }

        Ok(())
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    if self.state.is_alive() {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(
                            frame,
                            &self.state,
                            &self.field,
                            &self.metrics,
                            self.show_distances,
                        );
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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if !self.state.is_alive() {
                    return;
                }
                if !self.state.snake.set_direction(direction) {
                    debug!("ignored reversal to {direction:?}");
                }
            }
            KeyAction::ToggleDistances => {
                self.show_distances = !self.show_distances;
            }
            KeyAction::Restart => self.reset_game(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if !self.state.is_alive() {
            return;
        }

        let result = self.engine.step(&mut self.state, &mut self.field);

        if result.ate_food {
            self.metrics.on_snake_grew(self.state.snake.len());
        }

        if result.status != StepStatus::Continue {
            if let Some(cause) = self.state.collision {
                self.metrics.on_game_over(self.state.score, cause);
            }
        }
    }

    fn reset_game(&mut self) {
        self.state = self.engine.reset();
        self.field = self.engine.distance_field(&self.state);
        self.metrics.on_game_start();
        info!("game restarted");
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
