use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{Command, ConfigError, GameConfig, GameSession, SessionState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

pub struct HumanMode {
    session: GameSession,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Commands received since the last frame, in arrival order
    pending_commands: Vec<Command>,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let session = match seed {
            Some(seed) => GameSession::with_seed(config, seed)?,
            None => GameSession::new(config)?,
        };

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_commands: Vec::new(),
        })
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

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let fps = u64::from(self.session.config().frames_per_second);
        let frame_period = Duration::from_millis(1000 / fps).max(Duration::from_millis(1));
        let mut frame_timer = interval(frame_period);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_frame = Instant::now();
        info!(fps, "frame loop started");

        loop {
            tokio::select! {
                // Queue input; it is applied at the start of the next frame
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let elapsed = last_frame.elapsed();
                    last_frame = Instant::now();

                    self.run_frame(elapsed);

                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session.snapshot(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(frames = self.metrics.frames, "quitting");
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Command(command) => self.pending_commands.push(command),
                KeyAction::Quit => self.should_quit = true,
            }
        }
    }

    /// Drain queued input into the session and advance it by one frame
    fn run_frame(&mut self, elapsed: Duration) {
        let before = self.session.state();
        self.metrics.on_frame(elapsed, before);

        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.session.advance(elapsed_ms, self.pending_commands.drain(..));

        match (before, self.session.state()) {
            (SessionState::GameOver, SessionState::Playing) => {
                self.metrics.on_game_start();
            }
            (SessionState::Playing, SessionState::GameOver) => {
                self.metrics.on_game_over();
                debug!(
                    games_played = self.metrics.games_played,
                    play_time = %self.metrics.format_time(),
                    "game finished"
                );
            }
            _ => {}
        }
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
