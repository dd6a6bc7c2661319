use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    action::{Command, Direction},
    config::{ConfigError, GameConfig},
    food::Food,
    grid::{Grid, Position},
    snake::{MoveOutcome, Snake},
};

/// Which phase the session is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: SessionState,
    /// Head first
    pub snake_segments: Vec<Position>,
    pub food: Position,
    pub score: u32,
    pub moves_per_second: u32,
    pub heading: Direction,
    pub grid_width: usize,
    pub grid_height: usize,
}

/// Owns the snake and the food and routes input between them.
///
/// The world only advances while `Playing`; paused and finished sessions
/// are frozen until a command moves them on.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    snake: Snake,
    food: Food,
    rng: StdRng,
}

impl GameSession {
    /// Start a session with food placement seeded from the OS
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Start a session whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.grid_width, config.grid_height);
        let snake = Snake::new(&config);
        let food = Food::new(&grid, &snake.occupied_cells(), &mut rng);

        info!(
            width = grid.width(),
            height = grid.height(),
            food = ?food.position(),
            "session started"
        );

        Ok(Self {
            config,
            grid,
            state: SessionState::Playing,
            snake,
            food,
            rng,
        })
    }

    /// Apply this frame's commands in order, then advance the world once.
    pub fn advance<I>(&mut self, elapsed_ms: u64, commands: I)
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.handle_command(command);
        }
        self.tick(elapsed_ms);
    }

    /// Route one command according to the current state.
    ///
    /// Commands that mean nothing in the current state are ignored.
    pub fn handle_command(&mut self, command: Command) {
        match (self.state, command) {
            (SessionState::Playing, Command::Turn(direction)) => {
                self.snake.change_direction(direction);
            }
            (SessionState::Playing, Command::TogglePause) => {
                debug!(score = self.snake.score(), "paused");
                self.state = SessionState::Paused;
            }
            (SessionState::Playing, Command::Restart | Command::Resume) => {}

            // Any input resumes, and is consumed doing so
            (SessionState::Paused, _) => {
                debug!("resumed");
                self.state = SessionState::Playing;
            }

            (SessionState::GameOver, Command::Restart) => self.restart(),
            (SessionState::GameOver, _) => {}
        }
    }

    /// Feed elapsed time to the world. A no-op unless `Playing`.
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.state != SessionState::Playing {
            return;
        }

        if let MoveOutcome::Crashed { at } = self.snake.tick(elapsed_ms) {
            info!(
                score = self.snake.score(),
                length = self.snake.len(),
                at = ?at,
                "game over"
            );
            self.state = SessionState::GameOver;
            return;
        }

        if self.snake.check_food_collision(self.food.position()) {
            let speed_before = self.snake.moves_per_second();

            self.food
                .spawn(&self.grid, &self.snake.occupied_cells(), &mut self.rng);
            self.snake.grow(1);

            debug!(
                score = self.snake.score(),
                food = ?self.food.position(),
                "food eaten"
            );
            if self.snake.moves_per_second() != speed_before {
                info!(moves_per_second = self.snake.moves_per_second(), "speed up");
            }
        }
    }

    /// Replace the snake and food wholesale and resume play
    pub fn restart(&mut self) {
        self.snake = Snake::new(&self.config);
        self.food = Food::new(&self.grid, &self.snake.occupied_cells(), &mut self.rng);
        self.state = SessionState::Playing;
        info!(food = ?self.food.position(), "session restarted");
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            snake_segments: self.snake.segments().collect(),
            food: self.food.position(),
            score: self.snake.score(),
            moves_per_second: self.snake.moves_per_second(),
            heading: self.snake.heading(),
            grid_width: self.grid.width(),
            grid_height: self.grid.height(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &Food {
        &self.food
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
