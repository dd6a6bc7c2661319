use std::collections::{HashSet, VecDeque};

use super::{
    action::Direction,
    config::GameConfig,
    grid::{Grid, Position},
};

/// Result of feeding elapsed time to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Not enough time has accumulated for a move
    Waiting,
    /// The snake advanced one cell
    Moved { new_head: Position, grew: bool },
    /// The move ran the head into the body; the snake is now dead
    Crashed { at: Position },
    /// The snake was already dead, nothing happened
    Dead,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Direction used for the most recent move
    heading: Direction,
    /// Latest accepted turn, committed on the next move
    pending_heading: Direction,
    /// Moves left during which the tail stays put
    pending_growth: u32,
    score: u32,
    moves_per_second: u32,
    move_accumulator_ms: u64,
    alive: bool,
    grid: Grid,
    score_per_food: u32,
    speedup_every: u32,
    max_moves_per_second: u32,
}

impl Snake {
    /// Snake centered on the grid, heading right
    pub fn new(config: &GameConfig) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        Self::spawn_at(config, grid.center(), Direction::Right)
    }

    /// Create a snake whose remaining segments trail behind `head`
    pub fn spawn_at(config: &GameConfig, head: Position, direction: Direction) -> Self {
        let grid = Grid::new(config.grid_width, config.grid_height);
        let (dx, dy) = direction.delta();
        let body = (0..config.initial_snake_length.max(1) as i32)
            .map(|i| grid.wrap(head.moved_by(-dx * i, -dy * i)))
            .collect();

        Self {
            body,
            heading: direction,
            pending_heading: direction,
            pending_growth: 0,
            score: 0,
            moves_per_second: config.initial_moves_per_second,
            move_accumulator_ms: 0,
            alive: true,
            grid,
            score_per_food: config.score_per_food,
            speedup_every: config.speedup_every,
            max_moves_per_second: config.max_moves_per_second,
        }
    }

    /// Buffer a turn for the next move.
    ///
    /// A turn straight back onto the committed heading is dropped. Later
    /// calls before the next move replace earlier ones.
    pub fn change_direction(&mut self, direction: Direction) {
        if !direction.is_opposite(self.heading) {
            self.pending_heading = direction;
        }
    }

    /// Advance the move clock, making at most one move.
    ///
    /// Time beyond the move delay is dropped rather than carried over.
    pub fn tick(&mut self, elapsed_ms: u64) -> MoveOutcome {
        if !self.alive {
            return MoveOutcome::Dead;
        }

        self.move_accumulator_ms = self.move_accumulator_ms.saturating_add(elapsed_ms);
        if self.move_accumulator_ms < self.move_delay_ms() {
            return MoveOutcome::Waiting;
        }
        self.move_accumulator_ms = 0;

        self.heading = self.pending_heading;
        let new_head = self.grid.wrap(self.head().moved_in_direction(self.heading));

        // The tail cell is excluded: it is vacated by this very move
        let keep = self.body.len() - 1;
        if self.body.iter().take(keep).any(|segment| *segment == new_head) {
            self.alive = false;
            return MoveOutcome::Crashed { at: new_head };
        }

        self.body.push_front(new_head);

        let grew = self.pending_growth > 0;
        if grew {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }

        MoveOutcome::Moved { new_head, grew }
    }

    /// Queue `amount` extra segments and score one food item.
    pub fn grow(&mut self, amount: u32) {
        self.pending_growth += amount;

        let before = self.score;
        self.score += self.score_per_food;

        if self.score / self.speedup_every > before / self.speedup_every {
            self.moves_per_second = (self.moves_per_second + 1).min(self.max_moves_per_second);
        }
    }

    pub fn check_food_collision(&self, food: Position) -> bool {
        self.head() == food
    }

    /// Milliseconds between moves at the current speed
    pub fn move_delay_ms(&self) -> u64 {
        1000 / u64::from(self.moves_per_second)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.segments().collect()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    pub fn pending_growth(&self) -> u32 {
        self.pending_growth
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_per_second(&self) -> u32 {
        self.moves_per_second
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
