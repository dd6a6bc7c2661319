use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Toroidal coordinate space: leaving one edge re-enters on the opposite one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// Dimensions are clamped into `1..=i32::MAX`; `GameConfig::validate`
    /// keeps session grids well inside that range.
    pub fn new(width: usize, height: usize) -> Self {
        debug_assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX).max(1),
            height: i32::try_from(height).unwrap_or(i32::MAX).max(1),
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Reduce both axes modulo the grid extent, however far out of range.
    pub fn wrap(&self, pos: Position) -> Position {
        Position::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    /// Every cell, row by row.
    pub fn all_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_wrap_single_step_past_edges() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.wrap(Position::new(-1, 3)), Position::new(9, 3));
        assert_eq!(grid.wrap(Position::new(10, 3)), Position::new(0, 3));
        assert_eq!(grid.wrap(Position::new(4, -1)), Position::new(4, 7));
        assert_eq!(grid.wrap(Position::new(4, 8)), Position::new(4, 0));
    }

    #[test]
    fn test_wrap_far_out_of_range() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.wrap(Position::new(-21, 17)), Position::new(9, 1));
        assert_eq!(grid.wrap(Position::new(1005, -800)), Position::new(5, 0));
    }

    #[test]
    fn test_wrap_in_range_and_idempotent() {
        let grid = Grid::new(7, 5);
        for x in -30..30 {
            for y in -30..30 {
                let wrapped = grid.wrap(Position::new(x, y));
                assert!(grid.contains(wrapped), "{wrapped:?} out of range");
                assert_eq!(grid.wrap(wrapped), wrapped);
            }
        }
    }

    #[test]
    fn test_all_positions() {
        let grid = Grid::new(3, 2);
        let cells: Vec<Position> = grid.all_positions().collect();
        assert_eq!(cells.len(), grid.cell_count());
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[3], Position::new(0, 1));
        assert!(cells.iter().all(|p| grid.contains(*p)));
    }

    #[test]
    fn test_huge_dimensions_do_not_truncate() {
        let grid = Grid::new(1usize << 32, 10);
        assert_eq!(grid.width(), i32::MAX as usize);
        assert_eq!(grid.wrap(Position::new(-1, 0)), Position::new(i32::MAX - 1, 0));
    }

    #[test]
    fn test_center() {
        assert_eq!(Grid::new(50, 50).center(), Position::new(25, 25));
        assert_eq!(Grid::new(5, 3).center(), Position::new(2, 1));
    }
}
