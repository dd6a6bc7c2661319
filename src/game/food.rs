use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use super::grid::{Grid, Position};

/// The single piece of food on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    /// Place food on a random cell not in `occupied`.
    pub fn new<R: Rng + ?Sized>(grid: &Grid, occupied: &HashSet<Position>, rng: &mut R) -> Self {
        let mut food = Self {
            position: Position::new(0, 0),
        };
        food.spawn(grid, occupied, rng);
        food
    }

    pub fn at(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the food to a uniformly chosen free cell.
    ///
    /// When every cell is occupied the food lands on any cell, possibly on
    /// the snake itself.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        occupied: &HashSet<Position>,
        rng: &mut R,
    ) {
        let available: Vec<Position> = grid
            .all_positions()
            .filter(|pos| !occupied.contains(pos))
            .collect();

        self.position = match available.choose(rng) {
            Some(pos) => *pos,
            None => Position::new(
                rng.gen_range(0..grid.width()) as i32,
                rng.gen_range(0..grid.height()) as i32,
            ),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_spawn_avoids_occupied() {
        let grid = Grid::new(4, 4);
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<Position> = grid.all_positions().take(12).collect();

        let mut food = Food::at(Position::new(0, 0));
        for _ in 0..100 {
            food.spawn(&grid, &occupied, &mut rng);
            assert!(!occupied.contains(&food.position()));
            assert!(grid.contains(food.position()));
        }
    }

    #[test]
    fn test_spawn_single_free_cell() {
        let grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(1);
        let free = Position::new(2, 1);
        let occupied: HashSet<Position> = grid.all_positions().filter(|p| *p != free).collect();

        let food = Food::new(&grid, &occupied, &mut rng);
        assert_eq!(food.position(), free);
    }

    #[test]
    fn test_spawn_full_grid_falls_back_to_any_cell() {
        let grid = Grid::new(3, 3);
        let mut rng = StdRng::seed_from_u64(3);
        let occupied: HashSet<Position> = grid.all_positions().collect();

        let mut food = Food::at(Position::new(0, 0));
        for _ in 0..20 {
            food.spawn(&grid, &occupied, &mut rng);
            assert!(grid.contains(food.position()));
        }
    }

    #[test]
    fn test_spawn_is_deterministic_for_a_seed() {
        let grid = Grid::new(20, 20);
        let occupied = HashSet::new();

        let a = Food::new(&grid, &occupied, &mut StdRng::seed_from_u64(42));
        let b = Food::new(&grid, &occupied, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
