use std::collections::HashSet;

use crate::Coords;
use crate::snake::Snake;

/// Borrowed view over everything that can sit on a cell.
pub struct Occupancy<'a> {
    snake: &'a Snake,
    obstacles: &'a HashSet<Coords>,
    food: Option<Coords>,
}

impl<'a> Occupancy<'a> {
    pub fn new(snake: &'a Snake, obstacles: &'a HashSet<Coords>, food: Option<Coords>) -> Self {
        Occupancy { snake, obstacles, food }
    }

    /// Same view with food left out, for re-placing the food itself.
    pub fn without_food(&self) -> Self {
        Occupancy { snake: self.snake, obstacles: self.obstacles, food: None }
    }

    pub fn is_occupied(&self, pos: Coords) -> bool {
        self.snake.contains(&pos) || self.obstacles.contains(&pos) || self.food == Some(pos)
    }

    pub fn count(&self) -> usize {
        let food = match self.food {
            Some(pos) if !self.snake.contains(&pos) && !self.obstacles.contains(&pos) => 1,
            _ => 0,
        };
        self.snake.len() + self.obstacles.len() + food
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn reports_snake_obstacles_and_food() {
        let snake = Snake::new((5, 5), 3, Direction::Right);
        let obstacles: HashSet<Coords> = [(2, 2)].iter().copied().collect();
        let occ = Occupancy::new(&snake, &obstacles, Some((7, 7)));

        assert!(occ.is_occupied((5, 3)));
        assert!(occ.is_occupied((2, 2)));
        assert!(occ.is_occupied((7, 7)));
        assert!(!occ.is_occupied((1, 1)));
        assert_eq!(occ.count(), 5);
    }

    #[test]
    fn without_food_frees_the_food_cell() {
        let snake = Snake::new((5, 5), 1, Direction::Up);
        let obstacles = HashSet::new();
        let occ = Occupancy::new(&snake, &obstacles, Some((7, 7)));

        assert!(!occ.without_food().is_occupied((7, 7)));
        assert!(occ.without_food().is_occupied((5, 5)));
    }
}
