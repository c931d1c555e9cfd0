use std::collections::VecDeque;

use crate::Coords;
use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    /// One step in this direction, scaled to the grid.
    pub fn vector(self, grid_size: i32) -> Coords {
        match self {
            Up => (0, -grid_size),
            Down => (0, grid_size),
            Left => (-grid_size, 0),
            Right => (grid_size, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Left | Right)
    }

    pub fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved { new_head: Coords, old_tail: Coords },
    Ate { new_head: Coords },
}

/// Head first. Never empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: VecDeque<Coords>,
    direction: Direction,
    heading: Direction,
}

impl Snake {
    pub fn new(head: Coords, direction: Direction) -> Self {
        Snake { body: VecDeque::from(vec![head]), direction, heading: direction }
    }

    pub fn body(&self) -> &VecDeque<Coords> {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Direction of the last step actually taken.
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Accepts only turns onto the other axis; returns whether it did.
    pub fn set_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction.same_axis(self.heading) {
            return false;
        }

        self.direction = new_direction;
        true
    }

    /// Advances one cell, wrapping at the canvas edges. The tail is kept
    /// when the new head lands on `food`.
    pub fn move_step(&mut self, grid_size: i32, canvas_size: i32, food: Coords) -> MoveResult {
        let (head_x, head_y) = self.head();
        let (dx, dy) = self.direction.vector(grid_size);
        let new_head = (wrap(head_x + dx, canvas_size), wrap(head_y + dy, canvas_size));

        self.heading = self.direction;
        self.body.push_front(new_head);

        if new_head == food {
            return Ate { new_head };
        }

        let old_tail = self.body.pop_back().unwrap_or(new_head);
        Moved { new_head, old_tail }
    }

    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }
}

/// Maps a coordinate that stepped off one edge onto the opposite one.
pub fn wrap(coord: i32, canvas_size: i32) -> i32 {
    coord.rem_euclid(canvas_size)
}

#[cfg(test)]
impl Snake {
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn from_segments(segments: &[Coords], direction: Direction) -> Self {
        assert!(!segments.is_empty());
        Snake { body: segments.iter().copied().collect(), direction, heading: direction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: i32 = 20;
    const CANVAS: i32 = 600;
    const NO_FOOD: Coords = (580, 580);

    #[test]
    fn test_single_step_keeps_length() {
        let mut snake = Snake::new((160, 160), Right);

        let res = snake.move_step(GRID, CANVAS, NO_FOOD);

        assert_eq!(res, Moved { new_head: (180, 160), old_tail: (160, 160) });
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), vec![(180, 160)]);
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut snake = Snake::new((160, 160), Right);

        let res = snake.move_step(GRID, CANVAS, (180, 160));

        assert_eq!(res, Ate { new_head: (180, 160) });
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), (180, 160));
        assert_eq!(snake.body()[1], (160, 160));
    }

    #[test]
    fn test_wraps_on_every_edge() {
        let cases = [
            ((580, 100), Right, (0, 100)),
            ((0, 100), Left, (580, 100)),
            ((100, 0), Up, (100, 580)),
            ((100, 580), Down, (100, 0)),
        ];

        for (start, dir, expected) in cases.iter() {
            let mut snake = Snake::new(*start, *dir);
            snake.move_step(GRID, CANVAS, NO_FOOD);
            assert_eq!(snake.head(), *expected, "moving {:?} from {:?}", dir, start);
            assert_eq!(snake.head().0 % GRID, 0);
            assert_eq!(snake.head().1 % GRID, 0);
        }
    }

    #[test]
    fn test_wrap_keeps_in_bounds_values() {
        assert_eq!(wrap(0, CANVAS), 0);
        assert_eq!(wrap(300, CANVAS), 300);
        assert_eq!(wrap(600, CANVAS), 0);
        assert_eq!(wrap(-20, CANVAS), 580);
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut snake = Snake::new((160, 160), Right);

        assert!(!snake.set_direction(Left));
        assert!(!snake.set_direction(Right));
        assert_eq!(snake.direction(), Right);

        assert!(snake.set_direction(Up));
        assert_eq!(snake.direction(), Up);
    }

    #[test]
    fn test_turn_is_checked_against_heading() {
        let mut snake = Snake::new((160, 160), Right);

        // Up is pending but not yet taken, so Left would still fold back.
        assert!(snake.set_direction(Up));
        assert!(!snake.set_direction(Left));
        assert!(snake.set_direction(Down));

        snake.move_step(GRID, CANVAS, NO_FOOD);
        assert_eq!(snake.heading(), Down);
        assert!(snake.set_direction(Left));
    }

    #[test]
    fn test_self_collision() {
        let coiled = Snake::from_segments(&[(100, 100), (120, 100), (120, 120), (100, 120), (100, 100)], Up);
        assert!(coiled.collides_with_self());

        let straight = Snake::from_segments(&[(100, 100), (80, 100), (60, 100)], Right);
        assert!(!straight.collides_with_self());

        assert!(!Snake::new((0, 0), Right).collides_with_self());
    }
}
