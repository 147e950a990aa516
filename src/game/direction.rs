/// Direction the snake can move
///
/// Coordinates are y-up, so `Up` increases `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for one move of `step` units in this direction
    pub fn delta(&self, step: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, step),
            Direction::Down => (0, -step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        }
    }
}
