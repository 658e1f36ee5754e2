/// Index of a module inside the catalog of a `Wave`.
pub type ModuleId = usize;

/// Flat, row-major index of a slot: `x + y * width`.
pub type FlatIndex = usize;

/// The four axis-aligned neighbor directions of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards `y - 1`
    Up,
    /// Towards `y + 1`
    Down,
    /// Towards `x - 1`
    Left,
    /// Towards `x + 1`
    Right,
}

impl Direction {
    /// All directions, in the order propagation visits them.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Position of the direction in `ALL`, used to index per-direction arrays.
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// `(dx, dy)` step taken when moving one slot in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}
