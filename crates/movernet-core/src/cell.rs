//! Grid coordinates and cardinal directions.

use serde::{Deserialize, Serialize};

/// A position on the 2D grid. `z` grows northward, `x` grows eastward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub z: i32,
}

impl Cell {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The four cardinal neighbors, always in North, East, South, West
    /// order. Callers that pick the first matching neighbor depend on
    /// this order staying fixed.
    pub fn cardinal_neighbors(&self) -> [Cell; 4] {
        Direction::all().map(|dir| self.offset(dir))
    }

    /// The neighboring cell one step in the given direction.
    pub fn offset(&self, dir: Direction) -> Cell {
        let (dx, dz) = dir.delta();
        Cell::new(self.x + dx, self.z + dz)
    }

    /// Manhattan distance to another cell.
    pub fn manhattan_distance(&self, other: &Cell) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.z - other.z).unsigned_abs()
    }
}

/// Cardinal directions. Mover terrain faces one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All four cardinal directions, in the canonical N, E, S, W order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Grid delta for one step in this direction, as `(dx, dz)`.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// The opposite direction.
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
