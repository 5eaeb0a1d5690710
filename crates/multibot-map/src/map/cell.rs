use std::fmt;

use multibot_geometry::{Coordinates, Index};

/// A single occupancy grid cell.
///
/// `idx` is the cell's position in its grid and `coord` its world position;
/// the map keeps `coord == origin + idx * resolution`. Inflation never stores
/// working state on the cell itself.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Grid index of the cell.
    pub idx: Index,
    /// World coordinates of the cell (m).
    pub coord: Coordinates,
    /// Whether the cell is blocked.
    pub occupied: bool,
}

impl Cell {
    /// Creates a cell.
    pub const fn new(idx: Index, coord: Coordinates, occupied: bool) -> Self {
        Self { idx, coord, occupied }
    }

    /// Euclidean distance between the world coordinates of two cells.
    pub fn distance_to(&self, other: &Cell) -> f64 {
        self.coord.distance_to(&other.coord)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.coord, u8::from(self.occupied))
    }
}
