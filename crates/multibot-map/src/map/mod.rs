//! Map-related functionality: grid metadata, cells, the binary occupancy map
//! and obstacle inflation.

mod cell;
pub mod inflation;
mod occupancy;
mod property;

pub use cell::Cell;
pub use inflation::InflationEngine;
pub use occupancy::BinaryOccupancyMap;
pub use property::MapProperty;
