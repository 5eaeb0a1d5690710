//! Occupancy maps, obstacle inflation and the plain containers shared by
//! multi-agent path finding: agent descriptors, safe-interval timelines and
//! per-agent paths.

#![warn(missing_docs)]

pub mod agent;
pub mod error;
pub mod map;
pub mod path;
pub mod time;

pub use agent::Agent;
pub use error::MapError;
pub use map::{BinaryOccupancyMap, Cell, InflationEngine, MapProperty};
pub use path::{Node, PathSet, SinglePath};
pub use time::{TimeInterval, TimeLine};
