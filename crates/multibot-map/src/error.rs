//! This module defines the error types used by the `multibot-map` crate.

#![warn(missing_docs)]

use multibot_geometry::{GeometryError, Index};
use thiserror::Error;

/// Error type for occupancy map operations.
///
/// This enum encapsulates all possible errors that can occur while building an
/// occupancy map or inflating it, such as an invalid radius or out-of-bounds
/// access.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    /// Error for an invalid inflation radius.
    /// This variant is returned when the radius is `NaN` or negative; it carries the radius.
    #[error("Invalid inflation radius: {0}")]
    InvalidInflationRadius(f64),
    /// Error for invalid map metadata.
    /// This variant is returned when the origin is unset, a dimension is zero, or the
    /// resolution is not a positive finite number.
    #[error("Invalid map property: {0}")]
    InvalidProperty(&'static str),
    /// Error for out-of-bounds access.
    /// This variant is returned when an index lies outside the map.
    #[error("Map access out of bounds: {0}")]
    OutOfBounds(Index),
    /// Error for cell data that does not fit the map dimensions.
    #[error("Map data length {actual} does not match map size {expected}")]
    DataSizeMismatch {
        /// Number of cells implied by the map dimensions.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// Error raised by the underlying coordinate algebra.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
