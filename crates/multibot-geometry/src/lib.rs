#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library of planar geometry primitives for multi-robot path finding."]
#![doc = ""]
#![doc = "This crate provides grid indices, world coordinates with vector algebra, and planar"]
#![doc = "poses, together with the distance and heading-difference functions used by the"]
#![doc = "occupancy map and its inflation engine."]

use core::f64::consts::PI;
use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};
use libm::{fabs, fmod, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::GeometryError;

/// Absolute per-axis tolerance used by [`Coordinates`] equality.
pub const COORDINATE_EPSILON: f64 = 1e-8;

/// Divisors with a magnitude below this value are rejected by
/// [`Coordinates::checked_div`].
pub const DIVISION_EPSILON: f64 = 1e-8;

/// Tolerance applied when folding a heading difference into `[0, PI]`.
pub const ANGLE_EPSILON: f64 = 1e-8;

/// A cell index `(column, row)` in an occupancy grid.
///
/// The default value `(-1, -1)` lies outside every grid and marks an index
/// that has not been assigned yet.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Index {
    /// Column of the cell.
    pub x: i32,
    /// Row of the cell.
    pub y: i32,
}

impl Index {
    /// Construct a new index.
    pub const fn new(x: i32, y: i32) -> Self {
        Index { x, y }
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::new(-1, -1)
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}][{}]", self.x, self.y)
    }
}

/// A point or vector `(x, y)` in world coordinates (m).
///
/// Equality is tolerant: two coordinates are equal when both axes differ by at
/// most [`COORDINATE_EPSILON`]; an axis holding `NaN` never compares equal.
/// The default value is *unset* (`NaN` on both axes) and must not be mistaken
/// for the origin; use [`Coordinates::ORIGIN`] for that.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy)]
pub struct Coordinates {
    /// World‑frame x component (m).
    pub x: f64,
    /// World‑frame y component (m).
    pub y: f64,
}

impl Coordinates {
    /// The world origin `(0, 0)`.
    pub const ORIGIN: Coordinates = Coordinates::new(0.0, 0.0);

    /// Construct new coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Coordinates { x, y }
    }

    /// Returns `true` when neither axis is `NaN`.
    pub fn is_set(&self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }

    /// Euclidean norm of the vector.
    pub fn norm(&self) -> f64 {
        sqrt(self.x * self.x + self.y * self.y)
    }

    /// Dot product with `other`.
    pub fn dot(&self, other: &Coordinates) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar (z‑component) cross product with `other`.
    pub fn cross(&self, other: &Coordinates) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean distance between `self` and `other`.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        let delta_x = self.x - other.x;
        let delta_y = self.y - other.y;
        sqrt(delta_x * delta_x + delta_y * delta_y)
    }

    /// Divide both axes by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::DivisionByZero)` if `|divisor|` is below
    /// [`DIVISION_EPSILON`] (or `divisor` is `NaN`).
    pub fn checked_div(self, divisor: f64) -> Result<Coordinates, GeometryError> {
        if !(fabs(divisor) >= DIVISION_EPSILON) {
            return Err(GeometryError::DivisionByZero(divisor));
        }
        Ok(Coordinates::new(self.x / divisor, self.y / divisor))
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Coordinates::new(f64::NAN, f64::NAN)
    }
}

impl PartialEq for Coordinates {
    fn eq(&self, other: &Self) -> bool {
        fabs(self.x - other.x) <= COORDINATE_EPSILON && fabs(self.y - other.y) <= COORDINATE_EPSILON
    }
}

impl Add for Coordinates {
    type Output = Coordinates;

    fn add(self, other: Coordinates) -> Coordinates {
        Coordinates::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinates {
    type Output = Coordinates;

    fn sub(self, other: Coordinates) -> Coordinates {
        Coordinates::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Coordinates {
    type Output = Coordinates;

    fn mul(self, coefficient: f64) -> Coordinates {
        Coordinates::new(self.x * coefficient, self.y * coefficient)
    }
}

impl Mul<Coordinates> for f64 {
    type Output = Coordinates;

    fn mul(self, coordinates: Coordinates) -> Coordinates {
        coordinates * self
    }
}

impl Neg for Coordinates {
    type Output = Coordinates;

    fn neg(self) -> Coordinates {
        self * -1.0
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinates::new(x, y)
    }
}

impl From<[f64; 2]> for Coordinates {
    fn from([x, y]: [f64; 2]) -> Self {
        Coordinates::new(x, y)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}m, {}m)", self.x, self.y)
    }
}

/// A 2‑D pose `(x, y, θ)` in meters and radians.
///
/// Unlike [`Coordinates`], poses compare field by field without tolerance.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// World‑frame x position (m).
    pub x: f64,
    /// World‑frame y position (m).
    pub y: f64,
    /// Heading (rad).
    pub theta: f64,
}

impl Pose {
    /// Construct a new pose.
    ///
    /// # Arguments
    ///
    /// * `x`: World-frame x position in meters.
    /// * `y`: World-frame y position in meters.
    /// * `theta`: Heading in radians.
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Pose { x, y, theta }
    }

    /// The planar position of the pose.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.x, self.y)
    }

    /// Planar Euclidean distance between two poses; headings are ignored.
    pub fn distance_to(&self, other: &Pose) -> f64 {
        let delta_x = self.x - other.x;
        let delta_y = self.y - other.y;
        sqrt(delta_x * delta_x + delta_y * delta_y)
    }

    /// Absolute heading difference folded into `[0, PI]`.
    ///
    /// Starting from `|θ1 - θ2|`, any value exceeding `PI` by more than
    /// [`ANGLE_EPSILON`] is reflected to `|d - 2PI|` until it falls in range.
    /// Values within the epsilon above `PI` are returned unchanged.
    ///
    /// Non-finite differences are returned as they are. Differences of more
    /// than two turns are first reduced modulo `2PI`.
    pub fn angle_diff(&self, other: &Pose) -> f64 {
        let mut angle_diff = fabs(self.theta - other.theta);
        if !angle_diff.is_finite() {
            return angle_diff;
        }
        if angle_diff > 4.0 * PI {
            angle_diff = fmod(angle_diff, 2.0 * PI);
        }
        while angle_diff - PI > ANGLE_EPSILON {
            angle_diff = fabs(angle_diff - 2.0 * PI);
        }
        angle_diff
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}m, {}m, {}rad)", self.x, self.y, self.theta)
    }
}
