#![warn(missing_docs)]

//! Error types for the geometry library.
//!
//! This module defines the errors that coordinate algebra can report instead
//! of silently producing non-finite values.

use core::fmt;

/// Errors that can occur in coordinate arithmetic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// Error for scalar division by a near-zero divisor.
    /// This variant is returned when the divisor magnitude is below
    /// [`DIVISION_EPSILON`](crate::DIVISION_EPSILON); it carries the divisor.
    DivisionByZero(f64),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::DivisionByZero(divisor) => {
                write!(f, "Math error: attempted to divide by near-zero value {}", divisor)
            }
        }
    }
}

impl core::error::Error for GeometryError {}
