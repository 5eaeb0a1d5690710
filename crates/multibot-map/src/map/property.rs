//! Occupancy map metadata.

use std::fmt;

use multibot_geometry::{Coordinates, Index};
use tracing::error;

use crate::error::MapError;

/// Grid metadata shared by the base and inflated grids.
///
/// A default-constructed property is *not configured*: the origin is unset,
/// both dimensions are zero and the resolution is `NaN`. The inflation radius
/// stays `NaN` until the first successful inflation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapProperty {
    /// World coordinates of cell `[0][0]`.
    pub origin: Coordinates,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Meters per cell.
    pub resolution: f64,
    /// Radius used by the last inflation, in meters.
    pub inflation_radius: f64,
}

impl Default for MapProperty {
    fn default() -> Self {
        Self {
            origin: Coordinates::default(),
            width: 0,
            height: 0,
            resolution: f64::NAN,
            inflation_radius: f64::NAN,
        }
    }
}

impl MapProperty {
    /// Creates a property for a `width` x `height` grid whose cell `[0][0]` sits at `origin`.
    ///
    /// The result is not validated; see [`MapProperty::validate`].
    pub fn new(origin: Coordinates, width: usize, height: usize, resolution: f64) -> Self {
        Self {
            origin,
            width,
            height,
            resolution,
            inflation_radius: f64::NAN,
        }
    }

    /// Returns `true` once origin, dimensions and resolution all hold usable values.
    pub fn is_configured(&self) -> bool {
        self.validate().is_ok()
    }

    /// Checks that the metadata describes a usable grid.
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.origin.is_set() {
            return Err(MapError::InvalidProperty("Origin must be set"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MapError::InvalidProperty("Width and height must be non-zero"));
        }
        if self.width > i32::MAX as usize || self.height > i32::MAX as usize {
            return Err(MapError::InvalidProperty("Width and height must fit a cell index"));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(MapError::InvalidProperty("Map dimensions too large, would cause overflow"));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(MapError::InvalidProperty("Resolution must be positive"));
        }
        Ok(())
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns `true` if `idx` lies inside `[0, width) x [0, height)`.
    pub fn contains(&self, idx: Index) -> bool {
        idx.x >= 0 && idx.y >= 0 && (idx.x as usize) < self.width && (idx.y as usize) < self.height
    }

    /// Row-major position of `idx` in the cell storage, `None` outside the map.
    pub fn flat_index(&self, idx: Index) -> Option<usize> {
        if self.contains(idx) {
            Some(idx.y as usize * self.width + idx.x as usize)
        } else {
            None
        }
    }

    /// Index stored at row-major position `flat`.
    pub(crate) fn index_at(&self, flat: usize) -> Index {
        Index::new((flat % self.width) as i32, (flat / self.width) as i32)
    }

    /// World coordinates of the cell at `idx`: `origin + idx * resolution`.
    pub fn coordinates_of(&self, idx: Index) -> Coordinates {
        Coordinates::new(
            self.origin.x + idx.x as f64 * self.resolution,
            self.origin.y + idx.y as f64 * self.resolution,
        )
    }

    /// Index of the cell nearest to `coord`, or `None` if that cell lies outside the map.
    ///
    /// # Errors
    ///
    /// Returns `MapError::Geometry` if the resolution is too small to divide by.
    pub fn index_of(&self, coord: Coordinates) -> Result<Option<Index>, MapError> {
        let scaled = (coord - self.origin)
            .checked_div(self.resolution)
            .inspect_err(|e| error!(resolution = self.resolution, "Failed to convert {coord} to a cell index: {e}"))?;
        if !scaled.x.is_finite() || !scaled.y.is_finite() {
            return Ok(None);
        }

        let (col, row) = (scaled.x.round(), scaled.y.round());
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            return Ok(None);
        }
        Ok(Some(Index::new(col as i32, row as i32)))
    }

    /// In-bounds 4-neighbours of `idx`, in the order left, down, right, up.
    pub(crate) fn neighbors(&self, idx: Index) -> impl Iterator<Item = Index> + use<> {
        let width = self.width as i32;
        let height = self.height as i32;
        [
            (idx.x > 0).then(|| Index::new(idx.x - 1, idx.y)),
            (idx.y > 0).then(|| Index::new(idx.x, idx.y - 1)),
            (idx.x < width - 1).then(|| Index::new(idx.x + 1, idx.y)),
            (idx.y < height - 1).then(|| Index::new(idx.x, idx.y + 1)),
        ]
        .into_iter()
        .flatten()
    }
}

impl fmt::Display for MapProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Map Property")?;
        writeln!(f, "  o Origin      : {}", self.origin)?;
        writeln!(f, "  o Width       : {}", self.width)?;
        writeln!(f, "  o Height      : {}", self.height)?;
        write!(f, "  o Resolution  : {}m", self.resolution)
    }
}
