use std::fmt;

use multibot_geometry::{Coordinates, Index};
use tracing::{error, info};

use super::inflation::InflationEngine;
use super::{Cell, MapProperty};
use crate::error::MapError;

/// A binary occupancy map with a derived, safety-inflated copy.
///
/// `map_data` is the authoritative occupancy, stored row-major. Every call to
/// [`BinaryOccupancyMap::inflate`] regenerates `inflated_map_data` from it;
/// the inflated grid is never patched incrementally.
#[derive(Debug, Default)]
pub struct BinaryOccupancyMap {
    property: MapProperty,
    map_data: Vec<Cell>,
    inflated_map_data: Vec<Cell>,
    engine: InflationEngine,
}

// The inflation working state belongs to one instance and is not shared with copies.
impl Clone for BinaryOccupancyMap {
    fn clone(&self) -> Self {
        Self {
            property: self.property.clone(),
            map_data: self.map_data.clone(),
            inflated_map_data: self.inflated_map_data.clone(),
            engine: InflationEngine::new(),
        }
    }
}

impl BinaryOccupancyMap {
    /// Creates an empty, unconfigured map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map with every cell free.
    ///
    /// Each cell gets its index and `coord = origin + idx * resolution`.
    ///
    /// # Errors
    ///
    /// Returns `MapError::InvalidProperty` if `property` is not configured.
    pub fn from_property(property: MapProperty) -> Result<Self, MapError> {
        property.validate()?;

        let map_data: Vec<Cell> = (0..property.cell_count())
            .map(|flat| {
                let idx = property.index_at(flat);
                Cell::new(idx, property.coordinates_of(idx), false)
            })
            .collect();

        info!(
            width = property.width,
            height = property.height,
            resolution = property.resolution,
            "Created occupancy map"
        );

        Ok(Self {
            inflated_map_data: map_data.clone(),
            property,
            map_data,
            engine: InflationEngine::new(),
        })
    }

    /// Creates a map from loader-supplied cells in row-major order.
    ///
    /// Only the cell count is checked; the cells are trusted to carry their own
    /// index and `origin + idx * resolution` coordinates.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidProperty` if `property` is not configured.
    /// * `MapError::DataSizeMismatch` if `map_data` does not hold `width * height` cells.
    pub fn with_data(property: MapProperty, map_data: Vec<Cell>) -> Result<Self, MapError> {
        property.validate()?;
        let expected = property.cell_count();
        if map_data.len() != expected {
            error!(expected, actual = map_data.len(), "Rejected map data");
            return Err(MapError::DataSizeMismatch {
                expected,
                actual: map_data.len(),
            });
        }

        Ok(Self {
            inflated_map_data: map_data.clone(),
            property,
            map_data,
            engine: InflationEngine::new(),
        })
    }

    /// Gets the map metadata.
    pub fn property(&self) -> &MapProperty {
        &self.property
    }

    /// Gets the base grid in row-major order.
    pub fn map_data(&self) -> &[Cell] {
        &self.map_data
    }

    /// Gets the grid produced by the last inflation, row-major.
    ///
    /// Before the first inflation this is a copy of the base grid.
    pub fn inflated_map_data(&self) -> &[Cell] {
        &self.inflated_map_data
    }

    /// Gets the inflation working state of the last run.
    pub fn inflation_engine(&self) -> &InflationEngine {
        &self.engine
    }

    /// Gets the base cell at `idx`.
    pub fn cell(&self, idx: Index) -> Option<&Cell> {
        self.property.flat_index(idx).map(|flat| &self.map_data[flat])
    }

    /// Gets the inflated cell at `idx`.
    pub fn inflated_cell(&self, idx: Index) -> Option<&Cell> {
        self.property
            .flat_index(idx)
            .map(|flat| &self.inflated_map_data[flat])
    }

    /// Gets the base cell nearest to a world position.
    pub fn cell_at_world(&self, coord: Coordinates) -> Result<Option<&Cell>, MapError> {
        Ok(self.property.index_of(coord)?.and_then(|idx| self.cell(idx)))
    }

    /// Marks the base cell at `idx` as occupied or free.
    ///
    /// # Errors
    ///
    /// Returns `MapError::OutOfBounds` if `idx` lies outside the map.
    pub fn set_occupied(&mut self, idx: Index, occupied: bool) -> Result<(), MapError> {
        let flat = self.property.flat_index(idx).ok_or(MapError::OutOfBounds(idx))?;
        self.map_data[flat].occupied = occupied;
        Ok(())
    }

    /// Indices of every occupied cell in the base grid, row-major.
    pub fn occupied_indices(&self) -> Vec<Index> {
        self.map_data
            .iter()
            .filter(|cell| cell.occupied)
            .map(|cell| cell.idx)
            .collect()
    }

    /// Returns `true` if the cell's index lies outside `[0, width) x [0, height)`.
    pub fn is_out_of_map(&self, cell: &Cell) -> bool {
        !self.property.contains(cell.idx)
    }

    /// Cells within the inflation radius of the `roots`, the roots included.
    ///
    /// See [`InflationEngine::run`] for the admission rule and errors.
    pub fn inflated_area(&mut self, roots: &[Index], radius: f64) -> Result<Vec<Index>, MapError> {
        self.engine.run(&self.property, roots, radius)
    }

    /// Rebuilds the inflated grid, growing every occupied cell by `radius` meters.
    ///
    /// The inflated grid starts as a copy of the base grid; every cell reached
    /// from an occupied cell is then marked occupied. Occupied cells always stay
    /// occupied.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidInflationRadius` if `radius` is `NaN` or negative.
    /// * `MapError::InvalidProperty` if the map is not configured.
    /// * `MapError::OutOfBounds` if an occupied cell supplied through
    ///   [`BinaryOccupancyMap::with_data`] carries an index outside the map.
    ///
    /// On error neither the inflated grid nor the stored radius change.
    pub fn inflate(&mut self, radius: f64) -> Result<&[Cell], MapError> {
        let roots = self.occupied_indices();
        let inflated_area = self.inflated_area(&roots, radius)?;

        self.property.inflation_radius = radius;
        self.inflated_map_data.clone_from(&self.map_data);
        for idx in &inflated_area {
            if let Some(flat) = self.property.flat_index(*idx) {
                self.inflated_map_data[flat].occupied = true;
            }
        }

        info!(
            radius,
            obstacles = roots.len(),
            inflated = inflated_area.len(),
            "Inflated occupancy map"
        );
        Ok(&self.inflated_map_data)
    }
}

impl fmt::Display for BinaryOccupancyMap {
    /// Prints the property block followed by the inflated grid, one row per
    /// line: `#` occupied in the base grid, `+` added by inflation, `.` free.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.property)?;
        if self.map_data.is_empty() {
            return Ok(());
        }
        for row in 0..self.property.height {
            for col in 0..self.property.width {
                let flat = row * self.property.width + col;
                let symbol = match (self.map_data[flat].occupied, self.inflated_map_data[flat].occupied) {
                    (true, _) => '#',
                    (false, true) => '+',
                    (false, false) => '.',
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
