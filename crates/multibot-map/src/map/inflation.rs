//! Obstacle inflation for binary occupancy maps.
//!
//! Uses a **multi-source wavefront**: every occupied cell is seeded into the
//! frontier at distance 0 and cells are expanded in order of their distance to
//! the obstacle they were reached from. A neighbour inherits the source
//! coordinate of the cell that expanded it, so the distance checked at
//! admission is the true Euclidean distance back to that obstacle rather than
//! a step count.
//!
//! A cell is admitted once per run, and only while its distance stays within
//! [`admission_threshold`]: the radius plus one diagonal cell width (the
//! 4-connected expansion can trail the Euclidean disk by that much) plus
//! [`ADMISSION_EPSILON`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use multibot_geometry::{Coordinates, Index};
use tracing::{debug, error};

use super::MapProperty;
use crate::error::MapError;

/// Absorbs floating-point noise in the admission comparison.
pub const ADMISSION_EPSILON: f64 = 1e-8;

/// Largest distance (m) at which a cell is still admitted for `radius`.
#[inline]
pub fn admission_threshold(radius: f64, resolution: f64) -> f64 {
    radius + SQRT_2 * resolution + ADMISSION_EPSILON
}

/// Rejects `NaN` and negative radii.
pub fn validate_radius(radius: f64) -> Result<(), MapError> {
    if radius.is_nan() || radius < 0.0 {
        error!(radius, "Invalid inflation radius: {radius}");
        return Err(MapError::InvalidInflationRadius(radius));
    }
    Ok(())
}

/// Distance to, and position of, the obstacle a cell was reached from.
#[derive(Debug, Clone, Copy)]
struct Propagation {
    distance: f64,
    source: Coordinates,
}

#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    distance: f64,
    idx: Index,
    source: Coordinates,
}

// Ties on distance pop in index order so runs are reproducible. Entries are
// unique per index within a run, so the source takes no part in ordering.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.idx.cmp(&other.idx))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Run-scoped working state of an inflation.
///
/// All buffers are reset at the start of [`InflationEngine::run`]; between
/// runs they only describe the most recent one.
#[derive(Debug, Default)]
pub struct InflationEngine {
    width: usize,
    height: usize,
    seen: Vec<bool>,
    propagation: Vec<Option<Propagation>>,
    frontier: BinaryHeap<Reverse<FrontierEntry>>,
}

impl InflationEngine {
    /// Creates an engine with empty working state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every cell within the admission threshold of `roots`.
    ///
    /// All roots are seeded at once and each cell keeps the first obstacle it
    /// is reached from. Indices are returned in the order they leave the
    /// frontier, roots first.
    ///
    /// # Errors
    ///
    /// * `MapError::InvalidInflationRadius` if `radius` is `NaN` or negative.
    /// * `MapError::InvalidProperty` if `property` is not configured.
    /// * `MapError::OutOfBounds` if a root lies outside the map.
    ///
    /// The working state is left untouched when an error is returned.
    pub fn run(
        &mut self,
        property: &MapProperty,
        roots: &[Index],
        radius: f64,
    ) -> Result<Vec<Index>, MapError> {
        validate_radius(radius)?;
        property.validate().inspect_err(|e| error!("Cannot inflate: {e}"))?;
        if let Some(&root) = roots.iter().find(|&&root| !property.contains(root)) {
            error!(%root, "Inflation root lies outside the map");
            return Err(MapError::OutOfBounds(root));
        }

        self.reset(property);
        let threshold = admission_threshold(radius, property.resolution);
        debug!(roots = roots.len(), radius, threshold, "Starting inflation run");

        for &root in roots {
            self.admit(property, root, property.coordinates_of(root), threshold);
        }

        let mut inflated = Vec::new();
        while let Some(Reverse(current)) = self.frontier.pop() {
            inflated.push(current.idx);
            for neighbor in property.neighbors(current.idx) {
                self.admit(property, neighbor, current.source, threshold);
            }
        }

        debug!(inflated = inflated.len(), "Inflation run finished");
        Ok(inflated)
    }

    /// Distance from `idx` to the obstacle it was reached from in the last run.
    pub fn distance_to_source(&self, idx: Index) -> Option<f64> {
        self.propagation_at(idx).map(|p| p.distance)
    }

    /// Coordinates of the obstacle `idx` was reached from in the last run.
    pub fn source_of(&self, idx: Index) -> Option<Coordinates> {
        self.propagation_at(idx).map(|p| p.source)
    }

    fn propagation_at(&self, idx: Index) -> Option<Propagation> {
        if idx.x < 0 || idx.y < 0 || idx.x as usize >= self.width || idx.y as usize >= self.height {
            return None;
        }
        self.propagation[idx.y as usize * self.width + idx.x as usize]
    }

    fn reset(&mut self, property: &MapProperty) {
        let size = property.cell_count();
        self.width = property.width;
        self.height = property.height;

        self.seen.clear();
        self.seen.resize(size, false);
        self.propagation.clear();
        self.propagation.resize(size, None);
        self.frontier.clear();
    }

    /// Pushes `idx` carrying `source` unless it was already seen or lies beyond `threshold`.
    fn admit(&mut self, property: &MapProperty, idx: Index, source: Coordinates, threshold: f64) {
        let Some(flat) = property.flat_index(idx) else {
            return;
        };
        if self.seen[flat] {
            return;
        }

        let distance = property.coordinates_of(idx).distance_to(&source);
        if distance > threshold {
            return;
        }

        self.seen[flat] = true;
        self.propagation[flat] = Some(Propagation { distance, source });
        self.frontier.push(Reverse(FrontierEntry { distance, idx, source }));
    }
}
