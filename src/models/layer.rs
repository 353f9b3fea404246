use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::Lithology;

/// A geological layer: one depth interval within a well.
///
/// Thickness is fixed at creation time (two decimal places) and never
/// recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Locally unique, monotonically assigned within the owning well.
    pub id: u64,
    pub start_depth: f64,
    pub end_depth: f64,
    pub lithology: Lithology,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub thickness: f64,
}

impl Layer {
    pub fn new(
        id: u64,
        start_depth: f64,
        end_depth: f64,
        lithology: Lithology,
        description: Option<String>,
    ) -> Self {
        let thickness = ((end_depth - start_depth) * 100.0).round() / 100.0;
        Self {
            id,
            start_depth,
            end_depth,
            lithology,
            description,
            thickness,
        }
    }

    /// Interval overlap test: `start_a < end_b && end_a > start_b`.
    ///
    /// Touching intervals (one ends exactly where the other starts) do not
    /// overlap.
    pub fn overlaps(&self, start: f64, end: f64) -> bool {
        start < self.end_depth && end > self.start_depth
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2}-{:.2} m: {} ({:.2} m)",
            self.start_depth, self.end_depth, self.lithology, self.thickness
        )
    }
}

/// Typed rejection reasons for layer placement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayerError {
    #[error("invalid range: end depth {end} must be greater than start depth {start}")]
    InvalidRange { start: f64, end: f64 },

    #[error("end depth {end} exceeds design depth {design_depth}")]
    ExceedsDesignDepth { end: f64, design_depth: f64 },

    #[error("interval overlaps existing layer {existing_start}-{existing_end}")]
    OverlappingInterval {
        existing_start: f64,
        existing_end: f64,
    },
}
