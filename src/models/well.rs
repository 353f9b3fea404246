use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::{Layer, LayerError, Lithology};
use crate::identity::WellId;

/// Maximum allowed design depth in meters.
pub const MAX_DESIGN_DEPTH: f64 = 30.0;

/// A drilling well and its geological layers.
///
/// The identity is immutable once assigned. Promotion of an offline-created
/// well replaces the whole record with the server-returned one (layers
/// re-attached), so references held before promotion must be re-resolved by
/// id lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Well {
    pub id: WellId,
    pub name: String,
    pub area: String,
    pub structure: String,
    pub design_depth: f64,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Well {
    /// Creates a well with a freshly minted provisional identity.
    pub fn new_provisional(input: WellInput) -> Self {
        Self {
            id: WellId::mint_provisional(),
            name: input.name,
            area: input.area,
            structure: input.structure,
            design_depth: input.design_depth,
            layers: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Whether this well has not yet been confirmed by the remote store.
    pub fn is_provisional(&self) -> bool {
        self.id.is_provisional()
    }

    /// The durable-shaped create payload: the well's fields minus local
    /// bookkeeping (identity, layers, timestamps).
    pub fn to_input(&self) -> WellInput {
        WellInput {
            name: self.name.clone(),
            area: self.area.clone(),
            structure: self.structure.clone(),
            design_depth: self.design_depth,
        }
    }

    /// Places a geological layer in this well.
    ///
    /// Validation order: invalid range, exceeds design depth, overlap with
    /// an existing layer. Non-finite depths are rejected as an invalid
    /// range; NaN compares false against everything and would slip past
    /// the other checks. On acceptance the layer gets the next local id,
    /// is inserted, and the collection is re-sorted by ascending start
    /// depth, so the ordering invariant holds regardless of entry order.
    pub fn place_layer(
        &mut self,
        start_depth: f64,
        end_depth: f64,
        lithology: Lithology,
        description: Option<String>,
    ) -> Result<Layer, LayerError> {
        if !start_depth.is_finite() || !end_depth.is_finite() || end_depth <= start_depth {
            return Err(LayerError::InvalidRange {
                start: start_depth,
                end: end_depth,
            });
        }
        if end_depth > self.design_depth {
            return Err(LayerError::ExceedsDesignDepth {
                end: end_depth,
                design_depth: self.design_depth,
            });
        }
        if let Some(existing) = self
            .layers
            .iter()
            .find(|l| l.overlaps(start_depth, end_depth))
        {
            return Err(LayerError::OverlappingInterval {
                existing_start: existing.start_depth,
                existing_end: existing.end_depth,
            });
        }

        let id = self.next_layer_id();
        let layer = Layer::new(id, start_depth, end_depth, lithology, description);
        self.layers.push(layer.clone());
        self.layers.sort_by(|a, b| {
            a.start_depth
                .partial_cmp(&b.start_depth)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(layer)
    }

    fn next_layer_id(&self) -> u64 {
        self.layers.iter().map(|l| l.id).max().map_or(1, |m| m + 1)
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.area)?;
        writeln!(f, "Structure: {}", self.structure)?;
        writeln!(f, "Design depth: {:.2} m", self.design_depth)?;
        writeln!(
            f,
            "Status: {}",
            if self.is_provisional() {
                "offline (pending sync)"
            } else {
                "synced"
            }
        )?;
        if !self.layers.is_empty() {
            writeln!(f, "Layers:")?;
            for layer in &self.layers {
                writeln!(f, "  {}", layer)?;
            }
        }
        Ok(())
    }
}

/// Input for creating a well, either against the remote store or offline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellInput {
    pub name: String,
    pub area: String,
    pub structure: String,
    pub design_depth: f64,
}

impl WellInput {
    pub fn validate(&self) -> Result<(), WellValidationError> {
        if self.name.trim().is_empty() {
            return Err(WellValidationError::MissingField("name"));
        }
        if self.area.trim().is_empty() {
            return Err(WellValidationError::MissingField("area"));
        }
        if self.structure.trim().is_empty() {
            return Err(WellValidationError::MissingField("structure"));
        }
        if !self.design_depth.is_finite()
            || self.design_depth <= 0.0
            || self.design_depth > MAX_DESIGN_DEPTH
        {
            return Err(WellValidationError::DesignDepthOutOfRange(
                self.design_depth,
            ));
        }
        Ok(())
    }
}

/// Validation errors for well creation input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WellValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("design depth {0} must be between 0.01 and {MAX_DESIGN_DEPTH} meters")]
    DesignDepthOutOfRange(f64),
}
