mod layer;
mod lithology;
mod well;

pub use layer::{Layer, LayerError};
pub use lithology::Lithology;
pub use well::{Well, WellInput, WellValidationError, MAX_DESIGN_DEPTH};

/// The full locally known well collection: the unit of persistence and of
/// reconciliation.
pub type Snapshot = Vec<Well>;
