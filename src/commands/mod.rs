mod layer;
mod sync_cmd;
mod well;

pub use layer::LayerCommand;
pub use sync_cmd::SyncCommand;
pub use well::WellCommand;
