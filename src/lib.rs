//! Borelog core library
//!
//! Offline-first replica of a drilling well journal. The local snapshot
//! keeps working without connectivity; the reconciliation engine merges
//! server state back in and pushes pending offline records once the link
//! returns.

pub mod commands;
pub mod config;
pub mod connectivity;
pub mod identity;
pub mod models;
pub mod remote;
pub mod store;
pub mod sync;

pub use config::{Config, ConfigError};
pub use connectivity::ConnectivitySignal;
pub use identity::WellId;
pub use models::{Layer, LayerError, Lithology, Snapshot, Well, WellInput};
pub use remote::{check_server, HttpWellStore, RemoteError, RemoteWellStore};
pub use store::{FileSnapshotStore, SnapshotStore, StoreError};
pub use sync::{merge, CoordinatorError, CoordinatorState, SyncCoordinator, SyncReport};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
