//! Offline-first reconciliation engine.
//!
//! Two halves:
//! - [`merge`]: the pure reconciler combining a server snapshot with the
//!   local replica (remote records authoritative, provisional records
//!   carried over unless a probable duplicate exists).
//! - [`SyncCoordinator`]: the stateful orchestrator that loads and merges
//!   on connectivity, pushes pending offline records on request, and
//!   persists the replica through the snapshot store.

pub mod coordinator;
pub mod merge;

pub use coordinator::{
    CoordinatorError, CoordinatorState, SyncCoordinator, SyncFailure, SyncReport,
    RECONNECT_SETTLE,
};
pub use merge::merge;
