//! Sync coordinator: owns the in-memory replica and orchestrates
//! connectivity-triggered loads and user-triggered pushes of pending
//! offline records.
//!
//! All work is event-triggered and runs to completion on `&mut self`;
//! network calls are the only suspension points. Every mutation is followed
//! by a whole-snapshot persist before it is considered durable.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::identity::WellId;
use crate::models::{
    Layer, LayerError, Lithology, Snapshot, Well, WellInput, WellValidationError,
};
use crate::remote::{RemoteError, RemoteWellStore};
use crate::store::{SnapshotStore, StoreError};
use crate::sync::merge::merge;

/// Delay between a connectivity-restored signal and the automatic load,
/// letting the network stabilize so a flapping link does not cause
/// redundant fetches.
pub const RECONNECT_SETTLE: Duration = Duration::from_secs(2);

/// Coordinator lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorState {
    Offline,
    OnlineIdle,
    Loading,
    Syncing,
}

/// One failed item of a sync run, labeled by well name.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncFailure {
    pub name: String,
    pub reason: String,
}

/// Aggregate outcome of a push of pending offline wells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    pub synced: usize,
    pub failed: usize,
    pub failures: Vec<SyncFailure>,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Synced {} of {} pending wells",
            self.synced,
            self.synced + self.failed
        )?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.name, failure.reason)?;
        }
        Ok(())
    }
}

/// Errors surfaced by coordinator entry points.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("well not found: {0}")]
    WellNotFound(String),

    #[error(transparent)]
    Rejected(#[from] LayerError),

    #[error(transparent)]
    Invalid(#[from] WellValidationError),

    #[error("remote well store error: {0}")]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("offline: connect before syncing")]
    Offline,

    #[error("a load or sync is already in progress")]
    Busy,
}

/// Orchestrates the local replica against the remote well store.
///
/// Constructed once per process with injected collaborators; there is no
/// global state, so tests substitute in-memory fakes.
pub struct SyncCoordinator<R, S> {
    remote: R,
    store: S,
    replica: Snapshot,
    state: CoordinatorState,
    /// Single pending deferred-load deadline. Re-arming replaces it, going
    /// offline clears it, so connectivity flapping never stacks timers.
    deferred_load: Option<Instant>,
    settle_delay: Duration,
}

impl<R, S> SyncCoordinator<R, S>
where
    R: RemoteWellStore,
    S: SnapshotStore,
{
    /// Creates a coordinator seeded from the persisted snapshot, starting
    /// in the `Offline` state until a connectivity signal says otherwise.
    pub fn new(remote: R, store: S) -> Result<Self, StoreError> {
        let replica = store.read()?.unwrap_or_default();
        Ok(Self {
            remote,
            store,
            replica,
            state: CoordinatorState::Offline,
            deferred_load: None,
            settle_delay: RECONNECT_SETTLE,
        })
    }

    /// Overrides the reconnect settle delay.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Current in-memory replica, as exposed to the presentation layer.
    pub fn replica(&self) -> &Snapshot {
        &self.replica
    }

    pub fn state(&self) -> CoordinatorState {
        self.state
    }

    /// Pending wells that have not been confirmed by the remote store.
    pub fn pending(&self) -> impl Iterator<Item = &Well> {
        self.replica.iter().filter(|w| w.is_provisional())
    }

    /// Applies a connectivity transition.
    ///
    /// Going online from `Offline` arms a single deferred load; going
    /// offline from any state clears it. A load or sync already running on
    /// `&mut self` completes first; the transition takes effect at the next
    /// entry point.
    pub fn connectivity_changed(&mut self, online: bool) {
        if !online {
            if self.state != CoordinatorState::Offline {
                info!("connectivity lost, replica continues from local data");
            }
            self.state = CoordinatorState::Offline;
            self.deferred_load = None;
            return;
        }

        if self.state == CoordinatorState::Offline {
            info!(
                "connectivity restored, load scheduled in {:?}",
                self.settle_delay
            );
            self.state = CoordinatorState::OnlineIdle;
            self.deferred_load = Some(Instant::now() + self.settle_delay);
        }
    }

    /// Deadline of the pending deferred load, if one is armed.
    pub fn deferred_load_deadline(&self) -> Option<Instant> {
        self.deferred_load
    }

    /// Fetches the remote snapshot, reconciles it with the local replica
    /// and persists the result.
    ///
    /// Fetch failure is non-fatal: the existing replica stays untouched and
    /// the caller keeps working against last-known data. While offline the
    /// request is a no-op, and an overlapping request is ignored.
    pub async fn request_load(&mut self) -> Result<(), CoordinatorError> {
        match self.state {
            CoordinatorState::Offline => {
                debug!("load requested while offline, serving local replica");
                return Ok(());
            }
            CoordinatorState::Loading | CoordinatorState::Syncing => {
                debug!("load requested while busy, ignored");
                return Ok(());
            }
            CoordinatorState::OnlineIdle => {}
        }

        self.state = CoordinatorState::Loading;
        let outcome = self.remote.list().await;
        self.state = CoordinatorState::OnlineIdle;

        match outcome {
            Ok(remote_wells) => {
                self.replica = merge(&remote_wells, &self.replica);
                self.store.write(&self.replica)?;
                info!(wells = self.replica.len(), "replica reconciled with server");
                Ok(())
            }
            Err(e) => {
                warn!("load failed, keeping local replica: {}", e);
                Ok(())
            }
        }
    }

    /// Pushes every pending offline well to the remote store, each item
    /// independently.
    ///
    /// A successful create replaces the provisional record with the
    /// server-returned one, re-attaching its locally recorded layers
    /// (layers are not synced separately). A failed item stays provisional
    /// for a later retry and is reported under the well's name; one failure
    /// never aborts the remaining items. The updated replica is persisted
    /// exactly once, after all items were attempted.
    pub async fn request_sync(&mut self) -> Result<SyncReport, CoordinatorError> {
        match self.state {
            CoordinatorState::Offline => return Err(CoordinatorError::Offline),
            CoordinatorState::Loading | CoordinatorState::Syncing => {
                return Err(CoordinatorError::Busy)
            }
            CoordinatorState::OnlineIdle => {}
        }

        let pending_ids: Vec<WellId> = self.pending().map(|w| w.id.clone()).collect();
        if pending_ids.is_empty() {
            debug!("nothing to sync");
            return Ok(SyncReport::default());
        }

        self.state = CoordinatorState::Syncing;
        let mut report = SyncReport::default();

        for id in &pending_ids {
            // Re-resolve by identity: earlier promotions replaced records.
            let Some(index) = self.replica.iter().position(|w| &w.id == id) else {
                continue;
            };
            let input = self.replica[index].to_input();

            match self.remote.create(&input).await {
                Ok(created) => {
                    info!(
                        "well '{}' promoted: {} -> {}",
                        input.name, id, created.id
                    );
                    let layers = std::mem::take(&mut self.replica[index].layers);
                    let mut promoted = created;
                    promoted.layers = layers;
                    self.replica[index] = promoted;
                    report.synced += 1;
                }
                Err(e) => {
                    warn!("well '{}' failed to sync: {}", input.name, e);
                    report.failures.push(SyncFailure {
                        name: input.name,
                        reason: e.to_string(),
                    });
                    report.failed += 1;
                }
            }
        }

        self.state = CoordinatorState::OnlineIdle;
        self.store.write(&self.replica)?;

        Ok(report)
    }

    /// Creates a well: against the remote store when online, as a
    /// provisional local record otherwise.
    pub async fn create_well(&mut self, input: WellInput) -> Result<Well, CoordinatorError> {
        input.validate()?;

        let well = if self.state == CoordinatorState::Offline {
            let well = Well::new_provisional(input);
            info!("well '{}' captured offline as {}", well.name, well.id);
            well
        } else {
            let well = self.remote.create(&input).await?;
            info!("well '{}' created on server as {}", well.name, well.id);
            well
        };

        self.replica.push(well.clone());
        self.store.write(&self.replica)?;
        Ok(well)
    }

    /// Places a geological layer in the identified well and persists the
    /// replica.
    pub fn place_layer(
        &mut self,
        well_id: &WellId,
        start_depth: f64,
        end_depth: f64,
        lithology: Lithology,
        description: Option<String>,
    ) -> Result<Layer, CoordinatorError> {
        let well = self
            .replica
            .iter_mut()
            .find(|w| &w.id == well_id)
            .ok_or_else(|| CoordinatorError::WellNotFound(well_id.to_string()))?;

        let layer = well.place_layer(start_depth, end_depth, lithology, description)?;
        self.store.write(&self.replica)?;
        Ok(layer)
    }

    /// Drives the coordinator from a connectivity subscription.
    ///
    /// Runs until the signal's sender side is dropped. Fires at most one
    /// deferred load per settle window, however often the link flaps.
    pub async fn run(&mut self, mut connectivity: watch::Receiver<bool>) {
        self.connectivity_changed(*connectivity.borrow_and_update());

        loop {
            let deadline = self.deferred_load;
            tokio::select! {
                changed = connectivity.changed() => {
                    match changed {
                        Ok(()) => {
                            let online = *connectivity.borrow_and_update();
                            self.connectivity_changed(online);
                        }
                        Err(_) => break,
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.deferred_load = None;
                    if let Err(e) = self.request_load().await {
                        warn!("deferred load failed: {}", e);
                    }
                }
            }
        }
    }
}
