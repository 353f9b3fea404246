//! Sync CLI commands for pushing pending offline wells to the server.

use std::time::Duration;

use clap::{Args, Subcommand};
use tracing::debug;

use crate::config::Config;
use crate::connectivity::ConnectivitySignal;
use crate::remote::{check_server, HttpWellStore};
use crate::store::FileSnapshotStore;
use crate::sync::{CoordinatorError, SyncCoordinator};

/// Interval between reachability probes in watch mode.
const PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// Synchronize with the remote well store
#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(subcommand)]
    command: Option<SyncSubcommand>,
}

#[derive(Debug, Subcommand)]
enum SyncSubcommand {
    /// Show replica status and server reachability
    Status,

    /// Keep running, reconciling automatically whenever the server
    /// becomes reachable
    Watch,
}

impl SyncCommand {
    pub async fn run(
        &self,
        coordinator: &mut SyncCoordinator<HttpWellStore, FileSnapshotStore>,
        config: &Config,
    ) -> Result<(), CoordinatorError> {
        match &self.command {
            None => self.sync(coordinator).await,
            Some(SyncSubcommand::Status) => self.status(coordinator, config).await,
            Some(SyncSubcommand::Watch) => self.watch(coordinator, config).await,
        }
    }

    async fn sync(
        &self,
        coordinator: &mut SyncCoordinator<HttpWellStore, FileSnapshotStore>,
    ) -> Result<(), CoordinatorError> {
        let pending = coordinator.pending().count();
        if pending == 0 {
            println!("Nothing to sync.");
            return Ok(());
        }

        println!("Syncing {} pending well(s)...", pending);
        let report = coordinator.request_sync().await?;
        println!("{}", report);

        if report.failed > 0 {
            println!("Failed wells stay pending; run 'borelog sync' again to retry.");
        }
        Ok(())
    }

    async fn status(
        &self,
        coordinator: &SyncCoordinator<HttpWellStore, FileSnapshotStore>,
        config: &Config,
    ) -> Result<(), CoordinatorError> {
        let reachable = check_server(&config.server_url).await;
        println!("Server:  {}", config.server_url);
        println!(
            "Status:  {}",
            if reachable { "reachable" } else { "unreachable" }
        );
        println!("Wells:   {}", coordinator.replica().len());
        println!("Pending: {}", coordinator.pending().count());
        Ok(())
    }

    /// Probe loop feeding the connectivity signal; the coordinator reacts
    /// with debounced loads.
    async fn watch(
        &self,
        coordinator: &mut SyncCoordinator<HttpWellStore, FileSnapshotStore>,
        config: &Config,
    ) -> Result<(), CoordinatorError> {
        let signal = ConnectivitySignal::new(false);
        let receiver = signal.subscribe();
        let server_url = config.server_url.clone();

        tokio::spawn(async move {
            loop {
                let reachable = check_server(&server_url).await;
                debug!(reachable, "connectivity probe");
                if reachable {
                    signal.set_online();
                } else {
                    signal.set_offline();
                }
                tokio::time::sleep(PROBE_INTERVAL).await;
            }
        });

        println!("Watching {} (ctrl-c to stop)", config.server_url);
        coordinator.run(receiver).await;
        Ok(())
    }
}
