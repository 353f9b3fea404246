//! Well CLI commands.

use clap::{Args, Subcommand};

use crate::identity::WellId;
use crate::models::WellInput;
use crate::remote::HttpWellStore;
use crate::store::FileSnapshotStore;
use crate::sync::{CoordinatorError, SyncCoordinator};

#[derive(Debug, Args)]
pub struct WellCommand {
    #[command(subcommand)]
    pub command: WellSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum WellSubcommand {
    /// List all wells in the replica
    List,

    /// Create a new well (recorded offline when the server is unreachable)
    Create {
        /// Well name, e.g. SKV-001
        name: String,

        /// Survey area
        #[arg(long, short)]
        area: String,

        /// Structure the well serves
        #[arg(long, short)]
        structure: String,

        /// Design depth in meters (0.01 - 30.00)
        #[arg(long, short)]
        depth: f64,
    },

    /// Show one well with its geological layers
    Show {
        /// Well id (server id or offline_... id)
        id: String,
    },
}

impl WellCommand {
    pub async fn run(
        &self,
        coordinator: &mut SyncCoordinator<HttpWellStore, FileSnapshotStore>,
    ) -> Result<(), CoordinatorError> {
        match &self.command {
            WellSubcommand::List => {
                coordinator.request_load().await?;
                self.list(coordinator)
            }
            WellSubcommand::Create {
                name,
                area,
                structure,
                depth,
            } => {
                let input = WellInput {
                    name: name.clone(),
                    area: area.clone(),
                    structure: structure.clone(),
                    design_depth: *depth,
                };
                let well = coordinator.create_well(input).await?;
                if well.is_provisional() {
                    println!("Well '{}' saved offline as {}", well.name, well.id);
                    println!("Run 'borelog sync' once connected to push it.");
                } else {
                    println!("Well '{}' created with id {}", well.name, well.id);
                }
                Ok(())
            }
            WellSubcommand::Show { id } => {
                let well_id = WellId::from(id.as_str());
                let well = coordinator
                    .replica()
                    .iter()
                    .find(|w| w.id == well_id)
                    .ok_or_else(|| CoordinatorError::WellNotFound(id.clone()))?;
                print!("{}", well);
                Ok(())
            }
        }
    }

    fn list(
        &self,
        coordinator: &SyncCoordinator<HttpWellStore, FileSnapshotStore>,
    ) -> Result<(), CoordinatorError> {
        let replica = coordinator.replica();
        if replica.is_empty() {
            println!("No wells recorded yet.");
            return Ok(());
        }

        for well in replica {
            let marker = if well.is_provisional() {
                " (offline)"
            } else {
                ""
            };
            println!(
                "{}  {} / {} / {:.2} m{}",
                well.id, well.name, well.area, well.design_depth, marker
            );
        }

        let pending = coordinator.pending().count();
        if pending > 0 {
            println!();
            println!("{} well(s) pending sync.", pending);
        }
        Ok(())
    }
}
