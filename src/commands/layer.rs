//! Layer CLI commands.

use clap::{Args, Subcommand};

use crate::identity::WellId;
use crate::models::Lithology;
use crate::remote::HttpWellStore;
use crate::store::FileSnapshotStore;
use crate::sync::{CoordinatorError, SyncCoordinator};

#[derive(Debug, Args)]
pub struct LayerCommand {
    #[command(subcommand)]
    pub command: LayerSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum LayerSubcommand {
    /// Add a geological layer to a well
    Add {
        /// Id of the owning well
        well_id: String,

        /// Start depth in meters
        #[arg(long)]
        start: f64,

        /// End depth in meters
        #[arg(long)]
        end: f64,

        /// Lithology (prs, peat, loam, sandy_loam, sand)
        #[arg(long, short)]
        lithology: Lithology,

        /// Free-text description
        #[arg(long, short)]
        description: Option<String>,
    },
}

impl LayerCommand {
    pub fn run(
        &self,
        coordinator: &mut SyncCoordinator<HttpWellStore, FileSnapshotStore>,
    ) -> Result<(), CoordinatorError> {
        match &self.command {
            LayerSubcommand::Add {
                well_id,
                start,
                end,
                lithology,
                description,
            } => {
                let layer = coordinator.place_layer(
                    &WellId::from(well_id.as_str()),
                    *start,
                    *end,
                    *lithology,
                    description.clone(),
                )?;
                println!("Layer added: {}", layer);
                Ok(())
            }
        }
    }
}
