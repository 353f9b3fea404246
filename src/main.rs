//! Borelog: offline-first field journal for drilling wells.
//!
//! Field technicians record wells and their geological layers against a
//! local replica that keeps working without connectivity; pending offline
//! records are pushed to the remote well store once the link returns.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use borelog::commands::{LayerCommand, SyncCommand, WellCommand};
use borelog::config::Config;
use borelog::remote::{check_server, HttpWellStore};
use borelog::store::FileSnapshotStore;
use borelog::sync::SyncCoordinator;

#[derive(Parser)]
#[command(name = "borelog")]
#[command(version)]
#[command(about = "Offline-first drilling well journal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage wells
    Well(WellCommand),

    /// Manage geological layers
    Layer(LayerCommand),

    /// Synchronize with the remote well store
    Sync(SyncCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "borelog=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config)?;

    let remote = HttpWellStore::new(&config.server_url);
    let store = FileSnapshotStore::new(config.snapshot_path.clone());
    let mut coordinator = SyncCoordinator::new(remote, store)?;

    // One-shot commands resolve connectivity with a single probe; watch
    // mode drives its own signal instead.
    coordinator.connectivity_changed(check_server(&config.server_url).await);

    match cli.command {
        Commands::Well(cmd) => cmd.run(&mut coordinator).await?,
        Commands::Layer(cmd) => cmd.run(&mut coordinator)?,
        Commands::Sync(cmd) => cmd.run(&mut coordinator, &config).await?,
    }

    Ok(())
}
