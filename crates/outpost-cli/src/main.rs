mod rank;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use outpost_core::TravelMode;

#[derive(Debug, Parser)]
#[command(name = "outpost-cli")]
#[command(about = "Outlet distance ranking from a pasted location")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank all outlets by distance from a location.
    Rank {
        /// Raw "lat,long" pair or a (possibly shortened) Google Maps link.
        location: String,
        /// Outlets file (YAML or CSV); overrides OUTPOST_OUTLETS_PATH.
        #[arg(long)]
        outlets: Option<PathBuf>,
        /// Write the ranked table as CSV to this path.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Travel mode appended to route links.
        #[arg(long)]
        mode: Option<TravelMode>,
    },
    /// Validate an outlets file without ranking anything.
    Validate {
        /// Outlets file (YAML or CSV); overrides OUTPOST_OUTLETS_PATH.
        #[arg(long)]
        outlets: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = outpost_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Rank {
            location,
            outlets,
            csv,
            mode,
        } => {
            rank::run_rank(
                &config,
                &location,
                outlets.as_deref(),
                csv.as_deref(),
                mode.or(config.travel_mode),
            )
            .await
        }
        Commands::Validate { outlets } => {
            let path = outlets.unwrap_or_else(|| config.outlets_path.clone());
            let loaded = outpost_core::load_outlets(&path)?;
            let with_coords = loaded.iter().filter(|o| o.coordinate().is_some()).count();
            println!(
                "{}: {} outlets, {} with coordinates",
                path.display(),
                loaded.len(),
                with_coords
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
