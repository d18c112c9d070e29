//! lightbnb CLI - operator tooling for the LightBnB data store
//!
//! - Property search with optional filters (`search`)
//! - User lookup and signup (`user`)
//! - Guest reservation listing (`reservations`)
//! - Property insertion from JSON (`property`)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{load_dotenv, LightbnbConfig};

mod commands;
mod tracing_setup;

use commands::properties::PropertyArgs;
use commands::reservations::ReservationArgs;
use commands::search::SearchArgs;
use commands::users::UserArgs;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and manage the LightBnB rental database"
)]
struct Cli {
    /// Enable debug logging (to stderr)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (defaults to ./lightbnb.toml or ~/.lightbnb/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search properties, cheapest first
    Search(SearchArgs),
    /// Look up or create users
    User(UserArgs),
    /// List a guest's current and upcoming reservations
    Reservations(ReservationArgs),
    /// Manage property listings
    Property(PropertyArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    load_dotenv();
    let mut config = match &cli.config {
        Some(path) => LightbnbConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LightbnbConfig::load(),
    };
    config.database.apply_env();

    match cli.command {
        Commands::Search(args) => commands::run_search(args, &config).await?,
        Commands::User(args) => commands::run_user(args, &config).await?,
        Commands::Reservations(args) => commands::run_reservations(args, &config).await?,
        Commands::Property(args) => commands::run_property(args, &config).await?,
    }
    Ok(())
}
