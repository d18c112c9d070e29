//! Property command - insert listings from JSON
//!
//! The JSON file holds one object with the listing fields, e.g.
//! `{"owner_id": 1, "title": "Loft", "cost_per_night": 9000, ...}`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use lightbnb_db::models::NewProperty;
use lightbnb_db::{LightbnbConfig, PropertyRepo};

use super::print_json;

#[derive(Args, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Insert a property described by a JSON file
    Add {
        /// Path to the property JSON file
        file: PathBuf,
    },
}

pub async fn run_property(args: PropertyArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        PropertyCommand::Add { file } => {
            let property = read_property(&file)?;
            property
                .validate()
                .with_context(|| format!("Invalid property in {}", file.display()))?;

            let pool = super::connect(config).await?;
            let created = PropertyRepo::new(&pool).create(&property).await?;
            print_json(&created)
        }
    }
}

fn read_property(path: &Path) -> Result<NewProperty> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}
