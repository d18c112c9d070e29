//! Command implementations for lightbnb CLI

pub mod properties;
pub mod reservations;
pub mod search;
pub mod users;

use anyhow::{Context, Result};
use lightbnb_db::{create_pool, LightbnbConfig};
use serde::Serialize;
use sqlx::PgPool;

// Re-export main dispatcher functions for flat access from main.rs
pub use properties::run_property;
pub use reservations::run_reservations;
pub use search::run_search;
pub use users::run_user;

/// Open the pool described by the loaded config.
pub(crate) async fn connect(config: &LightbnbConfig) -> Result<PgPool> {
    create_pool(&config.database)
        .await
        .context("Failed to connect to database (check DATABASE_URL or DB_* variables)")
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", json);
    Ok(())
}
