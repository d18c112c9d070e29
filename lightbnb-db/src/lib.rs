//! lightbnb-db: data-access layer for the LightBnB rental app
//!
//! Repositories for users, properties and reservations over a PostgreSQL
//! pool, plus the dynamic property search query builder.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod search;

pub use config::{load_dotenv, ConfigError, DatabaseConfig, LightbnbConfig, SearchConfig};
pub use db::create_pool;
#[cfg(test)]
pub(crate) use db::MIGRATOR;
pub use db::repos::{PropertyRepo, ReservationRepo, UserRepo};
pub use error::{DbError, Result};
pub use search::{
    search, CityMatch, PropertyStore, SearchFilter, SearchOutcome, SearchQuery, SqlParam,
};
