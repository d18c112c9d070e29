//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One shared `PgPool`; repositories borrow it
//! - Every value is a bound parameter, never interpolated
//! - Rely on DB constraints and map violations to `DbError`
//!
//! The schema itself is provisioned outside this crate; `migrations/` only
//! seeds throwaway databases for `#[sqlx::test]`.

pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;

/// Schema fixture applied to each `#[sqlx::test]` database
#[cfg(test)]
pub(crate) static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../migrations");
