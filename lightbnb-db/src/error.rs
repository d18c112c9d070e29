//! Error types for lightbnb-db

use thiserror::Error;

use crate::models::ValidationError;

pub type Result<T, E = DbError> = std::result::Result<T, E>;

/// Database error type
///
/// Store outages, rejected input and query failures are separate variants so
/// callers never have to guess whether "no rows" meant "no data".
#[derive(Debug, Error)]
pub enum DbError {
    #[error("store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(#[from] ValidationError),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),
}

impl DbError {
    /// True when the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => Self::Unavailable(err),
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                Self::Conflict(db.message().to_owned())
            }
            other => Self::Sqlx(other),
        }
    }
}
