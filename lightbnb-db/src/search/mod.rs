//! Property search
//!
//! [`SearchQuery::build`] turns a [`SearchFilter`] into SQL text plus ordered
//! parameters; [`search`] runs it against any [`PropertyStore`] and reports
//! matches, no matches, and failures as distinct outcomes.

pub mod builder;
pub mod filter;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, error, warn};

use crate::error::{DbError, Result};
use crate::models::PropertyWithRating;

pub use builder::{Aggregation, SearchQuery, SqlParam};
pub use filter::{CityMatch, SearchFilter, DEFAULT_LIMIT, MAX_RATING};

/// Executes a built search query against a store
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn fetch_properties(&self, query: &SearchQuery) -> Result<Vec<PropertyWithRating>>;
}

#[async_trait]
impl PropertyStore for PgPool {
    async fn fetch_properties(&self, query: &SearchQuery) -> Result<Vec<PropertyWithRating>> {
        let rows = query
            .bind_to(sqlx::query_as::<_, PropertyWithRating>(query.sql()))
            .fetch_all(self)
            .await?;
        Ok(rows)
    }
}

/// Successful search result
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// At least one property matched, ascending by nightly cost
    Found(Vec<PropertyWithRating>),
    /// The query ran and matched nothing
    Empty,
}

impl SearchOutcome {
    fn from_rows(rows: Vec<PropertyWithRating>) -> Self {
        if rows.is_empty() {
            Self::Empty
        } else {
            Self::Found(rows)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Found(rows) => rows.len(),
            Self::Empty => 0,
        }
    }

    pub fn into_vec(self) -> Vec<PropertyWithRating> {
        match self {
            Self::Found(rows) => rows,
            Self::Empty => Vec::new(),
        }
    }
}

/// Build the search statement, logging filters that fail validation.
pub(crate) fn build_query(filter: &SearchFilter) -> Result<SearchQuery> {
    SearchQuery::build(filter).map_err(|err| {
        warn!(error = %err, "rejected search filter");
        DbError::from(err)
    })
}

/// Search properties matching `filter`.
///
/// Invalid filters are rejected before the store is touched. Store failures
/// are logged and returned; they are never folded into an empty result.
pub async fn search<S>(store: &S, filter: &SearchFilter) -> Result<SearchOutcome>
where
    S: PropertyStore + ?Sized,
{
    let query = build_query(filter)?;

    debug!(sql = %query.sql(), params = ?query.params(), "running property search");

    match store.fetch_properties(&query).await {
        Ok(rows) => {
            debug!(rows = rows.len(), "property search finished");
            Ok(SearchOutcome::from_rows(rows))
        }
        Err(err) => {
            error!(error = %err, unavailable = err.is_unavailable(), "property search failed");
            Err(err)
        }
    }
}
