//! Property repository
//!
//! - create: typed INSERT of every listing column, RETURNING the row
//! - search: filtered listing via [`crate::search`]
//! - stream: the same query as a lazy, one-shot row stream

use async_stream::stream;
use futures::stream::BoxStream;
use futures::StreamExt;
use sqlx::PgPool;
use tracing::{debug, error};

use crate::error::{DbError, Result};
use crate::models::{NewProperty, Property, PropertyWithRating};
use crate::search::{self, SearchFilter, SearchOutcome};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first.
    pub async fn search(&self, filter: &SearchFilter) -> Result<SearchOutcome> {
        search::search(self.pool, filter).await
    }

    /// Stream rows matching `filter`, cheapest first.
    ///
    /// The filter is validated up front. Rows arrive as the store produces
    /// them; the stream can be consumed once. Store failures are logged and
    /// yielded as `Err` items.
    pub fn stream(
        &self,
        filter: &SearchFilter,
    ) -> Result<BoxStream<'a, Result<PropertyWithRating>>> {
        let query = search::build_query(filter)?;
        let pool = self.pool;

        debug!(sql = %query.sql(), params = ?query.params(), "streaming property search");

        let rows = stream! {
            let mut rows = query
                .bind_to(sqlx::query_as::<_, PropertyWithRating>(query.sql()))
                .fetch(pool);
            while let Some(row) = rows.next().await {
                yield row.map_err(|err| {
                    let err = DbError::from(err);
                    error!(error = %err, unavailable = err.is_unavailable(), "property stream failed");
                    err
                });
            }
        };

        Ok(rows.boxed())
    }

    /// Insert a property and return the stored row.
    ///
    /// An unknown owner surfaces as `NotFound`.
    pub async fn create(&self, property: &NewProperty) -> Result<Property> {
        property.validate()?;

        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description, thumbnail_photo_url, cover_photo_url,
                cost_per_night, street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => DbError::NotFound {
                resource: "owner",
                id: property.owner_id.to_string(),
            },
            other => DbError::from(other),
        })?;

        tracing::info!(property_id = created.id, owner_id = created.owner_id, "created property");
        Ok(created)
    }
}
