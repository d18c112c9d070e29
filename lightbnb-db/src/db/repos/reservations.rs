//! Reservation repository
//!
//! Lists a guest's current and upcoming stays joined with the property and
//! its average rating in a single query.

use sqlx::PgPool;

use crate::error::Result;
use crate::models::{ReservationWithProperty, ValidationError};
use crate::search::DEFAULT_LIMIT;

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reservations for `guest_id` ending after today, earliest start first.
    ///
    /// Properties without reviews are still listed, with no average rating.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: Option<u32>,
    ) -> Result<Vec<ReservationWithProperty>> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if limit == 0 {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                reason: "must be at least 1",
            }
            .into());
        }

        let rows = sqlx::query_as::<_, ReservationWithProperty>(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.start_date,
                reservations.end_date,
                properties.*,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
            WHERE reservations.guest_id = $1
              AND reservations.end_date > now()::date
            GROUP BY reservations.id, properties.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(guest_id, rows = rows.len(), "listed reservations");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::tests_support::seed;
    use crate::error::DbError;

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn lists_only_upcoming_for_guest(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        let repo = ReservationRepo::new(&pool);

        let rows = repo.list_for_guest(2, None).await.unwrap();
        let ids: Vec<i32> = rows.iter().map(|r| r.reservation_id).collect();
        assert_eq!(ids, vec![3, 2]);
        assert_eq!(rows[0].property.city, "Cancun");
        assert_eq!(rows[0].average_rating, Some(4.5));
        assert_eq!(rows[0].nights(), 2);

        assert!(repo.list_for_guest(1, None).await.unwrap().is_empty());
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn honours_limit(pool: PgPool) -> sqlx::Result<()> {
        seed(&pool).await?;
        let rows = ReservationRepo::new(&pool)
            .list_for_guest(2, Some(1))
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[sqlx::test(migrator = "crate::MIGRATOR")]
    #[ignore = "requires database"]
    async fn zero_limit_rejected(pool: PgPool) -> sqlx::Result<()> {
        let err = ReservationRepo::new(&pool)
            .list_for_guest(2, Some(0))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::InvalidFilter(_)));
        Ok(())
    }
}
