//! Reservation listing rows

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Property;

/// Reservation joined with its property and that property's average rating
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct ReservationWithProperty {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl ReservationWithProperty {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
