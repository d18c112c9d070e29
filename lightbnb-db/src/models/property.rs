//! Property records
//!
//! Nightly cost is stored in cents, matching the `cost_per_night` column.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{check_text, ValidationError};

/// Property record from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Property with its average review rating, as returned by search
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct PropertyWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Input for inserting a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

impl NewProperty {
    /// Check text columns are present and counts are non-negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("title", &self.title)?;
        check_text("thumbnail_photo_url", &self.thumbnail_photo_url)?;
        check_text("cover_photo_url", &self.cover_photo_url)?;
        check_text("street", &self.street)?;
        check_text("city", &self.city)?;
        check_text("province", &self.province)?;
        check_text("post_code", &self.post_code)?;
        check_text("country", &self.country)?;

        let counts = [
            ("cost_per_night", self.cost_per_night),
            ("parking_spaces", self.parking_spaces),
            ("number_of_bathrooms", self.number_of_bathrooms),
            ("number_of_bedrooms", self.number_of_bedrooms),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(ValidationError::OutOfRange {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        Ok(())
    }
}
