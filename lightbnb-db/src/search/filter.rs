//! Property search criteria

use serde::{Deserialize, Serialize};

use crate::models::ValidationError;

/// Result count used when the caller gives no limit
pub const DEFAULT_LIMIT: u32 = 10;

/// Highest possible review rating
pub const MAX_RATING: f64 = 5.0;

/// How the city fragment is compared against `properties.city`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CityMatch {
    /// `LIKE`
    #[default]
    CaseSensitive,
    /// `ILIKE`
    CaseInsensitive,
}

impl CityMatch {
    pub fn operator(self) -> &'static str {
        match self {
            Self::CaseSensitive => "LIKE",
            Self::CaseInsensitive => "ILIKE",
        }
    }
}

/// Optional search criteria plus a result limit.
///
/// Every field is independent; an unset field places no constraint on the
/// results.
///
/// ```
/// use lightbnb_db::SearchFilter;
///
/// let filter = SearchFilter::new().city("canc").min_rating(4.0);
/// assert_eq!(filter.effective_limit(), 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    /// Cents per night
    pub min_price: Option<i32>,
    /// Cents per night
    pub max_price: Option<i32>,
    pub min_rating: Option<f64>,
    pub limit: Option<u32>,
    #[serde(default)]
    pub city_match: CityMatch,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn owner_id(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn min_price(mut self, cents: i32) -> Self {
        self.min_price = Some(cents);
        self
    }

    pub fn max_price(mut self, cents: i32) -> Self {
        self.max_price = Some(cents);
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn city_match(mut self, city_match: CityMatch) -> Self {
        self.city_match = city_match;
        self
    }

    pub fn effective_limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// City fragment to match, if any. A blank fragment counts as unset.
    pub fn city_fragment(&self) -> Option<&str> {
        self.city.as_deref().filter(|city| !city.trim().is_empty())
    }

    /// Reject values that would produce a meaningless query.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.limit == Some(0) {
            return Err(ValidationError::OutOfRange {
                field: "limit",
                reason: "must be at least 1",
            });
        }

        for (field, price) in [("min_price", self.min_price), ("max_price", self.max_price)] {
            if matches!(price, Some(p) if p < 0) {
                return Err(ValidationError::OutOfRange {
                    field,
                    reason: "must not be negative",
                });
            }
        }

        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(ValidationError::InvertedRange { min, max });
            }
        }

        if let Some(rating) = self.min_rating {
            if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ValidationError::OutOfRange {
                    field: "min_rating",
                    reason: "must be between 0 and 5",
                });
            }
        }

        Ok(())
    }
}
