//! Property search SQL assembly
//!
//! Predicates are collected in order (city, owner, price, rating) together
//! with their bound values; the `WHERE` keyword is written only when at least
//! one predicate exists, and the limit is always the last parameter.

use serde::Serialize;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use super::filter::SearchFilter;
use crate::models::ValidationError;

const BASE_SELECT: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating
FROM properties
JOIN property_reviews ON properties.id = property_reviews.property_id";

/// A positional query parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlParam {
    Text(String),
    Int(i32),
    BigInt(i64),
    Float(f64),
}

/// Grouping needed for the average-rating aggregate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Aggregation {
    GroupOnly,
    GroupWithHaving(f64),
}

impl Aggregation {
    fn for_filter(filter: &SearchFilter) -> Self {
        match filter.min_rating {
            Some(threshold) => Self::GroupWithHaving(threshold),
            None => Self::GroupOnly,
        }
    }
}

#[derive(Debug, Default)]
struct Predicates {
    clauses: Vec<String>,
    params: Vec<SqlParam>,
}

impl Predicates {
    /// Record a value and return its placeholder.
    ///
    /// Placeholders are numbered here rather than through
    /// `sqlx::QueryBuilder::push_bind` so the built statement stays a plain
    /// (text, params) pair that can be inspected and printed before it runs.
    fn bind(&mut self, param: SqlParam) -> String {
        self.params.push(param);
        format!("${}", self.params.len())
    }

    fn push(&mut self, clause: String) {
        self.clauses.push(clause);
    }

    fn where_clause(&self) -> Option<String> {
        if self.clauses.is_empty() {
            None
        } else {
            Some(format!("WHERE {}", self.clauses.join(" AND ")))
        }
    }
}

/// Parameterized property search statement
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    sql: String,
    params: Vec<SqlParam>,
    predicates: usize,
    aggregation: Aggregation,
}

impl SearchQuery {
    /// Validate the filter and assemble the statement.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::{SearchFilter, SearchQuery, SqlParam};
    ///
    /// let query = SearchQuery::build(&SearchFilter::new().owner_id(7)).unwrap();
    /// assert!(query.sql().contains("WHERE owner_id = $1"));
    /// assert_eq!(query.params(), &[SqlParam::Int(7), SqlParam::BigInt(10)]);
    /// ```
    pub fn build(filter: &SearchFilter) -> Result<Self, ValidationError> {
        filter.validate()?;

        let mut predicates = Predicates::default();

        if let Some(city) = filter.city_fragment() {
            let p = predicates.bind(SqlParam::Text(format!("%{}%", escape_like(city))));
            predicates.push(format!("city {} {}", filter.city_match.operator(), p));
        }

        if let Some(owner_id) = filter.owner_id {
            let p = predicates.bind(SqlParam::Int(owner_id));
            predicates.push(format!("owner_id = {}", p));
        }

        // A missing bound leaves that side of the range open.
        let price = match (filter.min_price, filter.max_price) {
            (Some(min), Some(max)) => {
                let lo = predicates.bind(SqlParam::Int(min));
                let hi = predicates.bind(SqlParam::Int(max));
                Some(format!("cost_per_night >= {} AND cost_per_night <= {}", lo, hi))
            }
            (Some(min), None) => {
                let lo = predicates.bind(SqlParam::Int(min));
                Some(format!("cost_per_night >= {}", lo))
            }
            (None, Some(max)) => {
                let hi = predicates.bind(SqlParam::Int(max));
                Some(format!("cost_per_night <= {}", hi))
            }
            (None, None) => None,
        };
        if let Some(clause) = price {
            predicates.push(clause);
        }

        let mut sql = String::from(BASE_SELECT);
        if let Some(where_clause) = predicates.where_clause() {
            sql.push('\n');
            sql.push_str(&where_clause);
        }

        let aggregation = Aggregation::for_filter(filter);
        sql.push_str("\nGROUP BY properties.id");
        if let Aggregation::GroupWithHaving(threshold) = aggregation {
            let p = predicates.bind(SqlParam::Float(threshold));
            sql.push_str(&format!("\nHAVING avg(property_reviews.rating) >= {}", p));
        }

        let limit = predicates.bind(SqlParam::BigInt(i64::from(filter.effective_limit())));
        sql.push_str(&format!("\nORDER BY cost_per_night\nLIMIT {}", limit));

        let count = predicates.clauses.len() + usize::from(aggregation != Aggregation::GroupOnly);

        Ok(Self {
            sql,
            params: predicates.params,
            predicates: count,
            aggregation,
        })
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Number of active filter predicates, the rating threshold included.
    pub fn predicate_count(&self) -> usize {
        self.predicates
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Bind every parameter, in order, onto a typed query.
    pub fn bind_to<'q, O>(
        &'q self,
        mut query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        for param in &self.params {
            query = match param {
                SqlParam::Text(value) => query.bind(value.as_str()),
                SqlParam::Int(value) => query.bind(*value),
                SqlParam::BigInt(value) => query.bind(*value),
                SqlParam::Float(value) => query.bind(*value),
            };
        }
        query
    }
}

/// Escape LIKE metacharacters so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::CityMatch;

    fn build(filter: SearchFilter) -> SearchQuery {
        SearchQuery::build(&filter).expect("filter should be valid")
    }

    #[test]
    fn no_filters() {
        let query = build(SearchFilter::new());
        assert!(!query.sql().contains("WHERE"));
        assert!(!query.sql().contains("HAVING"));
        assert!(query.sql().contains("GROUP BY properties.id"));
        assert!(query.sql().ends_with("ORDER BY cost_per_night\nLIMIT $1"));
        assert_eq!(query.params(), &[SqlParam::BigInt(10)]);
        assert_eq!(query.aggregation(), Aggregation::GroupOnly);
        assert_eq!(query.predicate_count(), 0);
    }

    #[test]
    fn no_filters_custom_limit() {
        let query = build(SearchFilter::new().limit(5));
        assert_eq!(query.params(), &[SqlParam::BigInt(5)]);
        assert!(!query.sql().contains("WHERE"));
    }

    #[test]
    fn always_joins_reviews() {
        let query = build(SearchFilter::new());
        assert!(query
            .sql()
            .contains("JOIN property_reviews ON properties.id = property_reviews.property_id"));
    }

    #[test]
    fn city_and_rating() {
        let query = build(SearchFilter::new().city("canc").min_rating(4.0));
        let sql = query.sql();
        assert!(sql.contains("WHERE city LIKE $1"));
        assert!(sql.contains("GROUP BY properties.id\nHAVING avg(property_reviews.rating) >= $2"));
        assert!(sql.ends_with("ORDER BY cost_per_night\nLIMIT $3"));
        assert_eq!(
            query.params(),
            &[
                SqlParam::Text("%canc%".to_owned()),
                SqlParam::Float(4.0),
                SqlParam::BigInt(10),
            ]
        );
        assert_eq!(query.aggregation(), Aggregation::GroupWithHaving(4.0));
    }

    #[test]
    fn owner_only() {
        let query = build(SearchFilter::new().owner_id(7));
        assert!(query.sql().contains("WHERE owner_id = $1"));
        assert!(!query.sql().contains(" AND "));
        assert_eq!(query.params(), &[SqlParam::Int(7), SqlParam::BigInt(10)]);
        assert_eq!(query.predicate_count(), 1);
    }

    #[test]
    fn second_predicate_uses_and() {
        let query = build(SearchFilter::new().city("Van").owner_id(3));
        assert_eq!(query.sql().matches("WHERE").count(), 1);
        assert!(query.sql().contains("WHERE city LIKE $1 AND owner_id = $2"));
    }

    #[test]
    fn price_range_binds_min_then_max() {
        let query = build(SearchFilter::new().min_price(5_000).max_price(20_000));
        assert!(query
            .sql()
            .contains("WHERE cost_per_night >= $1 AND cost_per_night <= $2"));
        assert_eq!(
            query.params(),
            &[
                SqlParam::Int(5_000),
                SqlParam::Int(20_000),
                SqlParam::BigInt(10)
            ]
        );
    }

    #[test]
    fn open_ended_price_bounds() {
        let query = build(SearchFilter::new().min_price(5_000));
        assert!(query.sql().contains("WHERE cost_per_night >= $1\n"));
        assert!(!query.sql().contains("cost_per_night <="));
        assert_eq!(query.params().len(), 2);

        let query = build(SearchFilter::new().max_price(9_000));
        assert!(query.sql().contains("WHERE cost_per_night <= $1\n"));
        assert_eq!(query.params(), &[SqlParam::Int(9_000), SqlParam::BigInt(10)]);
    }

    #[test]
    fn every_filter_in_order() {
        let query = build(
            SearchFilter::new()
                .city("Cancun")
                .owner_id(2)
                .min_price(100)
                .max_price(900)
                .min_rating(3.5)
                .limit(20),
        );
        assert!(query.sql().contains(
            "WHERE city LIKE $1 AND owner_id = $2 AND cost_per_night >= $3 AND cost_per_night <= $4"
        ));
        assert!(query.sql().contains("HAVING avg(property_reviews.rating) >= $5"));
        assert!(query.sql().ends_with("LIMIT $6"));
        assert_eq!(
            query.params(),
            &[
                SqlParam::Text("%Cancun%".to_owned()),
                SqlParam::Int(2),
                SqlParam::Int(100),
                SqlParam::Int(900),
                SqlParam::Float(3.5),
                SqlParam::BigInt(20),
            ]
        );
        assert_eq!(query.predicate_count(), 4);
    }

    #[test]
    fn rating_alone_has_no_where() {
        let query = build(SearchFilter::new().min_rating(4.0));
        assert!(!query.sql().contains("WHERE"));
        assert!(query.sql().contains("HAVING avg(property_reviews.rating) >= $1"));
    }

    #[test]
    fn case_insensitive_city_uses_ilike() {
        let query = build(
            SearchFilter::new()
                .city("canc")
                .city_match(CityMatch::CaseInsensitive),
        );
        assert!(query.sql().contains("WHERE city ILIKE $1"));
    }

    #[test]
    fn city_wildcards_are_escaped() {
        let query = build(SearchFilter::new().city("50%_off"));
        assert_eq!(
            query.params()[0],
            SqlParam::Text("%50\\%\\_off%".to_owned())
        );
    }

    #[test]
    fn city_whitespace_is_kept_in_pattern() {
        let query = build(SearchFilter::new().city("San "));
        assert_eq!(query.params()[0], SqlParam::Text("%San %".to_owned()));
    }

    #[test]
    fn city_value_never_reaches_sql_text() {
        let query = build(SearchFilter::new().city("x'; DROP TABLE users; --"));
        assert!(!query.sql().contains("DROP TABLE"));
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let err = SearchQuery::build(&SearchFilter::new().limit(0)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "limit", .. }));
    }

    #[test]
    fn params_serialize_as_plain_json() {
        let query = build(SearchFilter::new().city("canc").min_rating(4.0));
        let json = serde_json::to_string(query.params()).unwrap();
        assert_eq!(json, r#"["%canc%",4.0,10]"#);
    }
}
