//! Search command - find properties by city, owner, price and rating
//!
//! Prices are in cents per night. `--dry-run` prints the generated SQL and
//! its parameters without touching the database.

use anyhow::Result;
use clap::Args;
use lightbnb_db::{CityMatch, LightbnbConfig, PropertyRepo, SearchFilter, SearchOutcome, SearchQuery};
use tracing::info;

use super::print_json;

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// City name fragment to match
    #[arg(long)]
    pub city: Option<String>,

    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// Minimum nightly cost in cents
    #[arg(long, value_name = "CENTS")]
    pub min_price: Option<i32>,

    /// Maximum nightly cost in cents
    #[arg(long, value_name = "CENTS")]
    pub max_price: Option<i32>,

    /// Minimum average review rating (0-5)
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Maximum number of results (defaults to the configured limit)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Match the city fragment case-insensitively
    #[arg(long, short = 'i')]
    pub ignore_case: bool,

    /// Print the SQL and parameters instead of running the query
    #[arg(long)]
    pub dry_run: bool,
}

impl SearchArgs {
    pub fn to_filter(&self, config: &LightbnbConfig) -> SearchFilter {
        let city_match = if self.ignore_case {
            CityMatch::CaseInsensitive
        } else {
            config.search.city_match
        };

        SearchFilter {
            city: self.city.clone(),
            owner_id: self.owner_id,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            limit: Some(self.limit.unwrap_or(config.search.default_limit)),
            city_match,
        }
    }
}

pub async fn run_search(args: SearchArgs, config: &LightbnbConfig) -> Result<()> {
    let filter = args.to_filter(config);

    if args.dry_run {
        let query = SearchQuery::build(&filter)?;
        println!("{}", query.sql());
        println!("{}", serde_json::to_string(query.params())?);
        return Ok(());
    }

    let pool = super::connect(config).await?;
    match PropertyRepo::new(&pool).search(&filter).await? {
        SearchOutcome::Found(rows) => {
            info!("found {} properties", rows.len());
            print_json(&rows)
        }
        SearchOutcome::Empty => {
            info!("no properties matched");
            print_json::<[()]>(&[])
        }
    }
}
