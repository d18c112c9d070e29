use anyhow::Result;
use clap::Args;
use lightbnb_db::{LightbnbConfig, ReservationRepo};

use super::print_json;

#[derive(Args, Debug)]
pub struct ReservationArgs {
    /// Guest user id
    #[arg(long)]
    pub guest_id: i32,

    /// Maximum number of reservations
    #[arg(long)]
    pub limit: Option<u32>,
}

/// List a guest's current and upcoming reservations.
pub async fn run_reservations(args: ReservationArgs, config: &LightbnbConfig) -> Result<()> {
    let pool = super::connect(config).await?;
    let rows = ReservationRepo::new(&pool)
        .list_for_guest(args.guest_id, args.limit)
        .await?;
    print_json(&rows)
}
