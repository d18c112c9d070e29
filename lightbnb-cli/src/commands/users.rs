//! User command - look up and create users

use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Subcommand};
use lightbnb_db::models::NewUser;
use lightbnb_db::{LightbnbConfig, UserRepo};

use super::print_json;

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Look up a user by email or id
    #[command(group(ArgGroup::new("key").required(true).args(["email", "id"])))]
    Get {
        /// Email address to look up
        #[arg(long)]
        email: Option<String>,
        /// User id to look up
        #[arg(long)]
        id: Option<i32>,
    },
    /// Create a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Password hash, stored as given
        #[arg(long, env = "LIGHTBNB_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn run_user(args: UserArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        UserCommand::Get { email, id } => {
            let pool = super::connect(config).await?;
            let repo = UserRepo::new(&pool);
            let user = match (email, id) {
                (Some(email), _) => repo.get_by_email(&email).await?,
                (None, Some(id)) => repo.get_by_id(id).await?,
                (None, None) => anyhow::bail!("pass --email or --id"),
            };
            print_json(&user)
        }
        UserCommand::Add {
            name,
            email,
            password,
        } => {
            let user = NewUser::new(&name, &email, &password).context("Invalid user")?;
            let pool = super::connect(config).await?;
            let created = UserRepo::new(&pool).create(user).await?;
            print_json(&created)
        }
    }
}
