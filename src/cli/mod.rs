use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::config;
use crate::database::DatabaseManager;

#[derive(Parser)]
#[command(name = "posts-admin")]
#[command(about = "Operational commands for the Posts Search API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Mint a bearer token for a user (local testing)")]
    Token {
        #[arg(long, help = "User id placed in the token claims")]
        user_id: i32,
        #[arg(long, help = "Hours until expiry (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        hours: Option<i64>,
    },

    #[command(about = "Apply database migrations to DATABASE_URL")]
    Migrate,

    #[command(about = "Check database connectivity")]
    Ping,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = config::config();

    match cli.command {
        Commands::Token { user_id, hours } => {
            let claims = match hours {
                Some(h) => Claims::with_expiry(user_id, h),
                None => Claims::new(user_id),
            };
            let token = generate_jwt(&claims).context("failed to sign token")?;
            if cli.json {
                println!("{}", json!({ "token": token, "exp": claims.exp }));
            } else {
                println!("{token}");
            }
        }
        Commands::Migrate => {
            let pool = DatabaseManager::connect_lazy(&config.database)?;
            DatabaseManager::run_migrations(&pool).await?;
            pool.close().await;
            report(cli.json, "migrated");
        }
        Commands::Ping => {
            let pool = DatabaseManager::connect_lazy(&config.database)?;
            DatabaseManager::health_check(&pool).await?;
            pool.close().await;
            report(cli.json, "ok");
        }
    }

    Ok(())
}

fn report(as_json: bool, status: &str) {
    if as_json {
        println!("{}", json!({ "status": status }));
    } else {
        println!("{status}");
    }
}
