//! walletd - Wallet Balance Service
//!
//! Entry point. Architecture:
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Postgres │───▶│  Wallet  │───▶│ Gateway  │
//! │  (YAML)  │    │  (sqlx)  │    │   core   │    │  (axum)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};

use walletd::config::AppConfig;
use walletd::db::Database;
use walletd::gateway::{self, state::AppState};
use walletd::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env);

    // Guard must stay alive for the whole process; dropping it stops
    // the non-blocking log writer.
    let _log_guard = init_logging(&config);

    tracing::info!(env = %env, "Starting walletd");

    let db = Arc::new(
        Database::connect(&config.postgres_url)
            .await
            .context("Failed to connect to PostgreSQL")?,
    );
    db.init_schema()
        .await
        .context("Failed to initialize wallet schema")?;

    let state = Arc::new(AppState::new(db, &config.retry));

    gateway::serve(&config.gateway, state).await;

    Ok(())
}
