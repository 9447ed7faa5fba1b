use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use posts_search_api::app::app;
use posts_search_api::config;
use posts_search_api::database::{DatabaseManager, PgPostStore};
use posts_search_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Posts Search API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("JWT_SECRET is not set; every protected request will be rejected");
    }

    let pool = DatabaseManager::connect_lazy(&config.database)?;
    if config.database.run_migrations {
        DatabaseManager::run_migrations(&pool).await?;
    }

    let mut store = PgPostStore::new(pool.clone());
    if config.database.enable_slow_query_warning {
        store = store.with_slow_query_warning(Duration::from_millis(config.database.slow_query_threshold_ms));
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Posts Search API listening on http://{}", bind_addr);

    axum::serve(listener, app(AppState::new(store)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
