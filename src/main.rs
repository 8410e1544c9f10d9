use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod common;
mod config;
mod docs;
mod infrastructure;
mod middleware;
mod modules;
mod routes;
mod state;

#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod tests;

use crate::config::settings::AppConfig;
use crate::infrastructure::db::{pool, seed};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("SESSION_SECRET must be set")?;
    let db = pool::connect_to_db(&config.database_url).await?;
    pool::run_migrations(&db).await?;
    seed::run_seeders(&db, &config).await?;

    let addr = format!("0.0.0.0:{}", config.server_port);
    let app = app::create_app(AppState::new(config, db));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
