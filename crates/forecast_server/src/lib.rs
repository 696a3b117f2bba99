//! HTTP surface for the weather forecast service.
//!
//! # Responsibility
//! - Wire configuration, logging and the endpoint router around `forecast_core`.

pub mod config;
pub mod error;
pub mod routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::{app, AppState, FORECASTS_PATH};

use anyhow::Context;
use log::info;

/// Prepares the store and serves HTTP until the listener fails.
///
/// The database is opened once up front so that migrations and seeding run
/// before the first request, and startup fails fast when the store is
/// unreachable.
pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let conn = forecast_core::db::open_db(&config.db)
        .with_context(|| format!("failed to open database `{}`", config.db.display()))?;
    drop(conn);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    info!(
        "event=server_start module=api status=ok bind={}",
        config.bind
    );

    axum::serve(listener, app(AppState::new(config.db))).await?;
    Ok(())
}
