//! Core domain logic for the weather forecast service.
//! This crate owns the entity, its SQLite store, and the repository/service
//! layers; HTTP concerns live in `forecast_server`.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::weather_forecast::{ForecastId, WeatherForecast, UNSAVED_FORECAST_ID};
pub use repo::forecast_repo::{ForecastRepository, RepoError, RepoResult, SqliteForecastRepository};
pub use service::forecast_service::ForecastService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
