//! Weather forecast use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for API callers.
//! - Delegate persistence to repository implementations unchanged.
//!
//! # Invariants
//! - Service APIs never bypass the repository.
//! - Absence (`Ok(None)`) and errors are forwarded exactly as returned.
//! - Business rules (validation, auditing) belong here, not in the router
//!   or the repository.

use crate::model::weather_forecast::{ForecastId, WeatherForecast};
use crate::repo::forecast_repo::{ForecastRepository, RepoResult};

/// Use-case service wrapper for forecast CRUD operations.
pub struct ForecastService<R: ForecastRepository> {
    repo: R,
}

impl<R: ForecastRepository> ForecastService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every stored forecast in store order.
    pub fn list_forecasts(&self) -> RepoResult<Vec<WeatherForecast>> {
        self.repo.list_forecasts()
    }

    /// Gets one forecast by ID.
    pub fn get_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        self.repo.get_forecast(id)
    }

    /// Persists a new forecast and returns it with the store-assigned ID.
    pub fn create_forecast(&self, forecast: &WeatherForecast) -> RepoResult<WeatherForecast> {
        self.repo.create_forecast(forecast)
    }

    /// Overwrites an existing forecast.
    ///
    /// # Contract
    /// - Returns `Ok(None)` without creating a row when `id` does not exist.
    /// - On success returns `forecast` as passed in, including its `id`.
    pub fn update_forecast(
        &self,
        id: ForecastId,
        forecast: &WeatherForecast,
    ) -> RepoResult<Option<WeatherForecast>> {
        self.repo.update_forecast(id, forecast)
    }

    /// Hard-deletes a forecast and returns the removed row.
    pub fn delete_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        self.repo.delete_forecast(id)
    }
}
