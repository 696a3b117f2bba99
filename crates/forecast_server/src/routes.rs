//! Endpoint router for the weather forecast API.
//!
//! # Responsibility
//! - Map HTTP verbs and paths onto `ForecastService` calls.
//! - Translate absence into 404 and results into success status codes.
//!
//! # Invariants
//! - Each request opens its own store connection and drops it when done;
//!   no connection is shared between concurrent requests.
//! - Every operation is attempted exactly once.

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use forecast_core::db::open_db;
use forecast_core::{
    core_version, ForecastId, ForecastService, RepoResult, SqliteForecastRepository,
    WeatherForecast,
};
use log::{error, info};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Base path of the forecast route group.
pub const FORECASTS_PATH: &str = "/api/WeatherForecast";

type Service<'conn> = ForecastService<SqliteForecastRepository<'conn>>;

/// Shared router state: where the store lives, not an open connection.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }

    /// Runs one service call on a request-scoped connection.
    async fn with_service<T, F>(&self, operation: &'static str, call: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: for<'conn> FnOnce(&Service<'conn>) -> RepoResult<T> + Send + 'static,
    {
        let started_at = Instant::now();
        let db_path = Arc::clone(&self.db_path);

        let result = tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let conn = open_db(db_path.as_path())?;
            let service = ForecastService::new(SqliteForecastRepository::try_new(&conn)?);
            Ok(call(&service)?)
        })
        .await
        .map_err(ApiError::from)
        .and_then(|inner| inner);

        if let Err(err) = &result {
            error!(
                "event={} module=api status=error duration_ms={} error_code={} error={}",
                operation,
                started_at.elapsed().as_millis(),
                err.code(),
                err
            );
        }
        result
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Builds the router with all forecast routes attached.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(FORECASTS_PATH, get(list_forecasts).post(create_forecast))
        .route(
            &format!("{FORECASTS_PATH}/"),
            get(list_forecasts).post(create_forecast),
        )
        .route(
            &format!("{FORECASTS_PATH}/:id"),
            get(get_forecast).put(update_forecast).delete(delete_forecast),
        )
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: core_version(),
    })
}

async fn list_forecasts(
    State(state): State<AppState>,
) -> Result<Json<Vec<WeatherForecast>>, ApiError> {
    let started_at = Instant::now();
    let forecasts = state
        .with_service("forecast_list", |service| service.list_forecasts())
        .await?;

    info!(
        "event=forecast_list module=api status=ok count={} duration_ms={}",
        forecasts.len(),
        started_at.elapsed().as_millis()
    );
    Ok(Json(forecasts))
}

async fn get_forecast(
    State(state): State<AppState>,
    id: Result<Path<ForecastId>, PathRejection>,
) -> Result<Json<WeatherForecast>, ApiError> {
    let started_at = Instant::now();
    let Path(id) = id?;
    let found = state
        .with_service("forecast_get", move |service| service.get_forecast(id))
        .await?;

    found_or_404("forecast_get", id, started_at, found).map(Json)
}

async fn create_forecast(
    State(state): State<AppState>,
    payload: Result<Json<WeatherForecast>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let started_at = Instant::now();
    let Json(forecast) = payload?;
    let created = state
        .with_service("forecast_create", move |service| {
            service.create_forecast(&forecast)
        })
        .await?;

    info!(
        "event=forecast_create module=api status=ok id={} duration_ms={}",
        created.id,
        started_at.elapsed().as_millis()
    );
    let location = format!("{FORECASTS_PATH}/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn update_forecast(
    State(state): State<AppState>,
    id: Result<Path<ForecastId>, PathRejection>,
    payload: Result<Json<WeatherForecast>, JsonRejection>,
) -> Result<Json<WeatherForecast>, ApiError> {
    let started_at = Instant::now();
    let Path(id) = id?;
    let Json(forecast) = payload?;
    let updated = state
        .with_service("forecast_update", move |service| {
            service.update_forecast(id, &forecast)
        })
        .await?;

    found_or_404("forecast_update", id, started_at, updated).map(Json)
}

async fn delete_forecast(
    State(state): State<AppState>,
    id: Result<Path<ForecastId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let started_at = Instant::now();
    let Path(id) = id?;
    let deleted = state
        .with_service("forecast_delete", move |service| {
            service.delete_forecast(id)
        })
        .await?;

    found_or_404("forecast_delete", id, started_at, deleted)?;
    Ok(StatusCode::NO_CONTENT)
}

fn found_or_404(
    operation: &'static str,
    id: ForecastId,
    started_at: Instant,
    forecast: Option<WeatherForecast>,
) -> Result<WeatherForecast, ApiError> {
    let status = if forecast.is_some() { "ok" } else { "not_found" };
    info!(
        "event={} module=api status={} id={} duration_ms={}",
        operation,
        status,
        id,
        started_at.elapsed().as_millis()
    );
    forecast.ok_or(ApiError::NotFound)
}
