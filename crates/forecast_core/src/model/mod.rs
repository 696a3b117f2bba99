//! Domain model for weather forecasts.
//!
//! # Responsibility
//! - Define the data records shared by repository, service and API layers.
//!
//! # Invariants
//! - Every persisted record is identified by a store-assigned `ForecastId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod weather_forecast;
