//! Weather forecast domain model.
//!
//! # Responsibility
//! - Define the single record persisted in the `WeatherForecasts` table.
//! - Fix the external JSON shape (`id`, `weatherDate`, `temperatureC`, `summary`).
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `id == 0` marks a value that has not been persisted yet.
//!
//! # See also
//! - crate::repo::forecast_repo

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-generated primary key of a forecast row.
///
/// 32-bit: ids outside `i32` are rejected at the HTTP boundary as malformed.
pub type ForecastId = i32;

/// Id carried by forecasts that have not been persisted yet.
pub const UNSAVED_FORECAST_ID: ForecastId = 0;

/// A single weather forecast record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherForecast {
    /// Primary key. Request bodies may omit it; create ignores it.
    #[serde(default)]
    pub id: ForecastId,
    /// Timezone-aware forecast timestamp, serialized as ISO-8601.
    pub weather_date: DateTime<Utc>,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl WeatherForecast {
    /// Creates an unsaved forecast; the store assigns `id` on create.
    pub fn new(
        weather_date: DateTime<Utc>,
        temperature_c: i32,
        summary: Option<String>,
    ) -> Self {
        Self::with_id(UNSAVED_FORECAST_ID, weather_date, temperature_c, summary)
    }

    /// Creates a forecast with a caller-provided id.
    pub fn with_id(
        id: ForecastId,
        weather_date: DateTime<Utc>,
        temperature_c: i32,
        summary: Option<String>,
    ) -> Self {
        Self {
            id,
            weather_date,
            temperature_c,
            summary,
        }
    }

    /// Returns whether this value already carries a store-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id != UNSAVED_FORECAST_ID
    }
}
