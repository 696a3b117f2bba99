//! Weather forecast repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five CRUD operations over the `WeatherForecasts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - A missing row is reported as `Ok(None)`, never as an error.
//! - Write paths return only after SQLite has committed the statement.
//! - Read paths reject corrupt persisted state instead of masking it.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::weather_forecast::{ForecastId, WeatherForecast};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const FORECASTS_TABLE: &str = "WeatherForecasts";
const REQUIRED_COLUMNS: &[&str] = &["Id", "WeatherDate", "TemperatureC", "Summary"];

const FORECAST_SELECT_SQL: &str = "SELECT
    Id,
    WeatherDate,
    TemperatureC,
    Summary
FROM WeatherForecasts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for forecast persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted forecast data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for weather forecast CRUD operations.
pub trait ForecastRepository {
    fn list_forecasts(&self) -> RepoResult<Vec<WeatherForecast>>;
    fn get_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>>;
    fn create_forecast(&self, forecast: &WeatherForecast) -> RepoResult<WeatherForecast>;
    fn update_forecast(
        &self,
        id: ForecastId,
        forecast: &WeatherForecast,
    ) -> RepoResult<Option<WeatherForecast>>;
    fn delete_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>>;
}

/// SQLite-backed forecast repository borrowing one connection.
pub struct SqliteForecastRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteForecastRepository<'conn> {
    /// Wraps a connection after checking that it carries the current schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema was
    ///   tampered with after migration.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ForecastRepository for SqliteForecastRepository<'_> {
    fn list_forecasts(&self) -> RepoResult<Vec<WeatherForecast>> {
        let mut stmt = self.conn.prepare(&format!("{FORECAST_SELECT_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut forecasts = Vec::new();

        while let Some(row) = rows.next()? {
            forecasts.push(parse_forecast_row(row)?);
        }

        Ok(forecasts)
    }

    fn get_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{FORECAST_SELECT_SQL} WHERE Id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_forecast_row(row)?));
        }

        Ok(None)
    }

    fn create_forecast(&self, forecast: &WeatherForecast) -> RepoResult<WeatherForecast> {
        self.conn.execute(
            "INSERT INTO WeatherForecasts (
                WeatherDate,
                TemperatureC,
                Summary
            ) VALUES (?1, ?2, ?3);",
            params![
                timestamp_to_db(&forecast.weather_date),
                forecast.temperature_c,
                forecast.summary.as_deref(),
            ],
        )?;

        let rowid = self.conn.last_insert_rowid();
        let id = ForecastId::try_from(rowid).map_err(|_| {
            RepoError::InvalidData(format!(
                "assigned id `{rowid}` exceeds the forecast id range"
            ))
        })?;

        let mut created = forecast.clone();
        created.id = id;
        Ok(created)
    }

    // Echoes the caller's value rather than re-reading the stored row.
    fn update_forecast(
        &self,
        id: ForecastId,
        forecast: &WeatherForecast,
    ) -> RepoResult<Option<WeatherForecast>> {
        let changed = self.conn.execute(
            "UPDATE WeatherForecasts
             SET
                WeatherDate = ?1,
                TemperatureC = ?2,
                Summary = ?3
             WHERE Id = ?4;",
            params![
                timestamp_to_db(&forecast.weather_date),
                forecast.temperature_c,
                forecast.summary.as_deref(),
                id,
            ],
        )?;

        if changed == 0 {
            return Ok(None);
        }

        Ok(Some(forecast.clone()))
    }

    fn delete_forecast(&self, id: ForecastId) -> RepoResult<Option<WeatherForecast>> {
        let mut stmt = self.conn.prepare(
            "DELETE FROM WeatherForecasts
             WHERE Id = ?1
             RETURNING Id, WeatherDate, TemperatureC, Summary;",
        )?;

        let mut rows = stmt.query([id])?;
        let deleted = match rows.next()? {
            Some(row) => Some(parse_forecast_row(row)?),
            None => None,
        };

        Ok(deleted)
    }
}

fn ensure_schema(conn: &Connection) -> RepoResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([FORECASTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(RepoError::MissingRequiredTable(FORECASTS_TABLE));
    }

    for &column in REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name.eq_ignore_ascii_case(column)) {
            return Err(RepoError::MissingRequiredColumn {
                table: FORECASTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn parse_forecast_row(row: &Row<'_>) -> RepoResult<WeatherForecast> {
    let date_text: String = row.get("WeatherDate")?;
    let weather_date = parse_timestamp(&date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{date_text}` in WeatherForecasts.WeatherDate"
        ))
    })?;

    let temperature = row.get::<_, i64>("TemperatureC")?;
    let temperature_c = i32::try_from(temperature).map_err(|_| {
        RepoError::InvalidData(format!(
            "temperature `{temperature}` out of range in WeatherForecasts.TemperatureC"
        ))
    })?;

    Ok(WeatherForecast {
        id: row.get("Id")?,
        weather_date,
        temperature_c,
        summary: row.get("Summary")?,
    })
}

fn timestamp_to_db(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, timestamp_to_db};
    use chrono::{TimeZone, Timelike, Utc};

    #[test]
    fn timestamp_text_keeps_sub_second_precision() {
        let value = Utc
            .with_ymd_and_hms(2024, 9, 4, 4, 38, 40)
            .unwrap()
            .with_nanosecond(973_079_000)
            .unwrap();

        let text = timestamp_to_db(&value);
        assert_eq!(text, "2024-09-04T04:38:40.973079Z");
        assert_eq!(parse_timestamp(&text), Some(value));

        let whole_seconds = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(timestamp_to_db(&whole_seconds), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
