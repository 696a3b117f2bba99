//! Forecast store: SQLite bootstrap and schema migrations.
//!
//! # Responsibility
//! - Open connections to the `WeatherForecasts` store, file or in-memory.
//! - Bring every opened connection to the latest schema before use.
//!
//! # Invariants
//! - Connections are cheap and short-lived: the API opens one per request
//!   and drops it afterwards, so opening an already-current store must not
//!   write anything.
//! - The first migration creates `WeatherForecasts` and seeds ids 1..=5;
//!   later opens never reseed.
//! - A store written by a newer binary is refused, not downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure to open, configure or migrate the forecast store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "forecast store error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "forecast store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn unsupported_version_names_both_versions_and_has_no_source() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 1,
        };

        let message = err.to_string();
        assert!(message.contains("version 7"));
        assert!(message.contains("supported 1"));
        assert!(err.source().is_none());
    }

    #[test]
    fn sqlite_errors_keep_their_source() {
        let err = DbError::from(rusqlite::Error::InvalidQuery);

        assert!(err.to_string().starts_with("forecast store error:"));
        assert!(err.source().is_some());
    }
}
