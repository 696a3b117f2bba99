//! Server configuration.
//!
//! Every flag can also come from the environment so the database location
//! can be injected by the deployment rather than baked into the command line.

use clap::Parser;
use forecast_core::default_log_level;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Command-line and environment configuration for `forecast_server`.
#[derive(Debug, Clone, Parser)]
#[command(name = "forecast_server", version)]
#[command(about = "HTTP CRUD service for weather forecasts")]
pub struct ServerConfig {
    /// SQLite database file; created and seeded on first start.
    #[arg(long, env = "FORECAST_DB_PATH")]
    pub db: PathBuf,

    /// Address the HTTP listener binds to.
    #[arg(long, env = "FORECAST_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// trace|debug|info|warn|error; defaults by build mode.
    #[arg(long, env = "FORECAST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr when unset.
    #[arg(long, env = "FORECAST_LOG_DIR")]
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Returns the configured log level or the build-mode default.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;
    use clap::Parser;

    #[test]
    fn parses_required_db_and_defaults() {
        let config = ServerConfig::try_parse_from(["forecast_server", "--db", "/tmp/f.db"]).unwrap();

        assert_eq!(config.db.to_str(), Some("/tmp/f.db"));
        assert_eq!(config.bind.to_string(), "127.0.0.1:5000");
        assert_eq!(config.log_level(), forecast_core::default_log_level());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "forecast_server",
            "--db",
            "/tmp/f.db",
            "--bind",
            "0.0.0.0:8080",
            "--log-level",
            "warn",
            "--log-dir",
            "/var/log/forecast",
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.log_level(), "warn");
        assert_eq!(config.log_dir.as_deref(), Some("/var/log/forecast"));
    }

    #[test]
    fn rejects_unparseable_bind_address() {
        let result =
            ServerConfig::try_parse_from(["forecast_server", "--db", "/tmp/f.db", "--bind", "nope"]);
        assert!(result.is_err());
    }
}
