//! `forecast_server` entry point.

use clap::Parser;
use forecast_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    forecast_core::init_logging(config.log_level(), config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)?;

    forecast_server::run(config).await
}
