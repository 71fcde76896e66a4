//! # Frete API server
//!
//! Loads configuration from the environment, installs the tracing
//! subscriber, and serves quotes until Ctrl+C or SIGTERM.

use anyhow::Context;
use frete_api::{server, ApiConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ApiConfig::load().context("Failed to load configuration")?;

    // RUST_LOG wins over FRETE_LOG_FILTER
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!(
        addr = %config.bind_address(),
        origin = %config.engine.origin(),
        "Configuration loaded"
    );

    server::run(config).await.context("Server failed")?;
    Ok(())
}
