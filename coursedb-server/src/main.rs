//! coursedb server binary
//!
//! Starts the HTTP API server for the course collection.

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use coursedb_server::{Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let (config, source) = ServerConfig::load(&cli)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    match &source {
        Some(path) => info!(config = %path.display(), "loaded configuration"),
        None => info!("no config file found, using defaults"),
    }

    info!(
        "Starting coursedb server v{} on {}",
        env!("CARGO_PKG_VERSION"),
        config.address()
    );

    coursedb_server::serve(config).await?;

    Ok(())
}
