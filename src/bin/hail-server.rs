//! Main entry point for the hail function host.
//!
//! Serves the shipped greeting functions with configuration from environment
//! variables.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hail::{Config, DurableClient, FunctionHost, greeting_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hail function host");

    // Load configuration
    let config = Config::from_env()?;
    info!(?config, "Loaded configuration");

    // Assemble the function table and the engine client
    let app = Arc::new(greeting_app());
    let client = DurableClient::in_process(Arc::clone(&app));

    let host = FunctionHost::start(config.http_addr, app, client).await?;

    info!("Function host started, press Ctrl+C to stop");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received");
    host.shutdown().await;

    Ok(())
}
