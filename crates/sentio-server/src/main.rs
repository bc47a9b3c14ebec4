//! Sentio HTTP server.
//!
//! Trains the sentiment model from the configured dataset and serves the
//! evaluation report and per-text predictions.

use clap::Parser;
use sentio_server::config::ServerConfig;
use sentio_server::shutdown::shutdown_signal;
use sentio_server::{build_app_state, build_router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();

    info!(
        listen_addr = %config.listen_addr,
        data_path = %config.data_path.display(),
        test_fraction = config.test_fraction,
        cache_model = config.cache_model,
        "Starting Sentio server"
    );

    let state = build_app_state(&config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "Server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
