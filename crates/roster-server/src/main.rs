//! Roster server binary.
//!
//! Wires the employee store into the HTTP layer and serves it until
//! `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration (defaults, optional file, `ROSTER_*` env vars)
//! 3. Create the process-wide employee store
//! 4. Serve the REST API until a shutdown signal arrives

mod config;
mod error;

use std::sync::Arc;

use roster_api::AppState;
use roster_store::EmployeeStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::RosterConfig;
use crate::error::AppError;

/// Application entry point for the Roster server.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the server
/// fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run().await?;
    Ok(())
}

/// Run the startup sequence and serve until shutdown.
async fn run() -> Result<(), AppError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("roster-server starting");

    // 2. Load configuration.
    let config = RosterConfig::load()?;
    let server_config = config.server_config();
    info!(
        host = %server_config.host,
        port = server_config.port,
        "Configuration loaded"
    );

    // 3. Create the store. One instance per process, shared with every handler.
    let store = Arc::new(EmployeeStore::new());
    let state = Arc::new(AppState::with_store(store));

    // 4. Serve until Ctrl-C.
    roster_api::start_server(&server_config, state, shutdown_signal()).await?;

    info!("roster-server exited cleanly");
    Ok(())
}

/// Resolve when the process receives `Ctrl-C`.
///
/// If the signal handler cannot be installed the server keeps running
/// and must be stopped externally.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
