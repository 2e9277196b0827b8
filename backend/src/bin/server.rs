//! Dining API HTTP Server Binary
//!
//! This is the main entry point for the dining REST API server.
//! It loads the first snapshot, starts the periodic refresh and serves requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve locations from a local JSON document
//! DINING_SOURCE_FILE=data/locations.json cargo run --bin dining-server
//!
//! # Serve locations fetched from an upstream URL
//! DINING_SOURCE_URL=https://example.org/locations.json cargo run --bin dining-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5010)
//! - `DINING_CONFIG`: Path to a TOML config file
//! - `REFRESH_INTERVAL_SECS`: Refresh period (default: 600)
//! - `RUST_LOG`: Log filter (default: info)

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dining_api::http::{create_router, AppState};
use dining_api::{source, AppConfig, CacheGuard, RefreshScheduler, SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Dining API server");

    let config = AppConfig::load()?;
    let source = source::build_source(&config.source)?;
    info!(source = %source.describe(), "Snapshot source configured");

    let scheduler = Arc::new(RefreshScheduler::new(
        source,
        SnapshotStore::new(),
        CacheGuard::new(config.refresh.max_record_drop),
    ));

    // Listening waits for the first cycle, whatever its outcome
    let outcome = scheduler.refresh().await;
    info!(?outcome, "Initial refresh finished");

    let shutdown = CancellationToken::new();
    let refresher = scheduler.spawn_periodic(config.refresh_interval(), shutdown.clone());

    let app = create_router(AppState::new(
        Arc::clone(&scheduler),
        config.time_param_policy(),
    ));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Dining API is running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .await?;

    shutdown.cancel();
    refresher.await?;
    info!("Dining API stopped");

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM, cancelling `shutdown`.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("Shutdown signal received");
    shutdown.cancel();
}
