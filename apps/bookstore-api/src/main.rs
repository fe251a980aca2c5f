//! # Bookstore API Server
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  .env ─► ApiConfig::load ─► tracing ─► Database::new (migrations)      │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                         axum::serve(router) until SIGINT/SIGTERM        │
//! │                                              │                          │
//! │                shutdown token cancelled ─► in-flight contexts end       │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                         pool closed                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::Context as _;
use bookstore_api::{router, ApiConfig, AppState};
use bookstore_db::{Database, DbConfig};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ApiConfig::load()?;

    // Initialize tracing
    let default_level = if config.is_dev() { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting bookstore API server...");
    info!(
        port = config.port,
        environment = %config.environment,
        database = %config.database_path,
        "Configuration loaded"
    );

    // Open database and run migrations
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("failed to open database")?;

    let shutdown = CancellationToken::new();
    let state = AppState::new(db.clone(), config.clone(), shutdown.clone());

    // Build server address
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    db.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Cancels `shutdown` once SIGINT or SIGTERM arrives, which ends every
/// in-flight request context.
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
    shutdown.cancel();
}
