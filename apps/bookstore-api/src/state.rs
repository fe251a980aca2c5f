//! Shared application state.

use std::sync::Arc;

use bookstore_core::Context;
use bookstore_db::Database;
use tokio_util::sync::CancellationToken;

use crate::config::ApiConfig;

/// State handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<ApiConfig>,

    /// Cancelled when the server starts shutting down.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig, shutdown: CancellationToken) -> Self {
        AppState {
            db,
            config: Arc::new(config),
            shutdown,
        }
    }

    /// A context that ends at shutdown or after the configured timeout,
    /// whichever comes first.
    pub fn request_context(&self) -> Context {
        Context::with_token(self.shutdown.child_token()).with_timeout(self.config.request_timeout)
    }
}
