//! # Bookstore API
//!
//! HTTP server for the bookstore catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bookstore API Routes                            │
//! │                                                                         │
//! │  ┌──────────────────────────┐  ┌──────────────────────────────────────┐ │
//! │  │  Book titles             │  │  Catalog entries                     │ │
//! │  │                          │  │                                      │ │
//! │  │ • POST   /v1/booktitles  │  │ • POST /v1/authors                   │ │
//! │  │ • GET    /v1/booktitles/ │  │ • POST /v1/categories                │ │
//! │  │          {id}            │  │ • POST /v1/publishers                │ │
//! │  │ • DELETE /v1/booktitles/ │  │                                      │ │
//! │  │          {id}            │  │                                      │ │
//! │  └──────────────────────────┘  └──────────────────────────────────────┘ │
//! │                                                                         │
//! │  ┌──────────────────────────┐                                          │
//! │  │  Ops                     │   One Session (SQLite transaction) per   │
//! │  │ • GET /ping              │   request, committed on success and      │
//! │  │ • GET /health            │   rolled back on any error.              │
//! │  └──────────────────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (a `.env` file is honoured):
//! - `PORT` - HTTP port (default: 8080)
//! - `ENVIRONMENT` - `dev` enables debug logging (default: dev)
//! - `DATABASE_PATH` - SQLite file (default: ./bookstore.db)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `REQUEST_TIMEOUT_SECS` - Per-request deadline (default: 30)

pub mod config;
pub mod error;
pub mod handlers;
pub mod state;

use axum::routing::{get, post};
use axum::Router;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(handlers::health::ping))
        .route("/health", get(handlers::health::health))
        .route("/v1/booktitles", post(handlers::book_title::create))
        .route(
            "/v1/booktitles/{id}",
            get(handlers::book_title::find).delete(handlers::book_title::delete),
        )
        .route("/v1/authors", post(handlers::catalog::create_author))
        .route("/v1/categories", post(handlers::catalog::create_category))
        .route("/v1/publishers", post(handlers::catalog::create_publisher))
        .with_state(state)
}
