//! # Database Pool
//!
//! Owns the SQLite pool and hands out [`Session`]s.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig ─► Database::new ─► SqlitePool (WAL, foreign_keys) + migrate  │
//! │                                    │                                    │
//! │        begin(ctx)       ──► BEGIN IMMEDIATE  (creates, deletes)         │
//! │        begin_read(ctx)  ──► BEGIN            (lookups)                  │
//! │                                    │                                    │
//! │   acquiring the connection and taking the write lock both race the      │
//! │   request context; a cancelled request never waits out the timeouts     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Write sessions take SQLite's write lock up front. A deferred transaction
//! that reads first and writes later cannot wait for the lock when another
//! writer committed in between; it fails with `SQLITE_BUSY` instead.
//! Immediate transactions queue on `busy_timeout`.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use bookstore_core::Context;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::session::{guarded, Session};

// =============================================================================
// Configuration
// =============================================================================

/// Pool settings.
///
/// ```rust,ignore
/// let config = DbConfig::new("./bookstore.db").max_connections(8);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, created when missing.
    pub database_path: PathBuf,

    /// Default: 5
    pub max_connections: u32,

    /// How long `begin` may wait for a free connection.
    pub acquire_timeout: Duration,

    /// How long a write session may wait for SQLite's write lock.
    pub busy_timeout: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(10),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Private in-memory database for tests. An in-memory SQLite database
    /// lives on one connection, so the pool holds exactly one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Shared database handle. Clones share one pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and applies pending migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // Join tables rely on these
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// The underlying pool, for ad-hoc queries in tests and the seed binary.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Opens a session that holds SQLite's write lock until it ends.
    ///
    /// Returns [`DbError::Cancelled`] when `ctx` ends while the session is
    /// still waiting for a connection or for the lock.
    pub async fn begin(&self, ctx: &Context) -> DbResult<Session> {
        let tx = guarded(ctx, self.pool.begin_with("BEGIN IMMEDIATE")).await?;
        debug!("Write session opened");
        Ok(Session::new(tx))
    }

    /// Opens a deferred session for lookups. Readers do not block writers
    /// under WAL.
    pub async fn begin_read(&self, ctx: &Context) -> DbResult<Session> {
        let tx = guarded(ctx, self.pool.begin()).await?;
        debug!("Read session opened");
        Ok(Session::new(tx))
    }

    /// Closes the pool. Later `begin` calls fail.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Whether the database answers a trivial query.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
