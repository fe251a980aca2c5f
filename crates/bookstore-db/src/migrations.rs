//! # Migrations
//!
//! The SQL files under `migrations/sqlite/` are embedded at compile time and
//! applied by [`Database::new`](crate::Database::new). Add a new numbered
//! file for every schema change; applied files must never be edited since
//! sqlx checks their checksums.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every pending migration in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;
    info!(total = MIGRATOR.migrations.len(), "Migrations applied");
    Ok(())
}
