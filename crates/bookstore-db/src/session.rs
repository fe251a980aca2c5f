//! # Sessions
//!
//! A [`Session`] is one SQLite transaction shared by every store built
//! from it. Handlers open a session per request, hand its stores to the
//! workflow, then commit on success or roll back on any error.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Database::begin(ctx) ► Session (Arc<Mutex<Option<Tx>>>)      │
//! │                          │  clone     │  clone     │ clone   │
//! │                          ▼            ▼            ▼         │
//! │                    RecordStore   BookTitleStore  LinkStore   │
//! │                          │                                   │
//! │            commit(self) / rollback(self) takes the Tx out    │
//! │            and later use by a store clone fails              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;

use bookstore_core::Context;
use sqlx::{Sqlite, SqliteConnection, Transaction};
use tokio::sync::{Mutex, MutexGuard};
use tokio::time::{sleep_until, Instant};
use tracing::debug;

use crate::error::{DbError, DbResult};

type Slot = Option<Transaction<'static, Sqlite>>;

/// One open transaction, shareable between stores.
#[derive(Clone)]
pub struct Session {
    tx: Arc<Mutex<Slot>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub(crate) fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Session {
            tx: Arc::new(Mutex::new(Some(tx))),
        }
    }

    /// Locks the transaction for the duration of one statement.
    pub(crate) async fn lock(&self) -> SessionGuard<'_> {
        SessionGuard(self.tx.lock().await)
    }

    /// Commits every write made through this session's stores.
    pub async fn commit(self) -> DbResult<()> {
        let tx = self.tx.lock().await.take().ok_or_else(DbError::session_closed)?;
        tx.commit().await?;
        debug!("Session committed");
        Ok(())
    }

    /// Discards every write made through this session's stores.
    pub async fn rollback(self) -> DbResult<()> {
        let tx = self.tx.lock().await.take().ok_or_else(DbError::session_closed)?;
        tx.rollback().await?;
        debug!("Session rolled back");
        Ok(())
    }
}

/// Exclusive access to the session's connection.
pub(crate) struct SessionGuard<'a>(MutexGuard<'a, Slot>);

impl SessionGuard<'_> {
    pub(crate) fn conn(&mut self) -> DbResult<&mut SqliteConnection> {
        self.0.as_deref_mut().ok_or_else(DbError::session_closed)
    }
}

/// Runs a query unless the context is cancelled or its deadline passes
/// first. A query that loses the race is dropped and the session is
/// expected to be rolled back by its owner.
pub(crate) async fn guarded<T, F>(ctx: &Context, fut: F) -> DbResult<T>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    if ctx.is_done() {
        return Err(DbError::Cancelled);
    }

    let deadline = async {
        match ctx.deadline() {
            Some(at) => sleep_until(Instant::from_std(at)).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        biased;
        _ = ctx.token().cancelled() => Err(DbError::Cancelled),
        _ = deadline => Err(DbError::Cancelled),
        result = fut => result.map_err(DbError::from),
    }
}
