//! # bookstore-db: Database Layer for the Bookstore Inventory
//!
//! SQLite persistence for the catalog, implementing the store contracts of
//! `bookstore-core` with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Inventory Data Flow                       │
//! │                                                                         │
//! │  HTTP handler (POST /v1/booktitles)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookstore-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │    Stores     │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store/*)    │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │    │ RecordStore   │    │ 001_init.sql │  │   │
//! │  │   │ begin() ──────┼───►│ BookTitleStore│    │ ...          │  │   │
//! │  │   │   Session     │    │ LinkStore     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │                     ./bookstore.db (DATABASE_PATH)              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`session`] - Transaction-scoped sessions and cancellation racing
//! - [`store`] - Store implementations (records, book titles, links)
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and domain mapping
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookstore_core::biz::CreateBookTitleBiz;
//! use bookstore_core::{Context, ShortIdGenerator};
//! use bookstore_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("bookstore.db")).await?;
//! let ctx = Context::new();
//! let session = db.begin(&ctx).await?;
//!
//! let biz = CreateBookTitleBiz::new(
//!     ShortIdGenerator,
//!     session.book_title_repo(),
//!     session.author_checker(),
//!     session.category_checker(),
//! );
//! match biz.create(&Context::new(), &request).await {
//!     Ok(created) => { session.commit().await?; Ok(created) }
//!     Err(e) => { session.rollback().await?; Err(e) }
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use session::Session;

// Store re-exports for convenience
pub use store::{BookTitleStore, LinkStore, RecordStore, SqliteBookTitleRepo};
