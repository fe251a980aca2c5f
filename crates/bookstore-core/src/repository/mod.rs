//! # Repository Module
//!
//! Repositories sit between the workflows and the stores.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories Used by Create Book Title               │
//! │                                                                         │
//! │  CreateBookTitleBiz                                                    │
//! │       │                                                                 │
//! │       ├──► ExistRepo<author store>    check_exist(["a1","a2"])         │
//! │       │         └── find_by_ids → diff → ["a2"]                        │
//! │       │                                                                 │
//! │       ├──► ExistRepo<category store>  check_exist(["c1"])              │
//! │       │                                                                 │
//! │       └──► BookTitleRepo              create(&title)                   │
//! │                 ├── titles.insert                                      │
//! │                 ├── author_links.insert_associations                   │
//! │                 └── category_links.insert_associations                 │
//! │                                                                         │
//! │  Workflows depend on the traits below, never on a concrete store,      │
//! │  so they are exercised against fakes in unit tests.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod book_title;
pub mod exist;

use async_trait::async_trait;

use crate::context::Context;
use crate::error::CoreResult;
use crate::types::BookTitle;

pub use book_title::BookTitleRepo;
pub use exist::ExistRepo;

/// Answers "do all of these referenced ids exist?".
#[async_trait]
pub trait ReferenceChecker: Send + Sync {
    /// Returns the requested ids that have no active row, in request order,
    /// without duplicates. An empty result means every id exists.
    async fn check_exist(&self, ctx: &Context, ids: &[String]) -> CoreResult<Vec<String>>;
}

/// Persistence of the book-title aggregate.
#[async_trait]
pub trait BookTitleRepository: Send + Sync {
    /// Inserts the root row, then author links, then category links.
    /// Stops at the first failure; the caller's transaction undoes the rest.
    async fn create(&self, ctx: &Context, title: &BookTitle) -> CoreResult<()>;

    /// Soft-deletes the root. Association rows are left untouched.
    async fn delete(&self, ctx: &Context, id: &str) -> CoreResult<()>;

    /// Loads the root with both association lists.
    async fn find(&self, ctx: &Context, id: &str) -> CoreResult<Option<BookTitle>>;
}
