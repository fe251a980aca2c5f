//! # Business Workflows
//!
//! Orchestration of generator, repositories and stores. Workflows are
//! transaction-agnostic: they receive repositories already bound to the
//! caller's transaction and never commit or roll back.
//!
//! ## Create Book Title
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. validate shape ──✗──► Validation            (no I/O)               │
//! │        │                                                                │
//! │  2. check authors  ──✗──► ReferencedNotFound("author", missing)        │
//! │        │                                                                │
//! │  3. check categories ─✗─► ReferencedNotFound("category", missing)      │
//! │        │                                                                │
//! │  4. generate id                                                         │
//! │        │                                                                │
//! │  5. repo.create    ──✗──► error returned as-is                         │
//! │        │                                                                │
//! │  6. CreatedId { id }                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No step retries. Calling create twice mints two ids and two aggregates.

pub mod book_title;
pub mod catalog;

pub use book_title::{CreateBookTitleBiz, DeleteBookTitleBiz, FindBookTitleBiz};
pub use catalog::CreateCatalogEntryBiz;
