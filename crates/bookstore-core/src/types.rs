//! # Domain Types
//!
//! Catalog entities and the request/response shapes of the workflows.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │   BookTitle     │───────►│     Author      │  book_title_authors     │
//! │  │  ─────────────  │        └─────────────────┘                         │
//! │  │  id (short id)  │        ┌─────────────────┐                         │
//! │  │  name           │───────►│    Category     │  book_title_categories  │
//! │  │  description    │        └─────────────────┘                         │
//! │  │  author_ids     │                                                    │
//! │  │  category_ids   │        ┌─────────────────┐                         │
//! │  └─────────────────┘        │   Publisher     │                         │
//! │   (aggregate root)          └─────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Soft Delete
//! Every entity carries `deleted_at` + `is_active`. Stores only ever read
//! active rows; deletion clears `is_active` and stamps `deleted_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Catalog Entries
// =============================================================================

/// Simple named catalog entities owned by their own modules.
///
/// Authors, categories and publishers share the same shape; this trait lets
/// one generic workflow create any of them.
pub trait CatalogEntry: Send + Sync {
    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    /// Builds a fresh, active entry.
    fn new_entry(id: String, name: String, now: DateTime<Utc>) -> Self;

    /// Returns the entry's identifier.
    fn id(&self) -> &str;
}

/// Declares a named catalog entity with the standard soft-delete columns.
macro_rules! catalog_entry {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
        #[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
        #[ts(export)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            /// Unique identifier (short id).
            pub id: String,

            /// Display name.
            pub name: String,

            #[ts(as = "String")]
            pub created_at: DateTime<Utc>,

            #[ts(as = "String")]
            pub updated_at: DateTime<Utc>,

            /// Set when the entry is soft-deleted.
            #[ts(as = "Option<String>")]
            pub deleted_at: Option<DateTime<Utc>>,

            /// Whether the entry is active (soft delete).
            pub is_active: bool,
        }

        impl CatalogEntry for $name {
            const KIND: &'static str = $kind;

            fn new_entry(id: String, name: String, now: DateTime<Utc>) -> Self {
                $name {
                    id,
                    name,
                    created_at: now,
                    updated_at: now,
                    deleted_at: None,
                    is_active: true,
                }
            }

            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

catalog_entry!(
    /// A book author. Referenced by book titles.
    Author,
    "author"
);

catalog_entry!(
    /// A book category (genre, subject). Referenced by book titles.
    Category,
    "category"
);

catalog_entry!(
    /// A publishing house. Referenced by physical book copies.
    Publisher,
    "publisher"
);

// =============================================================================
// Book Title
// =============================================================================

/// A book title: the aggregate root of the catalog.
///
/// Author and category references live in join tables; stores fill
/// `author_ids` / `category_ids` in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BookTitle {
    pub id: String,
    pub name: String,
    pub description: String,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub author_ids: Vec<String>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub category_ids: Vec<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl BookTitle {
    /// Entity name used in error messages.
    pub const KIND: &'static str = "book title";
}

// =============================================================================
// Requests & Responses
// =============================================================================

/// Input of the create-book-title workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookTitleRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author_ids: Vec<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

/// Input of the create-catalog-entry workflow (author, category, publisher).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogEntryRequest {
    pub name: String,
}

/// Identifier of a newly created entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CreatedId {
    pub id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
