//! # SQLite Stores
//!
//! Implementations of the core store contracts over a [`Session`].
//!
//! ## Store Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Contract (bookstore-core)    Store (this module)     Table              │
//! │  ───────────────────────────  ──────────────────────  ───────────────── │
//! │  EntityStore<Author>          RecordStore<Author>     authors           │
//! │  EntityStore<Category>        RecordStore<Category>   categories        │
//! │  EntityStore<Publisher>       RecordStore<Publisher>  publishers        │
//! │  EntityStore<BookTitle>       BookTitleStore          book_titles       │
//! │                                                        + both join tbls │
//! │  AssociationStore             LinkStore               book_title_*      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every store holds a clone of the same [`Session`], so all of them see
//! and write through one transaction.

pub mod book_title;
pub mod link;
pub mod record;

use bookstore_core::repository::{BookTitleRepo, ExistRepo};
use bookstore_core::{Author, BookTitle, Category, Publisher};
use sqlx::query_builder::Separated;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Sqlite};

use crate::session::Session;

pub use book_title::BookTitleStore;
pub use link::{Link, LinkStore, BOOK_TITLE_AUTHORS, BOOK_TITLE_CATEGORIES};
pub use record::RecordStore;

/// Book-title repository wired to SQLite stores.
pub type SqliteBookTitleRepo = BookTitleRepo<BookTitleStore, LinkStore, LinkStore>;

// =============================================================================
// Record
// =============================================================================

/// A row type with the standard soft-delete columns.
///
/// `COLUMNS` lists the persisted columns in the order [`Record::bind_row`]
/// pushes values.
pub trait Record: for<'r> FromRow<'r, SqliteRow> + Send + Sync + Unpin + 'static {
    /// Table name.
    const TABLE: &'static str;

    /// Entity name used in errors.
    const ENTITY: &'static str;

    /// Comma-separated column list.
    const COLUMNS: &'static str;

    fn id(&self) -> &str;

    /// Pushes one bound value per entry of `COLUMNS`.
    fn bind_row<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>);
}

macro_rules! catalog_record {
    ($ty:ty, $table:literal) => {
        impl Record for $ty {
            const TABLE: &'static str = $table;
            const ENTITY: &'static str = <$ty as bookstore_core::CatalogEntry>::KIND;
            const COLUMNS: &'static str = "id, name, created_at, updated_at, deleted_at, is_active";

            fn id(&self) -> &str {
                &self.id
            }

            fn bind_row<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
                row.push_bind(self.id.clone())
                    .push_bind(self.name.clone())
                    .push_bind(self.created_at)
                    .push_bind(self.updated_at)
                    .push_bind(self.deleted_at)
                    .push_bind(self.is_active);
            }
        }
    };
}

catalog_record!(Author, "authors");
catalog_record!(Category, "categories");
catalog_record!(Publisher, "publishers");

impl Record for BookTitle {
    const TABLE: &'static str = "book_titles";
    const ENTITY: &'static str = BookTitle::KIND;
    const COLUMNS: &'static str =
        "id, name, description, created_at, updated_at, deleted_at, is_active";

    fn id(&self) -> &str {
        &self.id
    }

    fn bind_row<'args>(&self, row: &mut Separated<'_, 'args, Sqlite, &'static str>) {
        row.push_bind(self.id.clone())
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.created_at)
            .push_bind(self.updated_at)
            .push_bind(self.deleted_at)
            .push_bind(self.is_active);
    }
}

// =============================================================================
// Store Accessors
// =============================================================================

impl Session {
    /// Returns the author store.
    pub fn authors(&self) -> RecordStore<Author> {
        RecordStore::new(self.clone())
    }

    /// Returns the category store.
    pub fn categories(&self) -> RecordStore<Category> {
        RecordStore::new(self.clone())
    }

    /// Returns the publisher store.
    pub fn publishers(&self) -> RecordStore<Publisher> {
        RecordStore::new(self.clone())
    }

    /// Returns the book title store (root rows plus link lists on read).
    pub fn book_titles(&self) -> BookTitleStore {
        BookTitleStore::new(self.clone())
    }

    /// Returns the book-title/author join store.
    pub fn author_links(&self) -> LinkStore {
        LinkStore::new(self.clone(), BOOK_TITLE_AUTHORS)
    }

    /// Returns the book-title/category join store.
    pub fn category_links(&self) -> LinkStore {
        LinkStore::new(self.clone(), BOOK_TITLE_CATEGORIES)
    }

    /// Returns the book-title aggregate repository.
    pub fn book_title_repo(&self) -> SqliteBookTitleRepo {
        BookTitleRepo::new(self.book_titles(), self.author_links(), self.category_links())
    }

    /// Returns the author existence checker.
    pub fn author_checker(&self) -> ExistRepo<RecordStore<Author>> {
        ExistRepo::new(self.authors())
    }

    /// Returns the category existence checker.
    pub fn category_checker(&self) -> ExistRepo<RecordStore<Category>> {
        ExistRepo::new(self.categories())
    }
}
