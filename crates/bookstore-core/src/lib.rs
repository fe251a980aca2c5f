//! # bookstore-core: Domain Logic for the Bookstore Inventory
//!
//! This crate holds the catalog model and the workflows that mutate it.
//! It performs no I/O: storage is reached only through the contracts in
//! [`store`] and [`repository`], which `bookstore-db` implements.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bookstore Inventory Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP Handlers (bookstore-api)                   │   │
//! │  │   decode request ─► begin tx ─► build biz ─► commit/rollback    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ bookstore-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │    biz    │─►│ repository │─►│   store   │  │ generator │  │   │
//! │  │   │ workflows │  │ exist/aggr │  │ contracts │  │ short ids │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TRANSACTIONS                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bookstore-db (Database Layer)                   │   │
//! │  │          SQLite stores bound to a per-request Session           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog entities and request/response DTOs
//! - [`error`] - Domain error taxonomy
//! - [`validation`] - Input shape validation
//! - [`generator`] - Short identifier generation
//! - [`context`] - Cancellation and deadlines for a single request
//! - [`store`] - Entity and association store contracts
//! - [`repository`] - Reference-existence and aggregate repositories
//! - [`biz`] - Create/delete/find workflows
//!
//! ## Example Usage
//!
//! ```rust
//! use bookstore_core::generator::{IdGenerator, ShortIdGenerator};
//! use bookstore_core::validation::validate_name;
//!
//! let id = ShortIdGenerator.new_id();
//! assert_eq!(id.len(), 22);
//!
//! assert!(validate_name("Clean Code").is_ok());
//! assert!(validate_name("   ").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod biz;
pub mod context;
pub mod error;
pub mod generator;
pub mod repository;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use context::Context;
pub use error::{CoreError, CoreResult, ValidationError};
pub use generator::{IdGenerator, ShortIdGenerator};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a display name (book title, author, category, publisher).
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a book title description.
pub const MAX_DESCRIPTION_LENGTH: usize = 4000;

/// Maximum length of a single identifier accepted from a client.
pub const MAX_ID_LENGTH: usize = 64;

/// Maximum number of authors or categories bound to one book title.
///
/// ## Business Reason
/// Keeps the `IN (...)` existence query and the join-row insert well below
/// SQLite's bound parameter limit.
pub const MAX_REFERENCES: usize = 50;
