//! # Error Types
//!
//! Domain-specific error types for bookstore-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookstore-core errors (this file)                                     │
//! │  ├── CoreError        - What every store, repository and workflow      │
//! │  │                      returns                                        │
//! │  └── ValidationError  - Input shape failures (no I/O performed)        │
//! │                                                                         │
//! │  bookstore-db errors (separate crate)                                  │
//! │  └── DbError          - sqlx failures, converted into CoreError at     │
//! │                         the store boundary                             │
//! │                                                                         │
//! │  bookstore-api errors (in app)                                         │
//! │  └── ApiError         - HTTP status + JSON body                        │
//! │                                                                         │
//! │  Flow: DbError → CoreError → ApiError → HTTP client                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, ID, missing IDs)
//! 3. Storage failures keep the original error as their `source`
//! 4. Cancellation is its own variant, never folded into a storage failure

use thiserror::Error;

/// Boxed storage error kept as the source of [`CoreError::Storage`].
pub type StorageSource = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by stores, repositories and workflows.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Request failed shape validation. Raised before any I/O.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// One or more referenced entities do not exist (or are soft-deleted).
    ///
    /// ## When This Occurs
    /// ```text
    /// create book title { authorIds: ["a1", "a2"] }
    ///      │
    ///      ▼
    /// check authors: "a2" has no active row
    ///      │
    ///      ▼
    /// ReferencedNotFound { entity: "author", missing: ["a2"] }
    /// ```
    #[error("{entity} not found: {}", .missing.join(", "))]
    ReferencedNotFound {
        entity: String,
        missing: Vec<String>,
    },

    /// The targeted entity does not exist or is no longer active.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Identifier collision on insert.
    #[error("Duplicate {entity}: '{key}' already exists")]
    Duplicate { entity: String, key: String },

    /// Connectivity, serialization or transaction failure in the storage engine.
    #[error("Storage failure: {0}")]
    Storage(#[source] StorageSource),

    /// The request context was cancelled or its deadline passed.
    #[error("Operation cancelled")]
    Cancelled,
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a ReferencedNotFound error.
    pub fn referenced_not_found(entity: impl Into<String>, missing: Vec<String>) -> Self {
        CoreError::ReferencedNotFound {
            entity: entity.into(),
            missing,
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(entity: impl Into<String>, key: impl Into<String>) -> Self {
        CoreError::Duplicate {
            entity: entity.into(),
            key: key.into(),
        }
    }

    /// Wraps any storage-level error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        CoreError::Storage(Box::new(err))
    }

    /// Returns true when the failure was caused by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CoreError::Cancelled)
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when client input doesn't meet requirements.
/// Used for early validation before any store is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A list field has fewer entries than required.
    #[error("{field} must contain at least {min} item(s)")]
    TooFew { field: String, min: usize },

    /// A list field has more entries than allowed.
    #[error("{field} must contain at most {max} item(s)")]
    TooMany { field: String, max: usize },

    /// Invalid format (e.g., blank identifier inside a list).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::referenced_not_found("author", vec!["a2".into(), "a3".into()]);
        assert_eq!(err.to_string(), "author not found: a2, a3");

        let err = CoreError::not_found("book title", "abc");
        assert_eq!(err.to_string(), "book title not found: abc");

        let err = CoreError::duplicate("book title", "abc");
        assert_eq!(err.to_string(), "Duplicate book title: 'abc' already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooFew {
            field: "authorIds".to_string(),
            min: 1,
        };
        assert_eq!(err.to_string(), "authorIds must contain at least 1 item(s)");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_storage_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let err = CoreError::storage(io);

        let source = std::error::Error::source(&err).expect("storage error has a source");
        assert_eq!(source.to_string(), "disk gone");
        assert!(!err.is_cancelled());
        assert!(CoreError::Cancelled.is_cancelled());
    }
}
