//! # Validation Module
//!
//! Input shape validation for catalog requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler                                                 │
//! │  └── JSON decode into a typed request (serde)                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow step 1 (THIS MODULE)                                │
//! │  └── Shape rules: required name, non-empty id lists                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reference-existence repositories                             │
//! │  └── Every author / category id resolves to an active row              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: Database (SQLite)                                            │
//! │  ├── PRIMARY KEY constraints (duplicate ids)                           │
//! │  └── Foreign key constraints on join tables                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bookstore_core::validation::{validate_name, validate_id_list};
//!
//! validate_name("Clean Code").unwrap();
//! validate_id_list("authorIds", &["a1".to_string()]).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{CreateBookTitleRequest, CreateCatalogEntryRequest};
use crate::{MAX_DESCRIPTION_LENGTH, MAX_ID_LENGTH, MAX_NAME_LENGTH, MAX_REFERENCES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use bookstore_core::validation::validate_name;
///
/// assert!(validate_name("Clean Code").is_ok());
/// assert!(validate_name("").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

/// Validates a book title description. Empty is allowed.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a single identifier (path parameter or list element).
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if id.len() > MAX_ID_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_ID_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a list of referenced identifiers.
///
/// ## Rules
/// - At least one entry
/// - At most [`MAX_REFERENCES`] entries
/// - No blank entries
pub fn validate_id_list(field: &str, ids: &[String]) -> ValidationResult<()> {
    if ids.is_empty() {
        return Err(ValidationError::TooFew {
            field: field.to_string(),
            min: 1,
        });
    }

    if ids.len() > MAX_REFERENCES {
        return Err(ValidationError::TooMany {
            field: field.to_string(),
            max: MAX_REFERENCES,
        });
    }

    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::InvalidFormat {
                field: field.to_string(),
                reason: "must not contain blank ids".to_string(),
            });
        }
        if id.len() > MAX_ID_LENGTH {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: MAX_ID_LENGTH,
            });
        }
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates the shape of a create-book-title request.
///
/// Checks run in field order: name, description, authors, categories.
pub fn validate_create_book_title(req: &CreateBookTitleRequest) -> ValidationResult<()> {
    validate_name(&req.name)?;
    validate_description(&req.description)?;
    validate_id_list("authorIds", &req.author_ids)?;
    validate_id_list("categoryIds", &req.category_ids)?;
    Ok(())
}

/// Validates the shape of a create-catalog-entry request.
pub fn validate_create_catalog_entry(req: &CreateCatalogEntryRequest) -> ValidationResult<()> {
    validate_name(&req.name)
}

// =============================================================================
// Unit Tests
// =============================================================================
