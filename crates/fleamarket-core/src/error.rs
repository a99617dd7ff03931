//! # Error Types
//!
//! Domain-specific error types for fleamarket-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fleamarket-core errors (this file)                                    │
//! │  ├── DomainError      - Listing / reconciliation failures              │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fleamarket-client errors (separate crate)                             │
//! │  └── ClientError      - Remote store / session failures                │
//! │                                                                         │
//! │  Flow: ValidationError → DomainError → ClientError → Shell             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, index, bounds)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by every value-type constructor and by index-bounds checks on the
/// listing collection. Always recoverable: the caller re-prompts or
/// re-renders with the message, never terminates the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (forbidden characters, bad grammar).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Index outside the valid `[0, len)` range of the listing.
    ///
    /// ## When This Occurs
    /// - Reading, removing or replacing at an index past the end
    /// - Any index access on an empty listing
    #[error("index {index} is out of bounds for a listing of {len} items")]
    IndexOutOfBounds { index: usize, len: usize },
}

// =============================================================================
// Domain Error
// =============================================================================

/// Domain logic errors beyond plain input validation.
///
/// These represent broken expectations between the local listing and the
/// remote identifier space. They should be caught and translated to
/// user-friendly messages by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// No reconciliation entry exists for the item's (name, brand) identity.
    ///
    /// ## When This Occurs
    /// - Editing or deleting an item that was never recorded after a fetch
    /// - The ledger was cleared while the listing still holds the item
    ///
    /// This is a hard error, never a silent no-op: a remote mutation cannot
    /// be addressed without the id.
    #[error("item '{name}' ({brand}) has no tracked remote id")]
    NotTracked { name: String, brand: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Convenience type alias for Results with DomainError.
pub type DomainResult<T> = Result<T, DomainError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 30,
        };
        assert_eq!(err.to_string(), "name must be at most 30 characters");

        let err = ValidationError::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(
            err.to_string(),
            "index 4 is out of bounds for a listing of 2 items"
        );
    }

    #[test]
    fn test_validation_converts_to_domain_error() {
        let validation_err = ValidationError::Required {
            field: "brand".to_string(),
        };
        let domain_err: DomainError = validation_err.into();
        assert!(matches!(domain_err, DomainError::Validation(_)));
    }

    #[test]
    fn test_not_tracked_message() {
        let err = DomainError::NotTracked {
            name: "davide".to_string(),
            brand: "nike".to_string(),
        };
        assert_eq!(err.to_string(), "item 'davide' (nike) has no tracked remote id");
    }
}
