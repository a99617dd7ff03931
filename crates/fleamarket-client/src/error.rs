//! # Client Error Types
//!
//! Error types for remote store and session operations.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Client Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Connectivity   │  │    Rejection    │  │       Contract          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Connection     │  │  Rejected       │  │  Contract               │ │
//! │  │  (no response)  │  │  InvalidCreds   │  │  (malformed record)     │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Session     │  │        Domain           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Config         │  │  Duplicate      │  │  Domain (NotTracked,    │ │
//! │  │                 │  │                 │  │  Validation)            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use fleamarket_core::{DomainError, ValidationError};

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

// =============================================================================
// Field-Level Rejection Map
// =============================================================================

/// Per-field error messages returned by the remote store on a client-error
/// status, e.g. `{"username": ["already taken"], "password1": ["too common"]}`.
///
/// Known keys: `username`, `email`, `password1`, `non_field_errors`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// True when the map carries no messages at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(field, message)` pairs in field order.
    pub fn messages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().flat_map(|(field, messages)| {
            messages.iter().map(move |message| (field.as_str(), message.as_str()))
        })
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.messages() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// Client Error
// =============================================================================

/// Client error type covering remote store and session failures.
///
/// ## Design Principles
/// - Each variant includes enough context for the shell's message
/// - Errors are categorized for different handling strategies: recoverable
///   errors re-prompt, connectivity errors abort to the sign-in screen
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Connectivity
    // =========================================================================
    /// The remote call failed outright (no response).
    ///
    /// The current in-memory listing is left untouched; the shell reports
    /// "cannot reach server" and aborts the session-level operation.
    #[error("cannot reach the server: {0}")]
    Connection(String),

    // =========================================================================
    // Remote Rejection
    // =========================================================================
    /// Login refused by the remote store (non-success status).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The remote store answered with a client-error status and field-level
    /// detail. Local state was not mutated.
    #[error("the server rejected the request ({status}): {errors}")]
    Rejected { status: u16, errors: FieldErrors },

    // =========================================================================
    // Contract
    // =========================================================================
    /// A record in a remote response does not satisfy the wire contract
    /// (missing field, invalid field value, wrong shape).
    #[error("malformed record from the server: {0}")]
    Contract(String),

    // =========================================================================
    // Configuration
    // =========================================================================
    /// Invalid client configuration (bad base URL, bad timeout).
    #[error("invalid configuration: {0}")]
    Config(String),

    // =========================================================================
    // Session
    // =========================================================================
    /// An item with the same (name, brand) identity is already tracked.
    ///
    /// The listing collection itself allows structural duplicates, but the
    /// reconciliation ledger keys on (name, brand); a second entry would
    /// make later edits and deletes ambiguous.
    #[error("item '{name}' ({brand}) is already in the listing")]
    Duplicate { name: String, brand: String },

    // =========================================================================
    // Domain
    // =========================================================================
    /// Domain error (reconciliation miss, validation failure).
    #[error(transparent)]
    Domain(#[from] DomainError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Domain(DomainError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Connection(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::Config(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for shell handling)
// =============================================================================

impl ClientError {
    /// Returns true if the shell should re-prompt within the current screen.
    ///
    /// ## Recoverable Errors
    /// - Validation failures and bounds misses (bad input)
    /// - Duplicates and remote field-level rejections (bad request)
    /// - Refused credentials (bad login)
    ///
    /// ## Non-Recoverable Errors
    /// - Connectivity failures (abort to the sign-in screen)
    /// - Contract and configuration errors
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ClientError::Domain(_)
                | ClientError::Duplicate { .. }
                | ClientError::Rejected { .. }
                | ClientError::InvalidCredentials
        )
    }

    /// Returns true if the remote store could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, ClientError::Connection(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
