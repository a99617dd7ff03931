//! # Remote Store Contract
//!
//! The abstract capability the session layer drives. The HTTP transport in
//! [`crate::http`] is the production implementation; tests substitute an
//! in-memory fake.

use std::fmt;

use async_trait::async_trait;

use fleamarket_core::{Email, Password, RemoteId, Username};

use crate::error::ClientResult;
use crate::records::{ItemFields, ItemRecord};

// =============================================================================
// Auth Types
// =============================================================================

/// The opaque key a successful login yields.
///
/// `Debug` redacts the key so it cannot leak through logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wraps a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        AuthToken(key.into())
    }

    /// Returns the raw key for header construction.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

/// Login credentials, already validated by the field types.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: Username,
    pub password: Password,
}

/// Registration form, already validated by the field types.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: Username,
    pub email: Email,
    pub password: Password,
}

// =============================================================================
// Remote Store Trait
// =============================================================================

/// The remote item store capability.
///
/// ## Contract
/// - `login` exchanges credentials for an [`AuthToken`]; a refused login is
///   `InvalidCredentials`, an unreachable server is `Connection`
/// - `register` either succeeds or carries a per-field error map
/// - every item call takes the token explicitly; the store holds no session
///   state of its own
/// - `create_item` returns the stored record including the id the remote
///   side assigned, which the session records in its ledger
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Exchanges credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthToken>;

    /// Creates a new account.
    async fn register(&self, registration: &Registration) -> ClientResult<()>;

    /// Lists every stored item.
    async fn list_items(&self, auth: &AuthToken) -> ClientResult<Vec<ItemRecord>>;

    /// Stores a new item and returns it with its assigned id.
    async fn create_item(&self, auth: &AuthToken, fields: &ItemFields) -> ClientResult<ItemRecord>;

    /// Overwrites the item stored under `id`.
    async fn update_item(
        &self,
        auth: &AuthToken,
        id: RemoteId,
        fields: &ItemFields,
    ) -> ClientResult<()>;

    /// Deletes the item stored under `id`.
    async fn delete_item(&self, auth: &AuthToken, id: RemoteId) -> ClientResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_debug_is_redacted() {
        let token = AuthToken::new("e2cd07584740609b17b0b0f2ce6787452aa801e0");
        assert_eq!(format!("{token:?}"), "AuthToken(***)");
        assert_eq!(token.as_str(), "e2cd07584740609b17b0b0f2ce6787452aa801e0");
    }
}
