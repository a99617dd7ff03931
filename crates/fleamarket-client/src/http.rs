//! # HTTP Transport
//!
//! The production [`RemoteStore`] implementation over the marketplace REST
//! API.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Marketplace REST API                              │
//! │                                                                         │
//! │  POST   auth/login/          form: username, password  → { key }       │
//! │  POST   auth/registration/   form: username, email,                    │
//! │                                    password1, password2                │
//! │  GET    item/                → JSON array of item records              │
//! │  POST   item/add/            form: item fields → created record        │
//! │  PUT    item/edit/{id}       form: item fields                         │
//! │  DELETE item/edit/{id}                                                 │
//! │                                                                         │
//! │  All item calls carry `Authorization: Token <key>`.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Mapping
//! - transport failure (no response) → `Connection`
//! - non-success login status → `InvalidCredentials`
//! - other non-success statuses → `Rejected` with the decoded field-error
//!   map when the body carries one
//! - un-decodable success body → `Contract`

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Response;
use tracing::{debug, info, warn};
use url::Url;

use fleamarket_core::RemoteId;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult, FieldErrors};
use crate::records::{ItemFields, ItemRecord, LoginResponse};
use crate::store::{AuthToken, Credentials, Registration, RemoteStore};

/// HTTP-backed remote store.
///
/// Cheap to clone: `reqwest::Client` is an `Arc` around its connection pool.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStore {
    /// Builds the transport from a configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ClientError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpStore {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Joins an endpoint path onto the API root.
    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::Config(format!("invalid endpoint '{path}': {err}")))
    }

    /// Header value for an authenticated call.
    fn auth_header(auth: &AuthToken) -> String {
        format!("Token {}", auth.as_str())
    }

    /// Turns a non-success response into the matching error, decoding the
    /// field-error map when the body carries one.
    async fn rejection(response: Response) -> ClientError {
        let status = response.status().as_u16();
        let errors = response.json::<FieldErrors>().await.unwrap_or_default();
        warn!(status, %errors, "request rejected by the server");
        ClientError::Rejected { status, errors }
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn login(&self, credentials: &Credentials) -> ClientResult<AuthToken> {
        let url = self.endpoint("auth/login/")?;
        debug!(%url, username = %credentials.username, "logging in");

        let response = self
            .client
            .post(url)
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "login refused");
            return Err(ClientError::InvalidCredentials);
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|err| ClientError::Contract(format!("login response: {err}")))?;

        info!(username = %credentials.username, "logged in");
        Ok(AuthToken::new(body.key))
    }

    async fn register(&self, registration: &Registration) -> ClientResult<()> {
        let url = self.endpoint("auth/registration/")?;
        debug!(%url, username = %registration.username, "registering account");

        let response = self
            .client
            .post(url)
            .form(&[
                ("username", registration.username.as_str()),
                ("email", registration.email.as_str()),
                ("password1", registration.password.as_str()),
                ("password2", registration.password.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        info!(username = %registration.username, "account registered");
        Ok(())
    }

    async fn list_items(&self, auth: &AuthToken) -> ClientResult<Vec<ItemRecord>> {
        let url = self.endpoint("item/")?;
        debug!(%url, "fetching item list");

        let response = self
            .client
            .get(url)
            .header(AUTHORIZATION, Self::auth_header(auth))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let records: Vec<ItemRecord> = response
            .json()
            .await
            .map_err(|err| ClientError::Contract(format!("item list: {err}")))?;

        debug!(count = records.len(), "item list fetched");
        Ok(records)
    }

    async fn create_item(&self, auth: &AuthToken, fields: &ItemFields) -> ClientResult<ItemRecord> {
        let url = self.endpoint("item/add/")?;
        debug!(%url, name = %fields.name, "creating item");

        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, Self::auth_header(auth))
            .form(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let record: ItemRecord = response
            .json()
            .await
            .map_err(|err| ClientError::Contract(format!("created item: {err}")))?;

        info!(id = record.id, name = %record.name, "item created");
        Ok(record)
    }

    async fn update_item(
        &self,
        auth: &AuthToken,
        id: RemoteId,
        fields: &ItemFields,
    ) -> ClientResult<()> {
        let url = self.endpoint(&format!("item/edit/{id}"))?;
        debug!(%url, id, "updating item");

        let response = self
            .client
            .put(url)
            .header(AUTHORIZATION, Self::auth_header(auth))
            .form(fields)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        info!(id, "item updated");
        Ok(())
    }

    async fn delete_item(&self, auth: &AuthToken, id: RemoteId) -> ClientResult<()> {
        let url = self.endpoint(&format!("item/edit/{id}"))?;
        debug!(%url, id, "deleting item");

        let response = self
            .client
            .delete(url)
            .header(AUTHORIZATION, Self::auth_header(auth))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        info!(id, "item deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
