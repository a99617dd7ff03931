//! # Client Configuration
//!
//! Configuration for the HTTP transport.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FLEA_API_URL=https://market.example.com/api/v1/                    │
//! │     FLEA_HTTP_TIMEOUT_SECS=10                                          │
//! │                                                                         │
//! │  2. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api/v1/, 30 second timeout                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Default API root, the address the development server listens on.
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1/";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding the API root.
pub const ENV_API_URL: &str = "FLEA_API_URL";

/// Environment variable overriding the request timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "FLEA_HTTP_TIMEOUT_SECS";

/// Configuration for [`crate::http::HttpStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root every endpoint path is joined onto. Must end with a slash,
    /// otherwise `Url::join` would drop the last path segment.
    pub base_url: Url,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Builds a configuration from an explicit API root.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        Ok(ClientConfig {
            base_url: Url::parse(&normalized)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Builds a configuration from the environment, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var(ENV_API_URL).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|_| {
                ClientError::Config(format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        debug!(base_url = %config.base_url, timeout_secs = config.timeout.as_secs(), "client configured");
        Ok(config)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: Url::parse(DEFAULT_API_URL).expect("default API URL parses"),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_the_development_server() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/api/v1/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_new_appends_missing_trailing_slash() {
        let config = ClientConfig::new("http://example.com/api/v1").unwrap();
        assert_eq!(config.base_url.as_str(), "http://example.com/api/v1/");

        // Join must keep the full root path.
        let joined = config.base_url.join("item/").unwrap();
        assert_eq!(joined.as_str(), "http://example.com/api/v1/item/");
    }

    #[test]
    fn test_new_rejects_invalid_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ClientError::Config(_))
        ));
    }
}
