//! Provider and HTTP configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Startup-time configuration failures. A provider whose configuration is
/// incomplete fails here, at construction, never at first use.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid endpoint URL '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Where the access token goes on user-info requests. Both built-in
/// providers use the query parameter; the header variant exists for
/// providers that reject query-string tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenPlacement {
    #[default]
    QueryParam,
    AuthorizationHeader,
}

/// Static per-provider descriptor. Built once at startup and immutable
/// afterwards; shared read-only across concurrent login attempts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub provider_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub auth_endpoint: String,
    pub token_endpoint: String,
    pub userinfo_endpoint: String,
    #[serde(default)]
    pub token_placement: TokenPlacement,
}

pub(crate) fn parse_endpoint(endpoint: &str) -> Result<Url, ConfigError> {
    Url::parse(endpoint).map_err(|source| ConfigError::InvalidEndpoint {
        url: endpoint.to_string(),
        source,
    })
}

/// Settings for the HTTP client shared by a provider's token exchange and
/// identity fetch. Exceeding the timeout surfaces as a transport failure.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpSettings {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_parse_rejects_garbage() {
        let err = parse_endpoint("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn token_placement_defaults_to_query_param() {
        assert_eq!(TokenPlacement::default(), TokenPlacement::QueryParam);
    }
}
