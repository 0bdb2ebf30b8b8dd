//! The two network components of a login attempt: authorization-code
//! exchange and identity fetch.
//!
//! Neither component retries. Authorization codes are single-use and access
//! tokens short-lived, so transient failures are surfaced for the caller to
//! restart the whole attempt.

use crate::config::{ProviderConfig, TokenPlacement};
use crate::types::TokenResponse;
use idfed_core::{AuthError, AuthResult, IdentityPayload};
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, error};

fn rejected(status: StatusCode) -> AuthError {
    AuthError::ProviderRejected {
        status_code: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string(),
    }
}

/// Converts an authorization code into an access token via the provider's
/// token endpoint.
#[derive(Clone, Debug)]
pub struct TokenExchanger {
    http: Client,
    config: Arc<ProviderConfig>,
}

impl TokenExchanger {
    pub fn new(http: Client, config: Arc<ProviderConfig>) -> Self {
        Self { http, config }
    }

    /// Exchange an authorization code for an access token
    /// (authorization-code grant).
    pub async fn exchange(&self, code: &str) -> AuthResult<TokenResponse> {
        if code.is_empty() {
            return Err(AuthError::InvalidInput("authorization code is empty"));
        }

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("redirect_uri", self.config.redirect_url.as_str()),
        ];

        let response = self
            .http
            .post(&self.config.token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(AuthError::transport)?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Token exchange rejected by {}: {}",
                self.config.provider_id, status
            );
            return Err(rejected(status));
        }

        let body = response.bytes().await.map_err(AuthError::transport)?;
        let token: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| AuthError::MalformedResponse(format!("token response: {e}")))?;

        if token.access_token.is_empty() {
            return Err(AuthError::MalformedResponse(
                "token response carries an empty access_token".to_string(),
            ));
        }

        debug!(
            "Exchanged authorization code with {}",
            self.config.provider_id
        );
        Ok(token)
    }
}

/// Fetches the raw identity document for a bearer access token from the
/// provider's user-info endpoint.
#[derive(Clone, Debug)]
pub struct IdentityFetcher {
    http: Client,
    config: Arc<ProviderConfig>,
}

impl IdentityFetcher {
    pub fn new(http: Client, config: Arc<ProviderConfig>) -> Self {
        Self { http, config }
    }

    /// Fetch the identity payload. Returns the response body verbatim; field
    /// layout is provider-specific and interpreting it belongs to the
    /// normalization collaborator.
    pub async fn fetch_by_token(&self, access_token: &str) -> AuthResult<IdentityPayload> {
        if access_token.is_empty() {
            return Err(AuthError::InvalidInput("access token is empty"));
        }

        let request = match self.config.token_placement {
            TokenPlacement::QueryParam => self
                .http
                .get(&self.config.userinfo_endpoint)
                .query(&[("access_token", access_token)]),
            TokenPlacement::AuthorizationHeader => self
                .http
                .get(&self.config.userinfo_endpoint)
                .bearer_auth(access_token),
        };

        let response = request.send().await.map_err(AuthError::transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            // The error body is dropped here and never reaches the caller.
            error!(
                "User info request rejected by {}: {}",
                self.config.provider_id, status
            );
            return Err(rejected(status));
        }

        let body = response.bytes().await.map_err(AuthError::transport)?;
        debug!(
            "Fetched {} byte identity payload from {}",
            body.len(),
            self.config.provider_id
        );

        Ok(IdentityPayload {
            provider_id: self.config.provider_id.clone(),
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_config() -> Arc<ProviderConfig> {
        Arc::new(ProviderConfig {
            provider_id: "offline".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            redirect_url: "http://localhost:3000/callback".to_string(),
            scopes: vec![],
            auth_endpoint: "https://auth.invalid/authorize".to_string(),
            token_endpoint: "https://auth.invalid/token".to_string(),
            userinfo_endpoint: "https://auth.invalid/userinfo".to_string(),
            token_placement: TokenPlacement::QueryParam,
        })
    }

    #[tokio::test]
    async fn empty_code_fails_without_network() {
        let exchanger = TokenExchanger::new(Client::new(), offline_config());
        let err = exchanger.exchange("").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_token_fails_without_network() {
        let fetcher = IdentityFetcher::new(Client::new(), offline_config());
        let err = fetcher.fetch_by_token("").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidInput(_)));
    }
}
