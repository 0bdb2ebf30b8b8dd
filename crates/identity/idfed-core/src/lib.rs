//! Core contract for third-party identity federation.
//!
//! An implementing provider adapter turns provider-specific credentials (an
//! authorization code from the login callback, or an access token the caller
//! already holds) into a raw identity payload tagged with its provider, or a
//! typed failure the caller can branch on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

/// Closed failure taxonomy for a single login attempt.
///
/// Every component returns these; none of them retries or redirects on its
/// own. Startup-time configuration problems are a different category and live
/// with the configuration types, not here.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Caller supplied an empty or unusable credential. No network call was
    /// made.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// The anti-CSRF state echoed by the provider does not match the value
    /// issued at login start. Terminal for this attempt; the caller must
    /// restart the login, never proceed.
    #[error("CSRF state mismatch")]
    CsrfMismatch,

    /// The request never completed: connection error, timeout, or the
    /// response body could not be read.
    #[error("transport failure: {source}")]
    TransportFailure {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The provider answered with a non-success status. The response body is
    /// not carried here.
    #[error("provider rejected request: {status_code} {status_text}")]
    ProviderRejected {
        status_code: u16,
        status_text: String,
    },

    /// The provider answered successfully but the body does not have the
    /// expected shape. Usually indicates provider contract drift.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    pub fn transport(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::TransportFailure {
            source: Box::new(source),
        }
    }
}

/// Raw user-info bytes, tagged with the provider that produced them so the
/// normalization collaborator knows how to parse them. This crate never
/// interprets the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub provider_id: String,
    pub body: Vec<u8>,
}

/// Result of starting a login: where to send the user, and the CSRF state
/// the caller must persist (e.g. as a cookie) until the callback arrives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRedirect {
    pub redirect_url: String,
    pub csrf_state: String,
}

/// Uniform contract over identity providers.
///
/// Callers treat every provider identically through this trait; endpoint
/// shapes, parameter encodings and token placement stay inside the
/// implementing adapter.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider_id(&self) -> &str;

    /// Issue a fresh CSRF state and the authorization redirect URL. Makes no
    /// network call. The caller owns persisting `csrf_state` for the
    /// duration of the attempt.
    fn begin_login(&self) -> LoginRedirect;

    /// Finish the authorization-code flow: validate CSRF state, exchange the
    /// code, fetch the identity. State is checked first; on mismatch no
    /// network call is made. The stored state is spent either way; the
    /// caller must discard it after this returns.
    async fn complete_login(
        &self,
        received_state: &str,
        stored_state: &str,
        code: &str,
    ) -> AuthResult<IdentityPayload>;

    /// Direct path for callers that already hold a provider access token
    /// obtained out of band. Same success and failure semantics as the fetch
    /// step of [`ProviderAdapter::complete_login`].
    async fn fetch_identity_by_token(&self, access_token: &str) -> AuthResult<IdentityPayload>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_error_carries_status_not_body() {
        let err = AuthError::ProviderRejected {
            status_code: 401,
            status_text: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "provider rejected request: 401 Unauthorized");
    }

    #[test]
    fn transport_error_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline elapsed");
        let err = AuthError::transport(cause);
        let source = std::error::Error::source(&err).expect("cause attached");
        assert!(source.to_string().contains("deadline elapsed"));
    }
}
