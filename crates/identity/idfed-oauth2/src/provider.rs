//! The shared [`ProviderAdapter`] implementation.

use crate::client::{IdentityFetcher, TokenExchanger};
use crate::config::{ConfigError, HttpSettings, ProviderConfig, parse_endpoint};
use crate::csrf;
use async_trait::async_trait;
use idfed_core::{AuthError, AuthResult, IdentityPayload, LoginRedirect, ProviderAdapter};
use reqwest::Client;
use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

/// OAuth2 adapter covering every supported provider, parameterized by
/// [`ProviderConfig`]. Provider quirks live in the config (endpoints,
/// scopes, token placement), not at the call site.
#[derive(Clone, Debug)]
pub struct OAuth2Provider {
    config: Arc<ProviderConfig>,
    auth_endpoint: Url,
    exchanger: TokenExchanger,
    fetcher: IdentityFetcher,
}

impl OAuth2Provider {
    /// Build an adapter from a configuration. All endpoint URLs are parsed
    /// here, so construction is the last point where configuration can fail.
    pub fn new(config: ProviderConfig, settings: &HttpSettings) -> Result<Self, ConfigError> {
        let auth_endpoint = parse_endpoint(&config.auth_endpoint)?;
        parse_endpoint(&config.token_endpoint)?;
        parse_endpoint(&config.userinfo_endpoint)?;

        let http = Client::builder().timeout(settings.timeout).build()?;

        let config = Arc::new(config);
        let exchanger = TokenExchanger::new(http.clone(), Arc::clone(&config));
        let fetcher = IdentityFetcher::new(http, Arc::clone(&config));

        Ok(Self {
            config,
            auth_endpoint,
            exchanger,
            fetcher,
        })
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn authorization_url(&self, state: &str) -> String {
        let mut url = self.auth_endpoint.clone();

        let mut params = url.query_pairs_mut();
        params.append_pair("response_type", "code");
        params.append_pair("client_id", &self.config.client_id);
        params.append_pair("redirect_uri", &self.config.redirect_url);
        params.append_pair("state", state);

        if !self.config.scopes.is_empty() {
            params.append_pair("scope", &self.config.scopes.join(" "));
        }

        drop(params);

        url.to_string()
    }
}

#[async_trait]
impl ProviderAdapter for OAuth2Provider {
    fn provider_id(&self) -> &str {
        &self.config.provider_id
    }

    fn begin_login(&self) -> LoginRedirect {
        let state = csrf::generate_state();
        let redirect_url = self.authorization_url(&state);

        debug!(
            "Generated authorization URL for provider {}",
            self.config.provider_id
        );

        LoginRedirect {
            redirect_url,
            csrf_state: state,
        }
    }

    async fn complete_login(
        &self,
        received_state: &str,
        stored_state: &str,
        code: &str,
    ) -> AuthResult<IdentityPayload> {
        if !csrf::validate_state(received_state, stored_state) {
            return Err(AuthError::CsrfMismatch);
        }

        let token = self.exchanger.exchange(code).await?;
        let payload = self.fetcher.fetch_by_token(&token.access_token).await?;

        info!("Completed login via {}", self.config.provider_id);
        Ok(payload)
    }

    async fn fetch_identity_by_token(&self, access_token: &str) -> AuthResult<IdentityPayload> {
        self.fetcher.fetch_by_token(access_token).await
    }
}
