//! Built-in provider catalog.
//!
//! Each provider module bakes in the endpoint glossary and scope set, and
//! reads its client credentials from the environment. Configuration is read
//! once at startup; a provider with incomplete configuration fails
//! construction rather than failing on first use.

use crate::config::{ConfigError, HttpSettings, ProviderConfig, TokenPlacement};
use crate::provider::OAuth2Provider;
use idfed_core::ProviderAdapter;
use std::collections::HashMap;
use std::sync::Arc;

pub type ProviderMap = HashMap<String, Arc<dyn ProviderAdapter>>;

fn require_env(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnv(name))
}

/// Login with Amazon.
pub mod amazon {
    use super::*;

    pub const AUTH_ENDPOINT: &str = "https://www.amazon.com/ap/oa";
    pub const TOKEN_ENDPOINT: &str = "https://api.amazon.com/auth/o2/token";
    pub const USERINFO_ENDPOINT: &str = "https://api.amazon.com/user/profile";

    pub fn config(
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> ProviderConfig {
        ProviderConfig {
            provider_id: "amazon".to_string(),
            client_id,
            client_secret,
            redirect_url,
            scopes: vec!["profile".to_string()],
            auth_endpoint: AUTH_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
            token_placement: TokenPlacement::QueryParam,
        }
    }

    pub fn from_env() -> Result<ProviderConfig, ConfigError> {
        Ok(config(
            require_env("AMAZON_OAUTH_CLIENT_ID")?,
            require_env("AMAZON_OAUTH_CLIENT_SECRET")?,
            require_env("AMAZON_OAUTH_REDIRECT_URL")?,
        ))
    }
}

/// Microsoft identity platform, multi-tenant ("common") endpoints.
pub mod microsoft {
    use super::*;

    pub const AUTH_ENDPOINT: &str =
        "https://login.microsoftonline.com/common/oauth2/v2.0/authorize";
    pub const TOKEN_ENDPOINT: &str = "https://login.microsoftonline.com/common/oauth2/v2.0/token";
    pub const USERINFO_ENDPOINT: &str = "https://graph.microsoft.com/v1.0/me";

    pub fn config(
        client_id: String,
        client_secret: String,
        redirect_url: String,
    ) -> ProviderConfig {
        ProviderConfig {
            provider_id: "microsoft".to_string(),
            client_id,
            client_secret,
            redirect_url,
            scopes: vec!["User.Read".to_string(), "Contacts.Read".to_string()],
            auth_endpoint: AUTH_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            userinfo_endpoint: USERINFO_ENDPOINT.to_string(),
            token_placement: TokenPlacement::QueryParam,
        }
    }

    pub fn from_env() -> Result<ProviderConfig, ConfigError> {
        Ok(config(
            require_env("MICROSOFT_OAUTH_CLIENT_ID")?,
            require_env("MICROSOFT_OAUTH_CLIENT_SECRET")?,
            require_env("MICROSOFT_OAUTH_REDIRECT_URL")?,
        ))
    }
}

/// Assemble a provider map from explicit configurations. Any invalid
/// endpoint aborts the whole construction.
pub fn registry_from_configs(
    configs: impl IntoIterator<Item = ProviderConfig>,
    settings: &HttpSettings,
) -> Result<ProviderMap, ConfigError> {
    let mut map = ProviderMap::new();

    for config in configs {
        let provider = OAuth2Provider::new(config, settings)?;
        let id = provider.provider_id().to_string();
        map.insert(id, Arc::new(provider) as Arc<dyn ProviderAdapter>);
    }

    Ok(map)
}

/// Build every supported provider from the environment, once, at startup.
/// A missing variable fails the whole startup rather than the first login.
pub fn registry(settings: &HttpSettings) -> Result<ProviderMap, ConfigError> {
    registry_from_configs([amazon::from_env()?, microsoft::from_env()?], settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_configs_assemble_into_a_registry() {
        let configs = [
            amazon::config(
                "client".to_string(),
                "secret".to_string(),
                "http://localhost:8000/auth/amazon/callback".to_string(),
            ),
            microsoft::config(
                "client".to_string(),
                "secret".to_string(),
                "http://localhost:8000/auth/microsoft/callback".to_string(),
            ),
        ];

        let map = registry_from_configs(configs, &HttpSettings::default()).unwrap();

        assert_eq!(map.len(), 2);
        assert!(map.contains_key("amazon"));
        assert!(map.contains_key("microsoft"));
    }

    #[test]
    fn amazon_uses_profile_scope() {
        let config = amazon::config(
            "client".to_string(),
            "secret".to_string(),
            "http://localhost:8000/callback".to_string(),
        );
        assert_eq!(config.scopes, vec!["profile".to_string()]);
        assert_eq!(config.userinfo_endpoint, amazon::USERINFO_ENDPOINT);
    }

    #[test]
    fn microsoft_uses_graph_userinfo() {
        let config = microsoft::config(
            "client".to_string(),
            "secret".to_string(),
            "http://localhost:8000/callback".to_string(),
        );
        assert!(config.userinfo_endpoint.starts_with("https://graph.microsoft.com"));
        assert_eq!(
            config.scopes,
            vec!["User.Read".to_string(), "Contacts.Read".to_string()]
        );
    }
}
