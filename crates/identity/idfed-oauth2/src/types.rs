//! OAuth2 wire types.

use serde::{Deserialize, Serialize};

/// Token endpoint response for the authorization-code grant. Refresh and id
/// tokens are out of scope and any such fields are ignored on parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: Option<u64>,
    pub scope: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_parses_minimal_body() {
        let json = r#"{"access_token":"tok","token_type":"bearer"}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expires_in, None);
    }

    #[test]
    fn token_response_ignores_unknown_fields() {
        let json = r#"{
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 3600,
            "refresh_token": "ignored",
            "id_token": "ignored"
        }"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expires_in, Some(3600));
    }

    #[test]
    fn token_response_requires_access_token() {
        let json = r#"{"token_type":"bearer"}"#;
        assert!(serde_json::from_str::<TokenResponse>(json).is_err());
    }
}
