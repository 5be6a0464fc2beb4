//! Token types for authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token set received from the OAuth token endpoint.
///
/// Opaque to the program beyond serialization: the access token is attached
/// to API requests as-is and expiry is never checked locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The access token.
    pub access_token: String,
    /// The refresh token (if provided).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Token type (usually "Bearer").
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// When the access token expires.
    #[serde(default)]
    pub expiry: Option<DateTime<Utc>>,
    /// Granted scopes.
    #[serde(default)]
    pub scopes: Vec<String>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Token {
    /// Check if the access token has passed its expiry.
    ///
    /// Only used for diagnostics; stale tokens are still sent.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expiry.is_some_and(|exp| exp <= Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn minimal_json_uses_defaults() {
        let token: Token = serde_json::from_str(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert!(token.refresh_token.is_none());
        assert!(token.scopes.is_empty());
        assert!(!token.is_expired());
    }

    #[test]
    fn past_expiry_is_expired() {
        let token = Token {
            access_token: "abc".to_string(),
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expiry: Some(Utc::now() - Duration::minutes(1)),
            scopes: vec![],
        };
        assert!(token.is_expired());
    }
}
