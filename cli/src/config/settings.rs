//! Application configuration settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::paths::{self, TOKEN_FILE_NAME};
use crate::error::Result;

/// Read-only access to the user's courses.
pub const SCOPE_COURSES_READONLY: &str =
    "https://www.googleapis.com/auth/classroom.courses.readonly";
/// Read-only access to coursework as a teacher viewing students' work.
pub const SCOPE_COURSEWORK_STUDENTS_READONLY: &str =
    "https://www.googleapis.com/auth/classroom.coursework.students.readonly";
/// Read-only access to the user's own coursework.
pub const SCOPE_COURSEWORK_ME_READONLY: &str =
    "https://www.googleapis.com/auth/classroom.coursework.me.readonly";

/// Main configuration for classroom-quickstart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickstartConfig {
    /// Authorization settings.
    pub auth: AuthConfig,
    /// Classroom API settings.
    pub api: ApiConfig,
}

/// Authorization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Path to the OAuth client descriptor downloaded from the cloud console.
    pub client_secret_path: PathBuf,
    /// Redirect URL registered for the client. Falls back to the descriptor.
    pub redirect_url: Option<String>,
    /// Authorization endpoint.
    #[serde(with = "url_serde")]
    pub auth_url: Url,
    /// Token endpoint.
    #[serde(with = "url_serde")]
    pub token_url: Url,
    /// Scopes requested during authorization.
    ///
    /// Delete the cached token after changing these.
    pub scopes: Vec<String>,
    /// Where the authorization token is cached.
    pub token_path: Option<PathBuf>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            client_secret_path: PathBuf::from("client_secret.json"),
            redirect_url: None,
            auth_url: Url::parse("https://accounts.google.com/o/oauth2/v2/auth")
                .expect("valid default URL"),
            token_url: Url::parse("https://oauth2.googleapis.com/token")
                .expect("valid default URL"),
            scopes: vec![
                SCOPE_COURSES_READONLY.to_string(),
                SCOPE_COURSEWORK_STUDENTS_READONLY.to_string(),
                SCOPE_COURSEWORK_ME_READONLY.to_string(),
            ],
            token_path: None,
        }
    }
}

impl AuthConfig {
    /// Resolve the token cache path, defaulting to `~/.credentials`.
    pub fn token_path(&self) -> Result<PathBuf> {
        match &self.token_path {
            Some(path) => Ok(path.clone()),
            None => paths::token_file(),
        }
    }
}

/// Classroom API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Classroom API base URL.
    #[serde(with = "url_serde")]
    pub base_url: Url,
    /// Number of courses requested in the single course page.
    pub course_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse("https://classroom.googleapis.com").expect("valid default URL"),
            course_page_size: 10,
        }
    }
}

/// Custom serde module for URL serialization.
mod url_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use url::Url;

    pub fn serialize<S>(url: &Url, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(url.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Url, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Url::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Environment variables that can override configuration.
pub mod env {
    pub const API_URL: &str = "CLASSROOM_API_URL";
    pub const TOKEN_DIR: &str = "CLASSROOM_TOKEN_DIR";
    pub const CLIENT_SECRET: &str = "CLASSROOM_CLIENT_SECRET";
    pub const LOG_LEVEL: &str = "CLASSROOM_LOG";
}

impl QuickstartConfig {
    /// Apply environment variable overrides to the configuration.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(env::API_URL) {
            match Url::parse(&url) {
                Ok(parsed) => self.api.base_url = parsed,
                Err(e) => tracing::warn!("Ignoring {}: {e}", env::API_URL),
            }
        }

        if let Ok(dir) = std::env::var(env::TOKEN_DIR) {
            self.auth.token_path = Some(PathBuf::from(dir).join(TOKEN_FILE_NAME));
        }

        if let Ok(path) = std::env::var(env::CLIENT_SECRET) {
            self.auth.client_secret_path = PathBuf::from(path);
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quickstart() {
        let config = QuickstartConfig::default();
        assert_eq!(config.api.course_page_size, 10);
        assert_eq!(config.api.base_url.as_str(), "https://classroom.googleapis.com/");
        assert_eq!(config.auth.client_secret_path, PathBuf::from("client_secret.json"));
        assert_eq!(config.auth.scopes.len(), 3);
        assert!(config
            .auth
            .scopes
            .iter()
            .all(|s| s.starts_with("https://www.googleapis.com/auth/classroom.")));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: QuickstartConfig = toml::from_str(
            r#"
            [api]
            course_page_size = 25

            [auth]
            token_path = "/tmp/token.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.course_page_size, 25);
        assert_eq!(config.api.base_url.as_str(), "https://classroom.googleapis.com/");
        assert_eq!(
            config.auth.token_path().unwrap(),
            PathBuf::from("/tmp/token.json")
        );
        assert_eq!(config.auth.scopes.len(), 3);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result: std::result::Result<QuickstartConfig, _> = toml::from_str(
            r#"
            [api]
            base_url = "not a url"
            "#,
        );
        assert!(result.is_err());
    }
}
