//! Client secret loading.
//!
//! Reads the OAuth client descriptor downloaded from the Google Cloud console.
//! Both the `web` and `installed` flavours are accepted; `web` wins when a file
//! somehow carries both.

use std::path::Path;

use serde::Deserialize;

use crate::error::{QuickstartError, Result};

/// Redirect URL used when neither configuration nor descriptor names one.
pub const DEFAULT_REDIRECT_URL: &str = "http://google.com";

/// Identity of the OAuth client, sourced from the client secret file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

/// On-disk layout of `client_secret.json`.
#[derive(Debug, Deserialize)]
struct ClientSecretFile {
    web: Option<ClientSecret>,
    installed: Option<ClientSecret>,
}

#[derive(Debug, Deserialize)]
struct ClientSecret {
    client_id: String,
    client_secret: String,
    #[serde(default)]
    redirect_uris: Vec<String>,
}

/// Load client credentials from a client secret file.
///
/// `redirect_override` takes precedence over the descriptor's first
/// `redirect_uris` entry.
///
/// # Errors
///
/// Returns [`QuickstartError::CredentialsRead`] if the file cannot be read,
/// [`QuickstartError::Serialization`] if it is not valid JSON and
/// [`QuickstartError::InvalidCredentials`] if it names no client.
pub fn load_client_credentials(
    path: &Path,
    redirect_override: Option<&str>,
) -> Result<ClientCredentials> {
    let contents =
        std::fs::read_to_string(path).map_err(|source| QuickstartError::CredentialsRead {
            path: path.display().to_string(),
            source,
        })?;

    parse_client_credentials(&contents, redirect_override)
}

fn parse_client_credentials(
    contents: &str,
    redirect_override: Option<&str>,
) -> Result<ClientCredentials> {
    let file: ClientSecretFile = serde_json::from_str(contents)?;

    let secret = file.web.or(file.installed).ok_or_else(|| {
        QuickstartError::InvalidCredentials("expected a \"web\" or \"installed\" client".to_string())
    })?;

    if secret.client_id.is_empty() {
        return Err(QuickstartError::InvalidCredentials(
            "client_id is empty".to_string(),
        ));
    }

    let redirect_url = redirect_override
        .map(String::from)
        .or_else(|| secret.redirect_uris.into_iter().next())
        .unwrap_or_else(|| DEFAULT_REDIRECT_URL.to_string());

    Ok(ClientCredentials {
        client_id: secret.client_id,
        client_secret: secret.client_secret,
        redirect_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_web_client() {
        let creds = parse_client_credentials(
            r#"{"web":{"client_id":"id-123","client_secret":"shh"}}"#,
            None,
        )
        .unwrap();

        assert_eq!(creds.client_id, "id-123");
        assert_eq!(creds.client_secret, "shh");
        assert_eq!(creds.redirect_url, DEFAULT_REDIRECT_URL);
    }

    #[test]
    fn parses_installed_client_with_redirect_uris() {
        let creds = parse_client_credentials(
            r#"{"installed":{"client_id":"id","client_secret":"s","redirect_uris":["http://localhost"]}}"#,
            None,
        )
        .unwrap();

        assert_eq!(creds.redirect_url, "http://localhost");
    }

    #[test]
    fn redirect_override_wins() {
        let creds = parse_client_credentials(
            r#"{"web":{"client_id":"id","client_secret":"s","redirect_uris":["http://localhost"]}}"#,
            Some("http://example.com/callback"),
        )
        .unwrap();

        assert_eq!(creds.redirect_url, "http://example.com/callback");
    }

    #[test]
    fn missing_client_section_is_invalid() {
        let err = parse_client_credentials(r#"{"other":{}}"#, None).unwrap_err();
        assert!(matches!(err, QuickstartError::InvalidCredentials(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_client_credentials("{ not json", None).unwrap_err();
        assert!(matches!(err, QuickstartError::Serialization(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_client_credentials(&temp_dir.path().join("client_secret.json"), None)
            .unwrap_err();

        assert!(matches!(err, QuickstartError::CredentialsRead { .. }));
    }

    #[test]
    fn loads_from_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client_secret.json");
        std::fs::write(&path, r#"{"web":{"client_id":"disk","client_secret":"s"}}"#).unwrap();

        let creds = load_client_credentials(&path, None).unwrap();
        assert_eq!(creds.client_id, "disk");
    }
}
