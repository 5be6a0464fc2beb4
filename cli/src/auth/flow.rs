//! OAuth authorization-code flow.
//!
//! The [`Authorizer`] reuses a cached token when one exists. Otherwise it
//! prints an authorization URL, reads the code the user pastes back, exchanges
//! it at the token endpoint and caches the result.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::reqwest::async_http_client;
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, RedirectUrl,
    RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use url::Url;

use crate::auth::credentials::ClientCredentials;
use crate::auth::store::TokenStore;
use crate::auth::tokens::Token;
use crate::config::AuthConfig;
use crate::error::{QuickstartError, Result};

/// Source of the authorization code pasted by the user.
pub trait CodePrompt {
    /// Show the authorization URL and return the code the user entered.
    ///
    /// # Errors
    ///
    /// Returns [`QuickstartError::Prompt`] if no code could be read.
    fn request_code(&mut self, auth_url: &Url) -> Result<String>;
}

/// Prompt on the controlling terminal.
pub struct TerminalPrompt {
    open_browser: bool,
}

impl TerminalPrompt {
    #[must_use]
    pub const fn new(open_browser: bool) -> Self {
        Self { open_browser }
    }
}

impl CodePrompt for TerminalPrompt {
    fn request_code(&mut self, auth_url: &Url) -> Result<String> {
        println!("Authorize this app by visiting this url: {auth_url}");

        if self.open_browser && open::that(auth_url.as_str()).is_err() {
            println!("Could not open browser. Please visit the URL manually.");
        }

        print!("Enter the code from that page here: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| QuickstartError::Prompt(e.to_string()))?;

        Ok(line.trim().to_string())
    }
}

/// How an [`AuthorizedClient`] got its token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Read from the token cache.
    Cached,
    /// Freshly exchanged from an authorization code.
    Exchanged,
}

/// Handle carrying the token used to call the Classroom API.
#[derive(Debug, Clone)]
pub struct AuthorizedClient {
    pub token: Token,
    pub source: TokenSource,
}

/// Obtains an [`AuthorizedClient`] from a cached or freshly exchanged token.
pub struct Authorizer<S> {
    client: BasicClient,
    scopes: Vec<Scope>,
    store: S,
}

impl<S: TokenStore> Authorizer<S> {
    /// Build an authorizer for the given client and endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`QuickstartError::Config`] if an endpoint or the redirect URL
    /// is not a valid URL.
    pub fn new(credentials: &ClientCredentials, config: &AuthConfig, store: S) -> Result<Self> {
        let auth_url = AuthUrl::new(config.auth_url.to_string())
            .map_err(|e| QuickstartError::Config(format!("Invalid auth URL: {e}")))?;
        let token_url = TokenUrl::new(config.token_url.to_string())
            .map_err(|e| QuickstartError::Config(format!("Invalid token URL: {e}")))?;
        let redirect_url = RedirectUrl::new(credentials.redirect_url.clone())
            .map_err(|e| QuickstartError::Config(format!("Invalid redirect URL: {e}")))?;

        let client = BasicClient::new(
            ClientId::new(credentials.client_id.clone()),
            Some(ClientSecret::new(credentials.client_secret.clone())),
            auth_url,
            Some(token_url),
        )
        .set_redirect_uri(redirect_url);

        Ok(Self {
            client,
            scopes: config.scopes.iter().cloned().map(Scope::new).collect(),
            store,
        })
    }

    /// Build the URL the user visits to grant offline access.
    #[must_use]
    pub fn authorization_url(&self) -> Url {
        let (url, _csrf) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.scopes.iter().cloned())
            .add_extra_param("access_type", "offline")
            .url();
        url
    }

    /// Authorize, reusing the cached token when present.
    ///
    /// A cached token is handed back as-is, even if it has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the cached token is corrupted, the code cannot be
    /// read, the exchange fails, or the new token cannot be cached.
    pub async fn authorize(&self, prompt: &mut impl CodePrompt) -> Result<AuthorizedClient> {
        if let Some(token) = self.store.load()? {
            if token.is_expired() {
                tracing::debug!("Cached token has expired, using it anyway");
            }
            return Ok(AuthorizedClient {
                token,
                source: TokenSource::Cached,
            });
        }

        let code = prompt.request_code(&self.authorization_url())?;
        if code.is_empty() {
            return Err(QuickstartError::TokenExchange(
                "no authorization code entered".to_string(),
            ));
        }

        let token = self.exchange_code(code).await?;
        self.store.store(&token)?;

        Ok(AuthorizedClient {
            token,
            source: TokenSource::Exchanged,
        })
    }

    async fn exchange_code(&self, code: String) -> Result<Token> {
        tracing::debug!("Exchanging authorization code");

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .request_async(async_http_client)
            .await
            .map_err(|e| match e {
                RequestTokenError::ServerResponse(resp) => {
                    QuickstartError::TokenExchange(resp.to_string())
                }
                other => QuickstartError::TokenExchange(other.to_string()),
            })?;

        Ok(self.token_from_response(&response))
    }

    fn token_from_response(&self, response: &BasicTokenResponse) -> Token {
        let expiry = response.expires_in().map(|duration| {
            Utc::now() + chrono::Duration::from_std(duration).unwrap_or_default()
        });

        let scopes = response.scopes().map_or_else(
            || self.scopes.iter().map(|s| s.to_string()).collect(),
            |granted| granted.iter().map(|s| s.to_string()).collect(),
        );

        Token {
            access_token: response.access_token().secret().to_string(),
            refresh_token: response.refresh_token().map(|t| t.secret().to_string()),
            token_type: "Bearer".to_string(),
            expiry,
            scopes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::FileTokenStore;
    use tempfile::TempDir;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Prompt returning a fixed code and counting how often it was asked.
    struct ScriptedPrompt {
        code: String,
        calls: usize,
        last_url: Option<Url>,
    }

    impl ScriptedPrompt {
        fn new(code: &str) -> Self {
            Self {
                code: code.to_string(),
                calls: 0,
                last_url: None,
            }
        }
    }

    impl CodePrompt for ScriptedPrompt {
        fn request_code(&mut self, auth_url: &Url) -> Result<String> {
            self.calls += 1;
            self.last_url = Some(auth_url.clone());
            Ok(self.code.clone())
        }
    }

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: "client-id".to_string(),
            client_secret: "client-secret".to_string(),
            redirect_url: "http://google.com".to_string(),
        }
    }

    fn config(token_url: &str) -> AuthConfig {
        AuthConfig {
            token_url: Url::parse(token_url).unwrap(),
            ..AuthConfig::default()
        }
    }

    fn cached_token() -> Token {
        Token {
            access_token: "cached".to_string(),
            refresh_token: None,
            token_type: "Bearer".to_string(),
            expiry: None,
            scopes: vec![],
        }
    }

    #[test]
    fn authorization_url_requests_offline_access() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("token.json"));
        let authorizer =
            Authorizer::new(&credentials(), &AuthConfig::default(), store).unwrap();

        let url = authorizer.authorization_url();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert!(url.as_str().starts_with("https://accounts.google.com/o/oauth2/v2/auth"));
        assert!(query.contains(&("access_type".to_string(), "offline".to_string())));
        assert!(query.contains(&("client_id".to_string(), "client-id".to_string())));
        assert!(query.contains(&("redirect_uri".to_string(), "http://google.com".to_string())));
        let scope = query
            .iter()
            .find(|(k, _)| k == "scope")
            .map(|(_, v)| v.clone())
            .unwrap();
        assert!(scope.contains("classroom.courses.readonly"));
        assert!(scope.contains("classroom.coursework.students.readonly"));
        assert!(scope.contains("classroom.coursework.me.readonly"));
    }

    #[test]
    fn rejects_invalid_redirect_url() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("token.json"));
        let mut creds = credentials();
        creds.redirect_url = "not a url".to_string();

        let result = Authorizer::new(&creds, &AuthConfig::default(), store);
        assert!(matches!(result, Err(QuickstartError::Config(_))));
    }

    #[tokio::test]
    async fn cached_token_never_prompts() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileTokenStore::new(temp_dir.path().join("token.json"));
        store.store(&cached_token()).unwrap();
        let authorizer =
            Authorizer::new(&credentials(), &AuthConfig::default(), store).unwrap();
        let mut prompt = ScriptedPrompt::new("unused");

        for _ in 0..2 {
            let client = authorizer.authorize(&mut prompt).await.unwrap();
            assert_eq!(client.token.access_token, "cached");
            assert_eq!(client.source, TokenSource::Cached);
        }
        assert_eq!(prompt.calls, 0);
    }

    #[tokio::test]
    async fn exchanges_code_and_caches_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("code=4%2Fabc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "ya29.fresh",
                "refresh_token": "1//refresh",
                "token_type": "Bearer",
                "expires_in": 3599,
                "scope": "https://www.googleapis.com/auth/classroom.courses.readonly"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join(".credentials").join("token.json");
        let store = FileTokenStore::new(token_path.clone());
        let authorizer = Authorizer::new(
            &credentials(),
            &config(&format!("{}/token", server.uri())),
            store,
        )
        .unwrap();
        let mut prompt = ScriptedPrompt::new("4/abc");

        let first = authorizer.authorize(&mut prompt).await.unwrap();
        assert_eq!(first.source, TokenSource::Exchanged);
        assert_eq!(first.token.access_token, "ya29.fresh");
        assert_eq!(first.token.refresh_token.as_deref(), Some("1//refresh"));
        assert!(first.token.expiry.is_some());
        assert!(token_path.exists());

        let second = authorizer.authorize(&mut prompt).await.unwrap();
        assert_eq!(second.source, TokenSource::Cached);
        assert_eq!(second.token, first.token);
        assert_eq!(prompt.calls, 1);
    }

    #[tokio::test]
    async fn failed_exchange_stores_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_grant",
                "error_description": "Malformed auth code."
            })))
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().unwrap();
        let token_path = temp_dir.path().join("token.json");
        let authorizer = Authorizer::new(
            &credentials(),
            &config(&format!("{}/token", server.uri())),
            FileTokenStore::new(token_path.clone()),
        )
        .unwrap();
        let mut prompt = ScriptedPrompt::new("bad-code");

        let err = authorizer.authorize(&mut prompt).await.unwrap_err();
        assert!(matches!(err, QuickstartError::TokenExchange(_)));
        assert!(err.to_string().contains("invalid_grant"));
        assert!(!token_path.exists());
    }

    #[tokio::test]
    async fn empty_code_is_rejected_without_exchange() {
        let temp_dir = TempDir::new().unwrap();
        let authorizer = Authorizer::new(
            &credentials(),
            &AuthConfig::default(),
            FileTokenStore::new(temp_dir.path().join("token.json")),
        )
        .unwrap();
        let mut prompt = ScriptedPrompt::new("");

        let err = authorizer.authorize(&mut prompt).await.unwrap_err();
        assert!(matches!(err, QuickstartError::TokenExchange(_)));
        assert!(prompt.last_url.is_some());
    }
}
