//! Error types and result aliases for classroom-quickstart.
//!
//! This module provides the error handling system with:
//! - Specific error variants for each failure mode of a run
//! - User-friendly error messages with recovery suggestions
//! - Automatic conversion from common error types

use thiserror::Error;

/// Main error type for classroom-quickstart operations.
#[derive(Error, Debug)]
pub enum QuickstartError {
    /// The client secret file could not be read.
    #[error("Error loading client secret file {path}: {source}")]
    CredentialsRead {
        /// Path that was read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The client secret file parsed but holds no usable client.
    #[error("Invalid client secret file: {0}. Download it again from the Google Cloud console.")]
    InvalidCredentials(String),

    /// The token endpoint rejected the authorization code.
    #[error("Error while trying to retrieve access token: {0}")]
    TokenExchange(String),

    /// Reading the authorization code from the terminal failed.
    #[error("Failed to read the authorization code: {0}")]
    Prompt(String),

    /// API returned a non-success status code.
    #[error("The API returned an error ({status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// API returned 401 Unauthorized.
    #[error("The API returned unauthorized (401). The cached token may be stale; run 'classroom-quickstart logout' and authorize again.")]
    Unauthorized,

    /// API server is unreachable (503 or connection failed).
    #[error("Classroom API is unavailable. Check your network connection or try again later.")]
    ApiUnavailable,

    /// Request timed out.
    #[error("Request timed out. The server may be slow or unreachable. Try again later.")]
    Timeout,

    /// Network error during HTTP request.
    #[error("Network error: {0}. Check your internet connection.")]
    Network(String),

    /// General configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read configuration file.
    #[error("Failed to read configuration file: {0}. Check file permissions and format.")]
    ConfigRead(String),

    /// IO operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed.
    #[error("Data serialization error: {0}. This may indicate corrupted data.")]
    Serialization(String),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias using [`QuickstartError`].
pub type Result<T> = std::result::Result<T, QuickstartError>;

impl From<serde_json::Error> for QuickstartError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON error: {err}"))
    }
}

impl From<toml::de::Error> for QuickstartError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigRead(format!("TOML parse error: {err}"))
    }
}

impl From<reqwest::Error> for QuickstartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ApiUnavailable
        } else if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for QuickstartError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => Self::Network(e.to_string()),
        }
    }
}
