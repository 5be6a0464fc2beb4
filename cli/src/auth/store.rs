//! Token cache storage.
//!
//! This module provides persistence for the authorization token:
//! - [`TokenStore`] - Trait for token storage operations
//! - [`FileTokenStore`] - JSON file-based storage implementation
//!
//! Only one token is ever cached. Its presence alone decides whether the
//! interactive authorization flow runs.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::auth::tokens::Token;
use crate::error::Result;

/// Trait for token storage operations (enables swapping the backing store).
pub trait TokenStore {
    /// Loads the cached token.
    ///
    /// Returns `None` when no token is cached or the cache cannot be read.
    ///
    /// # Errors
    ///
    /// Returns an error if a cached token exists but cannot be parsed.
    fn load(&self) -> Result<Option<Token>>;

    /// Saves the token, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written.
    fn store(&self, token: &Token) -> Result<()>;

    /// Deletes the cached token.
    ///
    /// Returns `true` if a token was deleted, `false` if none was cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    fn delete(&self) -> Result<bool>;
}

/// File-based token storage.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store bound to a token file path.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Gets the token file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensures the token directory exists. An existing directory is fine.
    fn ensure_dir(&self) -> Result<()> {
        let Some(dir) = self.path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() {
            return Ok(());
        }

        match fs::create_dir(dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<Token>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No cached token at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("Cannot read cached token {}: {e}", self.path.display());
                return Ok(None);
            }
        };

        let token: Token = serde_json::from_str(&contents)?;
        Ok(Some(token))
    }

    fn store(&self, token: &Token) -> Result<()> {
        self.ensure_dir()?;

        let json = serde_json::to_string(token)?;
        fs::write(&self.path, json)?;

        println!("Token stored to {}", self.path.display());
        Ok(())
    }

    fn delete(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
