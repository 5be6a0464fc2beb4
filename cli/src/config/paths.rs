//! Platform-specific path utilities for classroom-quickstart.

use std::path::PathBuf;

use crate::error::{QuickstartError, Result};

/// File name of the cached authorization token.
pub const TOKEN_FILE_NAME: &str = "classroom-nodejs-quickstart.json";

/// Get the configuration directory for classroom-quickstart.
///
/// - Linux: `~/.config/classroom-quickstart`
/// - macOS: `~/Library/Application Support/classroom-quickstart`
/// - Windows: `%APPDATA%\classroom-quickstart`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| {
        QuickstartError::Config("Cannot determine config directory".to_string())
    })?;
    Ok(base.join("classroom-quickstart"))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get the per-user credentials directory (`~/.credentials`).
pub fn credentials_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| QuickstartError::Config("Cannot determine home directory".to_string()))?;
    Ok(home.join(".credentials"))
}

/// Get the default token cache path.
pub fn token_file() -> Result<PathBuf> {
    Ok(credentials_dir()?.join(TOKEN_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_file_lives_in_credentials_dir() {
        let path = token_file().unwrap();
        assert!(path.ends_with(".credentials/classroom-nodejs-quickstart.json"));
    }

    #[test]
    fn config_file_is_toml() {
        let path = config_file().unwrap();
        assert!(path.ends_with("classroom-quickstart/config.toml"));
    }
}
