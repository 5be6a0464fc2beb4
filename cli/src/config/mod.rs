//! Configuration management for classroom-quickstart.

pub mod paths;
pub mod settings;

pub use paths::config_file;
pub use settings::{ApiConfig, AuthConfig, QuickstartConfig};

use std::path::Path;

use crate::error::{QuickstartError, Result};

/// Load configuration from the default config file.
///
/// If the config file doesn't exist, returns default configuration.
pub fn load_config() -> Result<QuickstartConfig> {
    let path = config_file()?;
    load_config_from(&path)
}

/// Load configuration from a specific path.
///
/// If the file doesn't exist, returns default configuration.
pub fn load_config_from(path: &Path) -> Result<QuickstartConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(QuickstartConfig::default().with_env_overrides());
    }

    let contents = std::fs::read_to_string(path)?;
    let config: QuickstartConfig =
        toml::from_str(&contents).map_err(|e| QuickstartError::ConfigRead(e.to_string()))?;

    Ok(config.with_env_overrides())
}
