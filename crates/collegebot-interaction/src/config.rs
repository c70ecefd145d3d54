//! Configuration file management for CollegeBot.
//!
//! Supports reading the remote Q&A endpoint and request timeout from
//! `~/.config/collegebot/config.toml`. A missing file yields the default
//! configuration; a present but unreadable file is an error.

use collegebot_infrastructure::BotPaths;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Root configuration structure for config.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Remote Q&A service endpoint; falls back to the built-in default.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds; falls back to the built-in default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Loads the configuration file from ~/.config/collegebot/config.toml
///
/// # Returns
///
/// - `Ok(BotConfig)`: Parsed configuration, or defaults if no file exists
/// - `Err(String)`: The file exists but cannot be read or parsed
pub fn load_config() -> Result<BotConfig, String> {
    let config_path = BotPaths::config_file()
        .map_err(|e| format!("Could not resolve config path: {e}"))?;
    load_config_from(&config_path)
}

/// Loads configuration from an explicit path.
pub fn load_config_from(config_path: &Path) -> Result<BotConfig, String> {
    if !config_path.exists() {
        return Ok(BotConfig::default());
    }

    let content = fs::read_to_string(config_path).map_err(|e| {
        format!(
            "Failed to read configuration file at {}: {}",
            config_path.display(),
            e
        )
    })?;

    toml::from_str(&content).map_err(|e| {
        format!(
            "Failed to parse configuration file at {}: {}",
            config_path.display(),
            e
        )
    })
}
