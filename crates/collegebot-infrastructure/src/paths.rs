//! Unified path management for CollegeBot files.
//!
//! All CollegeBot configuration and persisted session data live under the
//! platform's standard directories, resolved via the `dirs` crate.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/collegebot/        # Config directory
//! └── config.toml              # Endpoint and timeout configuration
//!
//! ~/.local/share/collegebot/   # Data directory
//! ├── history.json             # Persisted conversation history
//! └── selection.json           # Persisted selection (absent when cleared)
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for CollegeBot.
pub struct BotPaths;

impl BotPaths {
    /// Returns the CollegeBot configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/collegebot/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("collegebot"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the CollegeBot data directory.
    ///
    /// Persisted session state (history, selection) lives here.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to data directory (e.g., `~/.local/share/collegebot/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join("collegebot"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted conversation history.
    pub fn history_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("history.json"))
    }

    /// Returns the path to the persisted selection.
    ///
    /// This file is absent whenever the selection is cleared.
    pub fn selection_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("selection.json"))
    }
}
