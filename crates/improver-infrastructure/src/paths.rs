//! Unified path management for prompt-improver configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/prompt-improver/   # Config directory (platform config dir)
//! ├── config.toml              # Server and model configuration
//! └── secret.json              # API key fallback
//! ```

use std::path::PathBuf;

const APP_DIR_NAME: &str = "prompt-improver";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct ImproverPaths;

impl ImproverPaths {
    /// Returns the configuration directory (e.g., `~/.config/prompt-improver/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to secret.json.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }
}
