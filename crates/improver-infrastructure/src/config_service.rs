//! Configuration service implementation.
//!
//! Loads `RootConfig` from `~/.config/prompt-improver/config.toml` and applies
//! environment overrides on top.

use crate::paths::ImproverPaths;
use improver_core::Result;
use improver_core::config::RootConfig;
use std::path::{Path, PathBuf};

pub const ENV_BIND: &str = "PROMPT_IMPROVER_BIND";
pub const ENV_MODEL_NAME: &str = "OPENAI_MODEL_NAME";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

#[derive(Debug, Clone)]
pub struct ConfigService {
    /// `None` when no config directory exists on this platform.
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    pub fn new() -> Self {
        Self {
            path: ImproverPaths::config_file().ok(),
        }
    }

    /// Creates a ConfigService with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Reads the config file. A missing file yields the defaults; a file that
    /// exists but does not parse is an error.
    pub fn load_file(&self) -> Result<RootConfig> {
        let Some(path) = &self.path else {
            return Ok(RootConfig::default());
        };
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reads the config file and applies overrides from the process environment.
    pub fn load(&self) -> Result<RootConfig> {
        let config = self.load_file()?;
        Ok(apply_env_overrides(config, |key| std::env::var(key).ok()))
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides; blank values are ignored.
pub fn apply_env_overrides<F>(mut config: RootConfig, lookup: F) -> RootConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(bind) = non_blank(ENV_BIND) {
        config.server.bind = bind;
    }
    if let Some(model) = non_blank(ENV_MODEL_NAME) {
        config.model.name = model;
    }
    if let Some(base_url) = non_blank(ENV_OPENAI_BASE_URL) {
        config.openai.base_url = base_url;
    }
    config
}
