//! Configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer. Every field has a
//! default so an absent or partial file is valid.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RootConfig {
    pub server: ServerSettings,
    pub model: ModelSettings,
    pub openai: OpenAiSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address the HTTP server listens on
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Generation parameters shared by the three services.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelSettings {
    /// Model identifier sent with every completion
    pub name: String,
    pub temperature: f32,
    pub improve_max_tokens: u32,
    pub analysis_max_tokens: u32,
    /// `None` leaves raw responses at the provider default length
    pub response_max_tokens: Option<u32>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            improve_max_tokens: 500,
            analysis_max_tokens: 200,
            response_max_tokens: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        }
    }
}

/// Root structure of `secret.json`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAiSecret>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiSecret {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: RootConfig = toml::from_str(
            r#"
            [model]
            name = "gpt-4o-mini"
            "#,
        )
        .unwrap();
        assert_eq!(config.model.name, "gpt-4o-mini");
        assert_eq!(config.model.improve_max_tokens, 500);
        assert_eq!(config.model.analysis_max_tokens, 200);
        assert_eq!(config.server.bind, DEFAULT_BIND);
        assert_eq!(config.openai.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert!(config.model.response_max_tokens.is_none());
    }
}
