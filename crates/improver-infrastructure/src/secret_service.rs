//! Secret service implementation.
//!
//! Resolves the OpenAI API key once at startup: `OPENAI_API_KEY` first, then
//! `secret.json`. A missing key is not an error here; the gateway reports it
//! per request.

use crate::storage::{SecretStorage, SecretStorageError};
use improver_core::secret::SecretService;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";

#[derive(Clone, Default)]
pub struct EnvSecretService {
    api_key: Option<String>,
}

impl EnvSecretService {
    /// Resolves the key from the process environment and the default secret file.
    pub fn from_env() -> Self {
        let storage = SecretStorage::new().ok();
        Self::resolve(|key| std::env::var(key).ok(), storage.as_ref())
    }

    /// Resolves the key from an arbitrary variable lookup and optional secret file.
    pub fn resolve<F>(lookup: F, storage: Option<&SecretStorage>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|key| !key.trim().is_empty()) {
            tracing::debug!("Using OpenAI API key from {}", ENV_API_KEY);
            return Self { api_key: Some(key) };
        }

        let from_file = storage.and_then(|storage| match storage.load() {
            Ok(config) => config
                .openai
                .map(|openai| openai.api_key)
                .filter(|key| !key.trim().is_empty()),
            Err(SecretStorageError::NotFound(_)) => None,
            Err(err) => {
                tracing::warn!("Ignoring unreadable secret file {}: {}", storage.path().display(), err);
                None
            }
        });

        if from_file.is_some() {
            tracing::debug!("Using OpenAI API key from secret file");
        } else {
            tracing::warn!("No OpenAI API key configured; completion requests will fail");
        }
        Self { api_key: from_file }
    }

    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl SecretService for EnvSecretService {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }
}

impl std::fmt::Debug for EnvSecretService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSecretService")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
