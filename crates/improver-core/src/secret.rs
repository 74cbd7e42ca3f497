//! Secret management service trait.
//!
//! Defines the interface for resolving the language-model API key.

/// Reported whenever a completion is attempted without a credential.
pub const MISSING_API_KEY_MESSAGE: &str = "OpenAI API key not configured";

/// Service for resolving the completion API credential.
///
/// The gateway asks for the key on every request, so a missing credential
/// degrades each call independently instead of failing at boot.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Secrets are never logged or exposed in error messages
/// - Secret files have appropriate permissions (e.g., 600 on Unix)
pub trait SecretService: Send + Sync {
    /// Returns the API key, or `None` when none is configured.
    fn api_key(&self) -> Option<String>;
}

/// A fixed credential, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticSecret(Option<String>);

impl StaticSecret {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self(Some(api_key.into()))
    }

    /// A secret service that never has a key.
    pub fn missing() -> Self {
        Self(None)
    }
}

impl SecretService for StaticSecret {
    fn api_key(&self) -> Option<String> {
        self.0.clone()
    }
}
