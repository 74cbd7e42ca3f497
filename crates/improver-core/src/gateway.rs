//! Completion gateway contract.
//!
//! The gateway is the only component that talks to the language model. It is
//! stateless: one instruction plus one user payload in, generated text out.

use crate::error::Result;
use async_trait::async_trait;

/// A single chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction. `None` sends the user message alone.
    pub system: Option<String>,
    /// User message content
    pub user: String,
    /// Upper bound on generated tokens; `None` leaves the provider default.
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request carrying only a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            system: None,
            user: content.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets the system instruction.
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system = Some(instruction.into());
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Opaque request/response access to a language model.
///
/// # Errors
///
/// - `ImproverError::Configuration` when no credential is available
/// - `ImproverError::Upstream` for any failure of the call itself
///
/// A reply without content is returned as an empty string; deciding whether
/// that is acceptable is left to the caller.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Model identifier used for completions.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_all_fields() {
        let request = CompletionRequest::user("hello")
            .with_system("be brief")
            .with_max_tokens(200)
            .with_temperature(0.3);
        assert_eq!(request.system.as_deref(), Some("be brief"));
        assert_eq!(request.user, "hello");
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.temperature, Some(0.3));
    }

    #[test]
    fn test_user_only_request_has_no_system_instruction() {
        let request = CompletionRequest::user("hello");
        assert!(request.system.is_none());
        assert!(request.max_tokens.is_none());
    }
}
