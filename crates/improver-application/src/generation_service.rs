//! Response Generation Service
//!
//! Sends a prompt as-is to show what a model would answer.

use improver_core::config::ModelSettings;
use improver_core::{CompletionGateway, CompletionRequest, ImproverError, Result};
use std::sync::Arc;

pub const PROMPT_REQUIRED: &str = "Prompt is required";

pub struct ResponseGenerationService {
    gateway: Arc<dyn CompletionGateway>,
    settings: ModelSettings,
}

impl ResponseGenerationService {
    pub fn new(gateway: Arc<dyn CompletionGateway>, settings: ModelSettings) -> Self {
        Self { gateway, settings }
    }

    /// Generates a model response to `prompt`, with no system instruction.
    ///
    /// An empty reply is an `Upstream` error: there is nothing sensible to
    /// show next to the prompt.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        if prompt.trim().is_empty() {
            return Err(ImproverError::validation(PROMPT_REQUIRED));
        }

        let mut request = CompletionRequest::user(prompt).with_temperature(self.settings.temperature);
        if let Some(max_tokens) = self.settings.response_max_tokens {
            request = request.with_max_tokens(max_tokens);
        }

        let response = self.gateway.complete(request).await?;
        if response.trim().is_empty() {
            return Err(ImproverError::upstream("Model returned no content"));
        }
        Ok(response)
    }
}
