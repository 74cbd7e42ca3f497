//! Prompt Improvement Service
//!
//! Rewrites a prompt under a style-preserving policy, optionally steered by
//! user feedback and a thumbs-down signal.

use crate::instructions;
use improver_core::config::ModelSettings;
use improver_core::{CompletionGateway, CompletionRequest, ImproverError, Result};
use std::sync::Arc;

pub const CURRENT_PROMPT_REQUIRED: &str = "Current prompt is required";

pub struct PromptImprovementService {
    gateway: Arc<dyn CompletionGateway>,
    settings: ModelSettings,
}

impl PromptImprovementService {
    pub fn new(gateway: Arc<dyn CompletionGateway>, settings: ModelSettings) -> Self {
        Self { gateway, settings }
    }

    /// Returns an improved rewrite of `current_prompt`.
    ///
    /// Never returns empty text: when the model replies with nothing the
    /// input prompt is echoed back. That fallback is logged so an upstream
    /// that silently returns nothing still shows up in the server log.
    ///
    /// # Errors
    ///
    /// - `Validation` when `current_prompt` is blank
    /// - whatever the gateway reports (`Configuration`, `Upstream`)
    pub async fn improve(
        &self,
        current_prompt: &str,
        feedback: &str,
        thumbs_up: Option<bool>,
    ) -> Result<String> {
        if current_prompt.trim().is_empty() {
            return Err(ImproverError::validation(CURRENT_PROMPT_REQUIRED));
        }

        let request = CompletionRequest::user(instructions::improvement_user_message(current_prompt)?)
            .with_system(instructions::improvement_instruction(feedback, thumbs_up)?)
            .with_max_tokens(self.settings.improve_max_tokens)
            .with_temperature(self.settings.temperature);

        let improved = self.gateway.complete(request).await?;
        if improved.trim().is_empty() {
            tracing::warn!("Improvement returned no content; echoing the original prompt");
            return Ok(current_prompt.to_string());
        }

        Ok(improved)
    }
}
