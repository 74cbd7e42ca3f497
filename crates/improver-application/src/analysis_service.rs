//! Change Analysis Service
//!
//! Summarizes, in a few bullets, how an improved prompt differs from the
//! original.

use crate::instructions::{self, ANALYSIS_FALLBACK, ANALYSIS_INSTRUCTION};
use improver_core::config::ModelSettings;
use improver_core::{CompletionGateway, CompletionRequest, ImproverError, Result};
use std::sync::Arc;

pub const BOTH_PROMPTS_REQUIRED: &str = "Both original and improved prompts are required";

pub struct ChangeAnalysisService {
    gateway: Arc<dyn CompletionGateway>,
    settings: ModelSettings,
}

impl ChangeAnalysisService {
    pub fn new(gateway: Arc<dyn CompletionGateway>, settings: ModelSettings) -> Self {
        Self { gateway, settings }
    }

    /// Returns 2-4 lines, each starting with `- `, or [`ANALYSIS_FALLBACK`]
    /// when the model replies with nothing.
    pub async fn analyze(&self, original_prompt: &str, improved_prompt: &str) -> Result<String> {
        if original_prompt.trim().is_empty() || improved_prompt.trim().is_empty() {
            return Err(ImproverError::validation(BOTH_PROMPTS_REQUIRED));
        }

        let request = CompletionRequest::user(instructions::analysis_user_message(
            original_prompt,
            improved_prompt,
        )?)
        .with_system(ANALYSIS_INSTRUCTION)
        .with_max_tokens(self.settings.analysis_max_tokens)
        .with_temperature(self.settings.temperature);

        let analysis = self.gateway.complete(request).await?;
        if analysis.trim().is_empty() {
            return Ok(ANALYSIS_FALLBACK.to_string());
        }
        Ok(analysis)
    }
}
