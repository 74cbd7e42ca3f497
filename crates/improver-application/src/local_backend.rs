//! In-process `PromptBackend` over the three services.
//!
//! The HTTP server serves this backend, and front ends can use it directly
//! when no server is running.

use crate::analysis_service::ChangeAnalysisService;
use crate::generation_service::ResponseGenerationService;
use crate::improvement_service::PromptImprovementService;
use async_trait::async_trait;
use improver_core::config::ModelSettings;
use improver_core::{CompletionGateway, PromptBackend, Result};
use std::sync::Arc;

pub struct LocalBackend {
    model: String,
    generation: ResponseGenerationService,
    improvement: PromptImprovementService,
    analysis: ChangeAnalysisService,
}

impl LocalBackend {
    pub fn new(gateway: Arc<dyn CompletionGateway>, settings: ModelSettings) -> Self {
        Self {
            model: gateway.model().to_string(),
            generation: ResponseGenerationService::new(gateway.clone(), settings.clone()),
            improvement: PromptImprovementService::new(gateway.clone(), settings.clone()),
            analysis: ChangeAnalysisService::new(gateway, settings),
        }
    }

    /// Model identifier the gateway sends.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl PromptBackend for LocalBackend {
    async fn generate_response(&self, prompt: &str) -> Result<String> {
        self.generation.generate(prompt).await
    }

    async fn improve_prompt(
        &self,
        current_prompt: &str,
        feedback: &str,
        thumbs_up: Option<bool>,
    ) -> Result<String> {
        self.improvement
            .improve(current_prompt, feedback, thumbs_up)
            .await
    }

    async fn analyze_changes(&self, original_prompt: &str, improved_prompt: &str) -> Result<String> {
        self.analysis.analyze(original_prompt, improved_prompt).await
    }
}
