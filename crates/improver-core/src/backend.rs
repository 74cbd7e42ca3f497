//! The three prompt operations the orchestrator depends on.
//!
//! Implemented in-process over a `CompletionGateway` and remotely over HTTP;
//! the orchestrator cannot tell the two apart.

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PromptBackend: Send + Sync {
    /// Produces a model response for `prompt` as-is.
    async fn generate_response(&self, prompt: &str) -> Result<String>;

    /// Produces an improved rewrite of `current_prompt`.
    ///
    /// A blank `feedback` means no feedback was given.
    async fn improve_prompt(
        &self,
        current_prompt: &str,
        feedback: &str,
        thumbs_up: Option<bool>,
    ) -> Result<String>;

    /// Produces a short bulleted summary of what changed between two prompts.
    async fn analyze_changes(&self, original_prompt: &str, improved_prompt: &str)
    -> Result<String>;
}
