//! HTTP client for the three prompt endpoints.
//!
//! Lets a front end drive the orchestrator against a running server instead
//! of calling the language model in-process.

use async_trait::async_trait;
use improver_core::api::{
    ANALYZE_CHANGES_PATH, AnalyzeChangesRequest, AnalyzeChangesResponse, ErrorBody,
    GENERATE_RESPONSE_PATH, GenerateResponseRequest, GenerateResponseResponse, HEALTH_PATH,
    HealthResponse, IMPROVE_PROMPT_PATH, ImprovePromptRequest, ImprovePromptResponse,
};
use improver_core::{ImproverError, PromptBackend, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct RemoteBackend {
    client: Client,
    base_url: String,
}

impl RemoteBackend {
    /// Creates a client for a server at `base_url` (e.g. `http://127.0.0.1:3000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probes the server's health endpoint.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, HEALTH_PATH))
            .send()
            .await
            .map_err(|err| ImproverError::upstream(format!("Server unreachable: {err}")))?;
        if !response.status().is_success() {
            return Err(ImproverError::upstream(format!(
                "Health check failed with status {}",
                response.status().as_u16()
            )));
        }
        response
            .json()
            .await
            .map_err(|err| ImproverError::upstream(format!("Invalid health response: {err}")))
    }

    /// POSTs `body` to `path`. `fallback` is the message used when the
    /// server's reply carries none.
    async fn post<B, R>(&self, path: &str, body: &B, fallback: &str) -> Result<R>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|err| {
                tracing::error!("Request to {} failed: {}", path, err);
                ImproverError::upstream(fallback)
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| fallback.to_string());
            return Err(if status == StatusCode::BAD_REQUEST {
                ImproverError::validation(message)
            } else {
                ImproverError::upstream(message)
            });
        }

        response.json::<R>().await.map_err(|err| {
            tracing::error!("Unparsable response from {}: {}", path, err);
            ImproverError::upstream(fallback)
        })
    }
}

#[async_trait]
impl PromptBackend for RemoteBackend {
    async fn generate_response(&self, prompt: &str) -> Result<String> {
        let body = GenerateResponseRequest {
            prompt: Some(prompt.to_string()),
        };
        let reply: GenerateResponseResponse = self
            .post(GENERATE_RESPONSE_PATH, &body, "Failed to generate response")
            .await?;
        Ok(reply.response)
    }

    async fn improve_prompt(
        &self,
        current_prompt: &str,
        feedback: &str,
        thumbs_up: Option<bool>,
    ) -> Result<String> {
        let body = ImprovePromptRequest {
            current_prompt: Some(current_prompt.to_string()),
            feedback: Some(feedback.to_string()),
            thumbs_up,
        };
        let reply: ImprovePromptResponse = self
            .post(IMPROVE_PROMPT_PATH, &body, "Failed to improve prompt")
            .await?;
        Ok(reply.improved_prompt)
    }

    async fn analyze_changes(&self, original_prompt: &str, improved_prompt: &str) -> Result<String> {
        let body = AnalyzeChangesRequest {
            original_prompt: Some(original_prompt.to_string()),
            improved_prompt: Some(improved_prompt.to_string()),
        };
        let reply: AnalyzeChangesResponse = self
            .post(ANALYZE_CHANGES_PATH, &body, "Failed to analyze changes")
            .await?;
        Ok(reply.analysis)
    }
}
