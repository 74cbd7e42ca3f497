//! OpenAiGateway - Direct REST implementation of the completion gateway.
//!
//! Calls the OpenAI Chat Completions API. The API key is looked up through a
//! `SecretService` on every call.

use async_trait::async_trait;
use improver_core::config::DEFAULT_OPENAI_BASE_URL;
use improver_core::{CompletionGateway, CompletionRequest, ImproverError, Result, SecretService};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub use improver_core::secret::MISSING_API_KEY_MESSAGE;

/// Gateway implementation that talks to the OpenAI HTTP API.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    base_url: String,
    model: String,
    secrets: Arc<dyn SecretService>,
}

impl OpenAiGateway {
    /// Creates a gateway for `model` against the public OpenAI endpoint.
    pub fn new(secrets: Arc<dyn SecretService>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: model.into(),
            secrets,
        }
    }

    /// Points the gateway at a different API root (proxies, compatible servers, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_messages(request: &CompletionRequest) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: request.user.clone(),
        });
        messages
    }

    async fn send_request(&self, api_key: &str, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| ImproverError::upstream(format!("OpenAI API request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(status, &body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            ImproverError::upstream(format!("Failed to parse OpenAI response: {err}"))
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let api_key = self
            .secrets
            .api_key()
            .ok_or_else(|| ImproverError::configuration(MISSING_API_KEY_MESSAGE))?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: Self::build_messages(&request),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.model,
            max_tokens = ?request.max_tokens,
            has_system = request.system.is_some(),
            "Sending chat completion"
        );
        self.send_request(&api_key, &body).await
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// First choice's content; a reply without one is empty text.
fn extract_text_response(response: ChatCompletionResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: &str) -> ImproverError {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string());

    ImproverError::upstream(format!("OpenAI API returned {}: {}", status.as_u16(), message))
}
