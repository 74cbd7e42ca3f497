use async_trait::async_trait;
use improver_application::LocalBackend;
use improver_core::api::{ErrorBody, HealthResponse};
use improver_core::config::ModelSettings;
use improver_core::secret::MISSING_API_KEY_MESSAGE;
use improver_core::{CompletionGateway, CompletionRequest, ImproverError, Result};
use improver_server::{AppState, serve_listener};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;

enum Mode {
    Healthy,
    NoKey,
    Broken,
}

/// Answers by request kind so each endpoint can be told apart.
struct FakeGateway(Mode);

#[async_trait]
impl CompletionGateway for FakeGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        match self.0 {
            Mode::NoKey => return Err(ImproverError::configuration(MISSING_API_KEY_MESSAGE)),
            Mode::Broken => return Err(ImproverError::upstream("OpenAI API returned 503: down")),
            Mode::Healthy => {}
        }
        let reply = match request.system.as_deref() {
            None => format!("answer: {}", request.user),
            Some(system) if system.starts_with("You are a prompt editor") => {
                "Write a short, vivid poem about nature in free verse.".to_string()
            }
            Some(_) => "- Added subject\n- Added form".to_string(),
        };
        Ok(reply)
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

async fn spawn(mode: Mode) -> String {
    let backend = LocalBackend::new(Arc::new(FakeGateway(mode)), ModelSettings::default());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_listener(listener, AppState::new(backend)));
    format!("http://{addr}")
}

async fn post(base: &str, path: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_generate_response_returns_model_text() {
    let base = spawn(Mode::Healthy).await;
    let (status, body) = post(&base, "/api/generate-response", json!({ "prompt": "hi" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "response": "answer: hi" }));
}

#[tokio::test]
async fn test_improve_prompt_returns_improved_text() {
    let base = spawn(Mode::Healthy).await;
    let (status, body) = post(
        &base,
        "/api/improve-prompt",
        json!({ "currentPrompt": "write a poem", "feedback": "", "thumbsUp": true }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "improvedPrompt": "Write a short, vivid poem about nature in free verse." })
    );
}

#[tokio::test]
async fn test_analyze_changes_returns_bullets() {
    let base = spawn(Mode::Healthy).await;
    let (status, body) = post(
        &base,
        "/api/analyze-changes",
        json!({ "originalPrompt": "a", "improvedPrompt": "b" }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["analysis"], "- Added subject\n- Added form");
}

#[tokio::test]
async fn test_missing_required_fields_are_bad_requests() {
    let base = spawn(Mode::Healthy).await;

    let (status, body) = post(&base, "/api/generate-response", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Prompt is required");

    let (status, body) = post(&base, "/api/improve-prompt", json!({ "feedback": "x" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Current prompt is required");

    let (status, body) = post(
        &base,
        "/api/analyze-changes",
        json!({ "originalPrompt": "only one" }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Both original and improved prompts are required");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let base = spawn(Mode::Healthy).await;
    let response = reqwest::Client::new()
        .post(format!("{base}/api/improve-prompt"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: ErrorBody = response.json().await.unwrap();
    assert!(body.error.starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_missing_key_is_reported_verbatim() {
    let base = spawn(Mode::NoKey).await;
    let (status, body) = post(&base, "/api/generate-response", json!({ "prompt": "hi" })).await;
    assert_eq!(status, 500);
    assert_eq!(body["error"], MISSING_API_KEY_MESSAGE);
}

#[tokio::test]
async fn test_upstream_failures_use_generic_messages() {
    let base = spawn(Mode::Broken).await;

    let (status, body) = post(&base, "/api/generate-response", json!({ "prompt": "hi" })).await;
    assert_eq!((status, body["error"].clone()), (500, json!("Failed to generate response")));

    let (status, body) = post(&base, "/api/improve-prompt", json!({ "currentPrompt": "hi" })).await;
    assert_eq!((status, body["error"].clone()), (500, json!("Failed to improve prompt")));

    let (status, body) = post(
        &base,
        "/api/analyze-changes",
        json!({ "originalPrompt": "a", "improvedPrompt": "b" }),
    )
    .await;
    assert_eq!((status, body["error"].clone()), (500, json!("Failed to analyze changes")));
}

#[tokio::test]
async fn test_health_reports_model() {
    let base = spawn(Mode::Healthy).await;
    let health: HealthResponse = reqwest::get(format!("{base}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.model, "fake-model");
}
