//! JSON bodies exchanged over the three HTTP endpoints.
//!
//! Request fields are optional on the wire so the server can answer a missing
//! field with a descriptive 400 instead of a deserialization failure.

use serde::{Deserialize, Serialize};

pub const GENERATE_RESPONSE_PATH: &str = "/api/generate-response";
pub const IMPROVE_PROMPT_PATH: &str = "/api/improve-prompt";
pub const ANALYZE_CHANGES_PATH: &str = "/api/analyze-changes";
pub const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateResponseRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponseResponse {
    pub response: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImprovePromptRequest {
    pub current_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbs_up: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovePromptResponse {
    pub improved_prompt: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzeChangesRequest {
    pub original_prompt: Option<String>,
    pub improved_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeChangesResponse {
    pub analysis: String,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}
