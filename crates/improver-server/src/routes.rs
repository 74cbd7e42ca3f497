//! Endpoint handlers.

use crate::AppState;
use crate::error::{ANALYZE_FAILED, ApiError, GENERATE_FAILED, IMPROVE_FAILED};
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use improver_core::PromptBackend;
use improver_core::api::{
    AnalyzeChangesRequest, AnalyzeChangesResponse, GenerateResponseRequest,
    GenerateResponseResponse, HealthResponse, ImprovePromptRequest, ImprovePromptResponse,
};

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Unwraps a JSON body, turning malformed or missing bodies into a 400.
fn body<T>(
    payload: std::result::Result<Json<T>, JsonRejection>,
    generic_message: &'static str,
) -> std::result::Result<T, ApiError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| {
            ApiError::bad_request(
                format!("Invalid request body: {}", rejection.body_text()),
                generic_message,
            )
        })
}

pub async fn generate_response(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GenerateResponseRequest>, JsonRejection>,
) -> ApiResult<GenerateResponseResponse> {
    let request = body(payload, GENERATE_FAILED)?;
    let prompt = request.prompt.unwrap_or_default();
    tracing::debug!(chars = prompt.len(), "generate-response");

    let response = state
        .backend
        .generate_response(&prompt)
        .await
        .map_err(|err| ApiError::new(err, GENERATE_FAILED))?;
    Ok(Json(GenerateResponseResponse { response }))
}

pub async fn improve_prompt(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ImprovePromptRequest>, JsonRejection>,
) -> ApiResult<ImprovePromptResponse> {
    let request = body(payload, IMPROVE_FAILED)?;
    let current_prompt = request.current_prompt.unwrap_or_default();
    let feedback = request.feedback.unwrap_or_default();
    tracing::debug!(
        chars = current_prompt.len(),
        has_feedback = !feedback.trim().is_empty(),
        thumbs_up = ?request.thumbs_up,
        "improve-prompt"
    );

    let improved_prompt = state
        .backend
        .improve_prompt(&current_prompt, &feedback, request.thumbs_up)
        .await
        .map_err(|err| ApiError::new(err, IMPROVE_FAILED))?;
    Ok(Json(ImprovePromptResponse { improved_prompt }))
}

pub async fn analyze_changes(
    State(state): State<AppState>,
    payload: std::result::Result<Json<AnalyzeChangesRequest>, JsonRejection>,
) -> ApiResult<AnalyzeChangesResponse> {
    let request = body(payload, ANALYZE_FAILED)?;
    let original = request.original_prompt.unwrap_or_default();
    let improved = request.improved_prompt.unwrap_or_default();

    let analysis = state
        .backend
        .analyze_changes(&original, &improved)
        .await
        .map_err(|err| ApiError::new(err, ANALYZE_FAILED))?;
    Ok(Json(AnalyzeChangesResponse { analysis }))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        model: state.backend.model().to_string(),
    })
}
