//! Mapping from `ImproverError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use improver_core::ImproverError;
use improver_core::api::ErrorBody;
use improver_core::secret::MISSING_API_KEY_MESSAGE;

pub const GENERATE_FAILED: &str = "Failed to generate response";
pub const IMPROVE_FAILED: &str = "Failed to improve prompt";
pub const ANALYZE_FAILED: &str = "Failed to analyze changes";

/// An endpoint failure together with the generic message that endpoint
/// reports for upstream trouble.
#[derive(Debug)]
pub struct ApiError {
    error: ImproverError,
    generic_message: &'static str,
}

impl ApiError {
    pub fn new(error: ImproverError, generic_message: &'static str) -> Self {
        Self {
            error,
            generic_message,
        }
    }

    pub fn bad_request(message: impl Into<String>, generic_message: &'static str) -> Self {
        Self::new(ImproverError::validation(message), generic_message)
    }

    /// Status code and client-visible message.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match &self.error {
            ImproverError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ImproverError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MISSING_API_KEY_MESSAGE.to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                self.generic_message.to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self.error, "{}", self.generic_message);
        } else {
            tracing::debug!(error = %self.error, "Rejected request");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
