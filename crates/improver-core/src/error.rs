//! Error types for the Prompt Improver.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Prompt Improver workspace.
///
/// The first three variants form the taxonomy the HTTP surface exposes:
/// `Validation` becomes a 400, `Configuration` and `Upstream` become a 500.
/// The remaining variants cover local concerns (config files, templates).
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImproverError {
    /// The request is missing a required field.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A required credential or setting is missing on the server side.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external completion call failed.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ImproverError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an Upstream error
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Configuration error
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Check if this is an Upstream error
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }

    /// Returns the bare message without the variant prefix.
    ///
    /// This is what end users see in alerts and what the HTTP layer puts in
    /// validation responses.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(message)
            | Self::Configuration(message)
            | Self::Upstream(message)
            | Self::Internal(message) => message.clone(),
            Self::Io { message } => message.clone(),
            Self::Serialization { format, message } => format!("{format}: {message}"),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ImproverError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ImproverError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ImproverError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ImproverError>`.
pub type Result<T> = std::result::Result<T, ImproverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates_match_variants() {
        assert!(ImproverError::validation("Prompt is required").is_validation());
        assert!(ImproverError::configuration("no key").is_configuration());
        assert!(ImproverError::upstream("503").is_upstream());
        assert!(!ImproverError::internal("boom").is_upstream());
    }

    #[test]
    fn test_message_strips_variant_prefix() {
        let err = ImproverError::validation("Current prompt is required");
        assert_eq!(err.to_string(), "Validation error: Current prompt is required");
        assert_eq!(err.message(), "Current prompt is required");
    }

    #[test]
    fn test_json_error_converts_to_serialization() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ImproverError = parse_err.into();
        match err {
            ImproverError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
