//! Version domain model.
//!
//! A `Version` is one prompt/response pair. It is the unit that moves between
//! the "current" and "improved" slots and, eventually, into history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

/// Which slot a version was created for. Used as the id suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum VersionRole {
    Current,
    Improved,
}

/// Last millisecond stamp handed out; stamps are strictly increasing.
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Returns the current time in milliseconds, bumped past the previous stamp
/// when two calls land in the same millisecond.
pub fn next_stamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_STAMP.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(last + 1);
        match LAST_STAMP.compare_exchange_weak(last, candidate, Ordering::Relaxed, Ordering::Relaxed)
        {
            Ok(_) => return candidate,
            Err(observed) => last = observed,
        }
    }
}

/// Opaque version identifier of the form `<millis>-<role>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(String);

impl VersionId {
    /// Creates an id from an explicit stamp. Versions published together
    /// share a stamp and differ by role.
    pub fn from_stamp(stamp: i64, role: VersionRole) -> Self {
        Self(format!("{stamp}-{role}"))
    }

    /// Creates a fresh id for a single version.
    pub fn generate(role: VersionRole) -> Self {
        Self::from_stamp(next_stamp(), role)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A snapshot of a prompt and the model response it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub id: VersionId,
    /// Text submitted to the model
    pub prompt: String,
    /// Text returned by response generation for `prompt`
    pub response: String,
    pub timestamp: DateTime<Utc>,
    /// Approve / disapprove / unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbs_up: Option<bool>,
}

impl Version {
    pub fn new(id: VersionId, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            response: response.into(),
            timestamp: Utc::now(),
            thumbs_up: None,
        }
    }

    /// Creates a version with a freshly generated id.
    pub fn create(role: VersionRole, prompt: impl Into<String>, response: impl Into<String>) -> Self {
        Self::new(VersionId::generate(role), prompt, response)
    }

    /// Returns a copy carrying a different prompt text, keeping id and response.
    pub fn with_prompt(&self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_id_carries_role_suffix() {
        let id = VersionId::from_stamp(1700000000000, VersionRole::Improved);
        assert_eq!(id.as_str(), "1700000000000-improved");
    }

    #[test]
    fn test_generated_ids_are_unique_within_a_burst() {
        let ids: Vec<VersionId> = (0..64)
            .map(|_| VersionId::generate(VersionRole::Current))
            .collect();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_with_prompt_keeps_identity() {
        let original = Version::create(VersionRole::Improved, "draft", "answer");
        let edited = original.with_prompt("edited draft");
        assert_eq!(edited.id, original.id);
        assert_eq!(edited.response, "answer");
        assert_eq!(edited.prompt, "edited draft");
    }

    #[test]
    fn test_version_serializes_camel_case() {
        let mut version = Version::create(VersionRole::Current, "p", "r");
        version.thumbs_up = Some(false);
        let json = serde_json::to_value(&version).unwrap();
        assert_eq!(json["thumbsUp"], serde_json::json!(false));
        assert!(json["id"].as_str().unwrap().ends_with("-current"));
    }
}
