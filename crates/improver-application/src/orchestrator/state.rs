//! Session state owned by the orchestrator.

use improver_core::Version;

/// Coarse lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum Phase {
    /// No session started
    #[default]
    Idle,
    /// Initial dual dispatch in flight
    Generating,
    /// Current (and possibly improved) version on display
    Ready,
    /// A new improved version is being produced
    Improving,
}

/// Everything a front end needs to render a session.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub phase: Phase,
    pub current_version: Option<Version>,
    pub improved_version: Option<Version>,
    /// Accepted and rejected versions, most recent first
    pub history: Vec<Version>,
    pub changes_analysis: String,
    /// Feedback typed for the next improvement
    pub feedback: String,
    /// Scratch copy of the improved prompt the user may edit
    pub edited_improved_prompt: String,
    pub is_prompt_edited: bool,
    pub is_generating: bool,
    pub is_improving: bool,
    pub is_analyzing: bool,
}

impl SessionState {
    pub fn has_started(&self) -> bool {
        self.current_version.is_some()
    }

    /// True while an operation is in flight; user actions are ignored then.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Generating | Phase::Improving)
    }

    /// Publishes a freshly generated improved version and resets the edit
    /// scratch to match it.
    pub(crate) fn publish_improved(&mut self, improved: Version, analysis: String) {
        self.edited_improved_prompt = improved.prompt.clone();
        self.is_prompt_edited = false;
        self.improved_version = Some(improved);
        self.changes_analysis = analysis;
    }

    pub(crate) fn clear_edit_scratch(&mut self) {
        self.edited_improved_prompt.clear();
        self.is_prompt_edited = false;
    }

    /// Returns to `Ready` with every in-flight flag cleared.
    pub(crate) fn settle_ready(&mut self) {
        self.phase = Phase::Ready;
        self.is_generating = false;
        self.is_improving = false;
        self.is_analyzing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_label_and_busy_flag() {
        let mut state = SessionState::default();
        assert_eq!(state.phase.to_string(), "Idle");
        assert!(!state.is_busy());

        state.phase = Phase::Improving;
        assert_eq!(state.phase.to_string(), "Improving");
        assert!(state.is_busy());
    }
}
