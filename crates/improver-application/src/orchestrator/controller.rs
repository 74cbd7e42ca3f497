//! Orchestrator controller.
//!
//! Owns one session, feeds events into [`reduce`] and carries out the
//! resulting effects through a [`PromptBackend`]. Operations take `&mut self`,
//! so two actions on the same session never overlap.

use super::confirmation::Confirmation;
use super::state::SessionState;
use super::transition::{Effect, Event, Notice, reduce};
use futures::future;
use improver_core::{PromptBackend, Result, Version, VersionId, VersionRole, next_stamp};
use std::collections::VecDeque;
use std::sync::Arc;

/// Tracing target for user-facing progress events.
pub const PROGRESS_TARGET: &str = "improver::progress";

pub const DISCARD_EDITS_MESSAGE: &str = "You'll lose your edits if you continue.";

pub struct Orchestrator {
    backend: Arc<dyn PromptBackend>,
    confirmation: Arc<dyn Confirmation>,
    state: SessionState,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn PromptBackend>, confirmation: Arc<dyn Confirmation>) -> Self {
        Self {
            backend,
            confirmation,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Starts a session from `prompt`.
    pub async fn start(&mut self, prompt: &str) -> Vec<Notice> {
        self.dispatch(Event::Start {
            prompt: prompt.to_string(),
        })
        .await
    }

    /// Produces a fresh improved version of the current prompt.
    pub async fn regenerate(&mut self) -> Vec<Notice> {
        self.dispatch(Event::Regenerate).await
    }

    pub async fn accept(&mut self) -> Vec<Notice> {
        self.dispatch(Event::Accept).await
    }

    pub async fn reject(&mut self) -> Vec<Notice> {
        self.dispatch(Event::Reject { confirmed: false }).await
    }

    pub fn edit_improved_prompt(&mut self, text: impl Into<String>) {
        self.apply_sync(Event::EditImprovedPrompt { text: text.into() });
    }

    pub fn set_feedback(&mut self, text: impl Into<String>) {
        self.apply_sync(Event::SetFeedback { text: text.into() });
    }

    pub fn rate_current(&mut self, thumbs_up: Option<bool>) {
        self.apply_sync(Event::RateCurrent { thumbs_up });
    }

    pub fn reset(&mut self) {
        self.apply_sync(Event::Reset);
        tracing::debug!("Session reset");
    }

    fn apply_sync(&mut self, event: Event) {
        let (next, _) = reduce(&self.state, event);
        self.state = next;
    }

    /// Applies `event` and every event its effects produce, returning the
    /// notices raised along the way.
    pub async fn dispatch(&mut self, event: Event) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut queue = VecDeque::from([event]);

        while let Some(event) = queue.pop_front() {
            let (next, effects) = reduce(&self.state, event);
            self.state = next;

            for effect in effects {
                match effect {
                    Effect::Notify(notice) => {
                        if let Notice::Alert(message) = &notice {
                            tracing::warn!(target: PROGRESS_TARGET, "{}", message);
                        }
                        notices.push(notice);
                    }
                    Effect::ConfirmDiscardEdits => {
                        if self.confirmation.confirm(DISCARD_EDITS_MESSAGE) {
                            queue.push_back(Event::Reject { confirmed: true });
                        }
                    }
                    Effect::RunStart { prompt } => {
                        queue.push_back(completion(self.run_start(prompt).await));
                    }
                    Effect::RunRegenerate {
                        prompt,
                        feedback,
                        thumbs_up,
                    } => {
                        queue.push_back(completion(
                            self.run_regenerate(prompt, feedback, thumbs_up).await,
                        ));
                    }
                    Effect::RunImprove { prompt, feedback } => {
                        queue.push_back(completion(self.run_improve(prompt, feedback).await));
                    }
                    Effect::RunRefine { prompt, feedback } => {
                        queue.push_back(completion(self.run_refine(prompt, feedback).await));
                    }
                }
            }
        }

        notices
    }

    async fn run_start(&self, prompt: String) -> Result<Event> {
        tracing::info!(target: PROGRESS_TARGET, "Improving...");
        let (response, improved_prompt) = future::try_join(
            self.backend.generate_response(&prompt),
            self.backend.improve_prompt(&prompt, "", None),
        )
        .await?;

        tracing::info!(target: PROGRESS_TARGET, "Reticulating splines...");
        let improved_response = self.backend.generate_response(&improved_prompt).await?;
        let analysis = self.analysis_or_empty(&prompt, &improved_prompt).await;

        let stamp = next_stamp();
        let current = Version::new(
            VersionId::from_stamp(stamp, VersionRole::Current),
            prompt,
            response,
        );
        let improved = Version::new(
            VersionId::from_stamp(stamp, VersionRole::Improved),
            improved_prompt,
            improved_response,
        );
        tracing::info!(target: PROGRESS_TARGET, version = %improved.id, "Session started");
        Ok(Event::Started {
            current,
            improved,
            analysis,
        })
    }

    async fn run_regenerate(
        &self,
        prompt: String,
        feedback: String,
        thumbs_up: Option<bool>,
    ) -> Result<Event> {
        tracing::info!(target: PROGRESS_TARGET, "Regenerating...");
        let (improved, analysis) = self.improve_pair(&prompt, &feedback, thumbs_up).await?;
        Ok(Event::Regenerated { improved, analysis })
    }

    async fn run_improve(&self, prompt: String, feedback: String) -> Result<Event> {
        tracing::info!(target: PROGRESS_TARGET, "Improving...");
        let improved_prompt = self.backend.improve_prompt(&prompt, &feedback, None).await?;

        tracing::info!(target: PROGRESS_TARGET, "Reticulating splines...");
        let (response, analysis) = future::join(
            self.backend.generate_response(&improved_prompt),
            self.analysis_or_empty(&prompt, &improved_prompt),
        )
        .await;
        let improved = Version::create(VersionRole::Improved, improved_prompt, response?);
        Ok(Event::Improved { improved, analysis })
    }

    async fn run_refine(&self, prompt: String, feedback: String) -> Result<Event> {
        tracing::info!(target: PROGRESS_TARGET, "Refining...");
        let (improved, analysis) = self.improve_pair(&prompt, &feedback, None).await?;
        Ok(Event::Refined {
            promoted_prompt: prompt,
            improved,
            analysis,
        })
    }

    /// Improve, generate for the result, then analyze.
    async fn improve_pair(
        &self,
        prompt: &str,
        feedback: &str,
        thumbs_up: Option<bool>,
    ) -> Result<(Version, String)> {
        let improved_prompt = self
            .backend
            .improve_prompt(prompt, feedback, thumbs_up)
            .await?;

        tracing::info!(target: PROGRESS_TARGET, "Reticulating splines...");
        let response = self.backend.generate_response(&improved_prompt).await?;
        let analysis = self.analysis_or_empty(prompt, &improved_prompt).await;
        Ok((
            Version::create(VersionRole::Improved, improved_prompt, response),
            analysis,
        ))
    }

    async fn analysis_or_empty(&self, original: &str, improved: &str) -> String {
        match self.backend.analyze_changes(original, improved).await {
            Ok(analysis) => analysis,
            // Analysis is decorative; the session carries on without it.
            Err(err) => {
                tracing::warn!(error = %err, "Change analysis failed");
                String::new()
            }
        }
    }
}

fn completion(result: Result<Event>) -> Event {
    result.unwrap_or_else(|err| {
        tracing::error!(error = %err, "Orchestrator action failed");
        Event::Failed {
            message: err.message(),
        }
    })
}
