//! Pure state transitions.
//!
//! `reduce` maps the current state and one event to the next state plus the
//! effects the controller must carry out. It performs no I/O, so every rule
//! of the session can be tested without a backend.

use super::state::{Phase, SessionState};
use improver_core::Version;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt to improve.";

/// Something that happened: a user action or the completion of an effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Start { prompt: String },
    Regenerate,
    Accept,
    /// `confirmed` is true once the user agreed to discard unsaved edits.
    Reject { confirmed: bool },
    EditImprovedPrompt { text: String },
    SetFeedback { text: String },
    RateCurrent { thumbs_up: Option<bool> },
    Reset,

    /// Start pipeline finished.
    Started {
        current: Version,
        improved: Version,
        analysis: String,
    },
    /// Regenerate pipeline finished.
    Regenerated { improved: Version, analysis: String },
    /// Accept produced the first improved version for the current one.
    Improved { improved: Version, analysis: String },
    /// Accept refined an edited or commented improved version.
    Refined {
        /// Text that was sent for improvement; becomes the new current prompt
        promoted_prompt: String,
        improved: Version,
        analysis: String,
    },
    /// A fatal step of the running pipeline failed.
    Failed { message: String },
}

/// Work the controller performs on behalf of the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notice),
    /// Generate + improve concurrently, generate for the improved prompt, analyze.
    RunStart { prompt: String },
    /// Improve + generate, then analyze.
    RunRegenerate {
        prompt: String,
        feedback: String,
        thumbs_up: Option<bool>,
    },
    /// Improve, then generate and analyze.
    RunImprove { prompt: String, feedback: String },
    /// Improve the (possibly edited) improved prompt, then generate and analyze.
    RunRefine { prompt: String, feedback: String },
    /// Ask the user whether unsaved edits may be discarded.
    ConfirmDiscardEdits,
}

/// User-facing signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Input was rejected before any work started.
    Validation(String),
    /// A fatal failure aborted the action.
    Alert(String),
}

pub fn reduce(state: &SessionState, event: Event) -> (SessionState, Vec<Effect>) {
    let mut next = state.clone();
    let effects = apply(&mut next, event);
    (next, effects)
}

fn apply(state: &mut SessionState, event: Event) -> Vec<Effect> {
    match event {
        Event::Start { prompt } => {
            if state.phase != Phase::Idle {
                return Vec::new();
            }
            if prompt.trim().is_empty() {
                return vec![Effect::Notify(Notice::Validation(
                    EMPTY_PROMPT_MESSAGE.to_string(),
                ))];
            }
            state.phase = Phase::Generating;
            state.is_generating = true;
            state.is_analyzing = true;
            vec![Effect::RunStart { prompt }]
        }

        Event::Started {
            current,
            improved,
            analysis,
        } => {
            if state.phase != Phase::Generating {
                return Vec::new();
            }
            state.current_version = Some(current);
            state.publish_improved(improved, analysis);
            state.settle_ready();
            Vec::new()
        }

        Event::Regenerate => {
            if state.phase != Phase::Ready {
                return Vec::new();
            }
            let Some(current) = &state.current_version else {
                return Vec::new();
            };
            let effect = Effect::RunRegenerate {
                prompt: current.prompt.clone(),
                feedback: state.feedback.clone(),
                thumbs_up: current.thumbs_up,
            };
            state.phase = Phase::Improving;
            state.is_improving = true;
            state.is_analyzing = true;
            vec![effect]
        }

        Event::Regenerated { improved, analysis } | Event::Improved { improved, analysis } => {
            if state.phase != Phase::Improving {
                return Vec::new();
            }
            state.publish_improved(improved, analysis);
            state.settle_ready();
            Vec::new()
        }

        Event::Accept => accept(state),

        Event::Refined {
            promoted_prompt,
            improved,
            analysis,
        } => {
            if state.phase != Phase::Improving {
                return Vec::new();
            }
            // A refine only completes an Accept that had both slots filled.
            if state.current_version.is_none() || state.improved_version.is_none() {
                state.settle_ready();
                return Vec::new();
            }
            let (Some(current), Some(previous_improved)) =
                (state.current_version.take(), state.improved_version.take())
            else {
                return Vec::new();
            };
            state.history.insert(0, current);
            state.current_version = Some(previous_improved.with_prompt(promoted_prompt));
            state.publish_improved(improved, analysis);
            state.settle_ready();
            Vec::new()
        }

        Event::Reject { confirmed } => {
            if state.phase != Phase::Ready {
                return Vec::new();
            }
            if state.improved_version.is_none() {
                return Vec::new();
            }
            if state.is_prompt_edited && !confirmed {
                return vec![Effect::ConfirmDiscardEdits];
            }
            if let Some(rejected) = state.improved_version.take() {
                state.history.insert(0, rejected);
            }
            state.changes_analysis.clear();
            state.feedback.clear();
            state.clear_edit_scratch();
            Vec::new()
        }

        Event::EditImprovedPrompt { text } => {
            if state.is_busy() {
                return Vec::new();
            }
            let Some(improved) = &state.improved_version else {
                return Vec::new();
            };
            state.is_prompt_edited = text != improved.prompt;
            state.edited_improved_prompt = text;
            Vec::new()
        }

        Event::SetFeedback { text } => {
            if !state.is_busy() {
                state.feedback = text;
            }
            Vec::new()
        }

        Event::RateCurrent { thumbs_up } => {
            if !state.is_busy() {
                if let Some(current) = state.current_version.as_mut() {
                    current.thumbs_up = thumbs_up;
                }
            }
            Vec::new()
        }

        Event::Reset => {
            *state = SessionState::default();
            Vec::new()
        }

        Event::Failed { message } => {
            match state.phase {
                Phase::Generating => {
                    // Nothing was published; the session never started.
                    *state = SessionState {
                        history: std::mem::take(&mut state.history),
                        feedback: std::mem::take(&mut state.feedback),
                        ..SessionState::default()
                    };
                }
                Phase::Improving => state.settle_ready(),
                Phase::Idle | Phase::Ready => {}
            }
            vec![Effect::Notify(Notice::Alert(message))]
        }
    }
}

fn accept(state: &mut SessionState) -> Vec<Effect> {
    if state.phase != Phase::Ready {
        return Vec::new();
    }
    let Some(current) = &state.current_version else {
        return Vec::new();
    };
    // Feedback is consumed by this accept whichever branch runs.
    let feedback = std::mem::take(&mut state.feedback);

    let Some(improved) = &state.improved_version else {
        let effect = Effect::RunImprove {
            prompt: current.prompt.clone(),
            feedback,
        };
        state.phase = Phase::Improving;
        state.is_improving = true;
        state.is_analyzing = true;
        return vec![effect];
    };

    if state.is_prompt_edited || !feedback.trim().is_empty() {
        let prompt = if state.is_prompt_edited {
            state.edited_improved_prompt.clone()
        } else {
            improved.prompt.clone()
        };
        state.phase = Phase::Improving;
        state.is_improving = true;
        state.is_analyzing = true;
        return vec![Effect::RunRefine { prompt, feedback }];
    }

    // Plain accept: promote without any network call.
    if let (Some(old_current), Some(accepted)) =
        (state.current_version.take(), state.improved_version.take())
    {
        state.history.insert(0, old_current);
        state.current_version = Some(accepted);
    }
    state.changes_analysis.clear();
    state.clear_edit_scratch();
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use improver_core::VersionRole;

    fn version(role: VersionRole, prompt: &str) -> Version {
        Version::create(role, prompt, format!("response to {prompt}"))
    }

    fn ready_state() -> SessionState {
        let (state, _) = reduce(
            &SessionState::default(),
            Event::Start {
                prompt: "write a poem".into(),
            },
        );
        let (state, _) = reduce(
            &state,
            Event::Started {
                current: version(VersionRole::Current, "write a poem"),
                improved: version(VersionRole::Improved, "Write a vivid poem."),
                analysis: "- Added imagery".into(),
            },
        );
        state
    }

    #[test]
    fn test_start_with_blank_prompt_only_signals_validation() {
        let idle = SessionState::default();
        let (next, effects) = reduce(&idle, Event::Start { prompt: "  ".into() });
        assert_eq!(next, idle);
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::Validation(EMPTY_PROMPT_MESSAGE.into()))]
        );
    }

    #[test]
    fn test_start_enters_generating_and_requests_pipeline() {
        let (next, effects) = reduce(
            &SessionState::default(),
            Event::Start {
                prompt: "write a poem".into(),
            },
        );
        assert_eq!(next.phase, Phase::Generating);
        assert!(next.is_generating);
        assert!(next.current_version.is_none());
        assert_eq!(
            effects,
            vec![Effect::RunStart {
                prompt: "write a poem".into()
            }]
        );
    }

    #[test]
    fn test_started_publishes_everything_at_once() {
        let state = ready_state();
        assert_eq!(state.phase, Phase::Ready);
        assert!(!state.is_generating && !state.is_analyzing);
        assert_eq!(state.current_version.as_ref().unwrap().prompt, "write a poem");
        assert_eq!(state.improved_version.as_ref().unwrap().prompt, "Write a vivid poem.");
        assert_eq!(state.changes_analysis, "- Added imagery");
        assert_eq!(state.edited_improved_prompt, "Write a vivid poem.");
        assert!(!state.is_prompt_edited);
    }

    #[test]
    fn test_failed_start_returns_to_idle_with_alert() {
        let (generating, _) = reduce(
            &SessionState::default(),
            Event::Start { prompt: "p".into() },
        );
        let (next, effects) = reduce(
            &generating,
            Event::Failed {
                message: "Failed to improve prompt".into(),
            },
        );
        assert_eq!(next, SessionState::default());
        assert_eq!(
            effects,
            vec![Effect::Notify(Notice::Alert("Failed to improve prompt".into()))]
        );
    }

    #[test]
    fn test_edit_flag_tracks_difference_from_improved_prompt() {
        let state = ready_state();
        let (edited, _) = reduce(
            &state,
            Event::EditImprovedPrompt {
                text: "Write a vivid haiku.".into(),
            },
        );
        assert!(edited.is_prompt_edited);
        assert_eq!(edited.improved_version.as_ref().unwrap().prompt, "Write a vivid poem.");

        let (reverted, _) = reduce(
            &edited,
            Event::EditImprovedPrompt {
                text: "Write a vivid poem.".into(),
            },
        );
        assert!(!reverted.is_prompt_edited);
    }

    #[test]
    fn test_plain_accept_promotes_without_effects() {
        let state = ready_state();
        let old_current = state.current_version.clone().unwrap();
        let improved = state.improved_version.clone().unwrap();

        let (next, effects) = reduce(&state, Event::Accept);
        assert!(effects.is_empty());
        assert_eq!(next.history, vec![old_current]);
        assert_eq!(next.current_version, Some(improved));
        assert!(next.improved_version.is_none());
        assert_eq!(next.phase, Phase::Ready);
    }

    #[test]
    fn test_accept_with_feedback_requests_refine_and_clears_feedback() {
        let state = ready_state();
        let (state, _) = reduce(
            &state,
            Event::SetFeedback {
                text: "shorter".into(),
            },
        );
        let (next, effects) = reduce(&state, Event::Accept);
        assert_eq!(next.phase, Phase::Improving);
        assert!(next.feedback.is_empty());
        assert_eq!(
            effects,
            vec![Effect::RunRefine {
                prompt: "Write a vivid poem.".into(),
                feedback: "shorter".into()
            }]
        );
    }

    #[test]
    fn test_accept_with_edits_refines_the_edited_text() {
        let state = ready_state();
        let (state, _) = reduce(
            &state,
            Event::EditImprovedPrompt {
                text: "My own take".into(),
            },
        );
        let (_, effects) = reduce(&state, Event::Accept);
        assert_eq!(
            effects,
            vec![Effect::RunRefine {
                prompt: "My own take".into(),
                feedback: String::new()
            }]
        );
    }

    #[test]
    fn test_refined_promotes_edited_prompt_and_pushes_old_current() {
        let state = ready_state();
        let old_current = state.current_version.clone().unwrap();
        let old_improved = state.improved_version.clone().unwrap();
        let (state, _) = reduce(
            &state,
            Event::EditImprovedPrompt {
                text: "My own take".into(),
            },
        );
        let (state, _) = reduce(&state, Event::Accept);
        let fresh = version(VersionRole::Improved, "Refined take");
        let (next, _) = reduce(
            &state,
            Event::Refined {
                promoted_prompt: "My own take".into(),
                improved: fresh.clone(),
                analysis: String::new(),
            },
        );

        assert_eq!(next.history, vec![old_current]);
        let current = next.current_version.unwrap();
        assert_eq!(current.id, old_improved.id);
        assert_eq!(current.prompt, "My own take");
        assert_eq!(next.improved_version, Some(fresh));
        assert_eq!(next.edited_improved_prompt, "Refined take");
        assert!(!next.is_prompt_edited);
        assert_eq!(next.phase, Phase::Ready);
    }

    #[test]
    fn test_refined_without_improved_version_keeps_current() {
        let state = ready_state();
        let current = state.current_version.clone().unwrap();
        let (state, _) = reduce(&state, Event::Reject { confirmed: false });
        let (improving, _) = reduce(&state, Event::Accept);
        assert_eq!(improving.phase, Phase::Improving);

        let (next, effects) = reduce(
            &improving,
            Event::Refined {
                promoted_prompt: "stray".into(),
                improved: version(VersionRole::Improved, "stray result"),
                analysis: String::new(),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(next.current_version, Some(current));
        assert!(next.improved_version.is_none());
        assert_eq!(next.history, improving.history);
        assert_eq!(next.phase, Phase::Ready);
        assert!(!next.is_improving && !next.is_analyzing);
    }

    #[test]
    fn test_refine_and_regenerate_mark_analysis_in_flight() {
        let state = ready_state();
        let (regenerating, _) = reduce(&state, Event::Regenerate);
        assert!(regenerating.is_improving && regenerating.is_analyzing);

        let (state, _) = reduce(&state, Event::SetFeedback { text: "tighter".into() });
        let (refining, effects) = reduce(&state, Event::Accept);
        assert!(matches!(effects.as_slice(), [Effect::RunRefine { .. }]));
        assert!(refining.is_improving && refining.is_analyzing);
    }

    #[test]
    fn test_accept_without_improved_version_requests_improve() {
        let state = ready_state();
        let (state, _) = reduce(&state, Event::Reject { confirmed: false });
        assert!(state.improved_version.is_none());

        let (next, effects) = reduce(&state, Event::Accept);
        assert_eq!(next.phase, Phase::Improving);
        assert_eq!(
            effects,
            vec![Effect::RunImprove {
                prompt: "write a poem".into(),
                feedback: String::new()
            }]
        );
    }

    #[test]
    fn test_reject_moves_improved_to_history_head() {
        let state = ready_state();
        let improved = state.improved_version.clone().unwrap();
        let (state, _) = reduce(&state, Event::SetFeedback { text: "x".into() });

        let (next, effects) = reduce(&state, Event::Reject { confirmed: false });
        assert!(effects.is_empty());
        assert_eq!(next.history, vec![improved]);
        assert!(next.improved_version.is_none());
        assert!(next.feedback.is_empty());
        assert!(next.edited_improved_prompt.is_empty());
    }

    #[test]
    fn test_reject_with_edits_asks_for_confirmation_first() {
        let state = ready_state();
        let (state, _) = reduce(
            &state,
            Event::EditImprovedPrompt {
                text: "changed".into(),
            },
        );

        let (unchanged, effects) = reduce(&state, Event::Reject { confirmed: false });
        assert_eq!(unchanged, state);
        assert_eq!(effects, vec![Effect::ConfirmDiscardEdits]);

        let (rejected, _) = reduce(&state, Event::Reject { confirmed: true });
        assert_eq!(rejected.history.len(), 1);
        assert!(!rejected.is_prompt_edited);
    }

    #[test]
    fn test_regenerate_forwards_feedback_and_rating() {
        let state = ready_state();
        let (state, _) = reduce(
            &state,
            Event::RateCurrent {
                thumbs_up: Some(false),
            },
        );
        let (state, _) = reduce(&state, Event::SetFeedback { text: "less formal".into() });
        let (next, effects) = reduce(&state, Event::Regenerate);

        assert_eq!(next.phase, Phase::Improving);
        assert!(next.improved_version.is_some(), "previous pair stays visible");
        assert_eq!(
            effects,
            vec![Effect::RunRegenerate {
                prompt: "write a poem".into(),
                feedback: "less formal".into(),
                thumbs_up: Some(false)
            }]
        );
    }

    #[test]
    fn test_failed_improvement_keeps_prior_versions() {
        let state = ready_state();
        let (improving, _) = reduce(&state, Event::Regenerate);
        let (next, effects) = reduce(
            &improving,
            Event::Failed {
                message: "boom".into(),
            },
        );
        assert_eq!(next.phase, Phase::Ready);
        assert!(!next.is_improving);
        assert_eq!(next.current_version, state.current_version);
        assert_eq!(next.improved_version, state.improved_version);
        assert_eq!(effects, vec![Effect::Notify(Notice::Alert("boom".into()))]);
    }

    #[test]
    fn test_user_actions_are_ignored_while_busy() {
        let (generating, _) = reduce(
            &SessionState::default(),
            Event::Start { prompt: "p".into() },
        );
        for event in [
            Event::Start { prompt: "again".into() },
            Event::Accept,
            Event::Regenerate,
            Event::Reject { confirmed: true },
        ] {
            let (next, effects) = reduce(&generating, event);
            assert_eq!(next, generating);
            assert!(effects.is_empty());
        }
    }

    #[test]
    fn test_reset_discards_everything() {
        let state = ready_state();
        let (state, _) = reduce(&state, Event::Accept);
        assert!(!state.history.is_empty());
        let (next, _) = reduce(&state, Event::Reset);
        assert_eq!(next, SessionState::default());
    }
}
