//! Version orchestrator: the session state machine behind every front end.

mod confirmation;
mod controller;
mod state;
mod transition;

pub use confirmation::{AutoConfirm, Confirmation};
pub use controller::{DISCARD_EDITS_MESSAGE, Orchestrator, PROGRESS_TARGET};
pub use state::{Phase, SessionState};
pub use transition::{EMPTY_PROMPT_MESSAGE, Effect, Event, Notice, reduce};
