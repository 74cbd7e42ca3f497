//! Confirmation prompts raised by the orchestrator.

/// Asks the user a yes/no question before a destructive action.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, message: &str) -> bool;
}

/// Answers every question with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmation for AutoConfirm {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}
