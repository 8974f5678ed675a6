//! Submission lifecycle state machine.

use super::prediction::PredictionOutcome;

/// State of the current submission. Exactly one state holds at a time;
/// entering `Pending` discards any prior payload, and each submit ends in
/// exactly one terminal transition (`Succeeded` or `Failed`).
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    /// No submission attempted yet
    #[default]
    Idle,
    /// Request in flight; re-submission is rejected while here
    Pending,
    /// Service returned a prediction
    Succeeded(PredictionOutcome),
    /// Validation, transport, or service failure with a user-facing message
    Failed(String),
}

impl SubmissionState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The outcome, if the last submission succeeded.
    #[must_use]
    pub fn outcome(&self) -> Option<&PredictionOutcome> {
        match self {
            Self::Succeeded(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The failure message, if the last submission failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}
