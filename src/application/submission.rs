//! Submission service: Orchestrates one screening submission.
//!
//! validate → call the prediction service → interpret the response, ending
//! in exactly one terminal `SubmissionState` per invocation. A validation
//! failure never reaches the network.

use std::sync::Arc;

use crate::domain::{IntakeRecord, SubmissionState};
use crate::ports::Predictor;

/// Service driving the submission lifecycle.
pub struct SubmissionService<P>
where
    P: Predictor,
{
    predictor: Arc<P>,
}

impl<P> SubmissionService<P>
where
    P: Predictor,
{
    /// Create a new submission service.
    pub fn new(predictor: Arc<P>) -> Self {
        Self { predictor }
    }

    /// Run one submission to completion.
    ///
    /// Returns the single terminal state for this attempt:
    /// - `Failed(reason)` on a validation violation (no network call)
    /// - `Failed(message)` on a transport or service error
    /// - `Succeeded(outcome)` on a 2xx response, trusted as-is
    ///
    /// Failures are never retried automatically; resubmission is always
    /// user-initiated.
    pub fn submit(&self, record: &IntakeRecord) -> SubmissionState {
        if let Err(violation) = record.validate() {
            tracing::debug!(%violation, "Submission rejected by validation");
            return SubmissionState::Failed(violation.to_string());
        }

        let request = match record.to_request() {
            Ok(request) => request,
            Err(violation) => {
                tracing::debug!(%violation, "Submission rejected during coercion");
                return SubmissionState::Failed(violation.to_string());
            }
        };

        tracing::info!("Submitting prediction request");
        match self.predictor.predict(&request) {
            Ok(outcome) => {
                tracing::info!(
                    heart_risk = outcome.heart_risk,
                    "Prediction received"
                );
                SubmissionState::Succeeded(outcome)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction failed");
                SubmissionState::Failed(e.to_string())
            }
        }
    }
}
