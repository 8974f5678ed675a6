//! Predictor port: Trait for the remote prediction service.
//!
//! This trait abstracts the HTTP client from the application logic so the
//! submission flow can be exercised against a test double.

use crate::domain::{PredictionOutcome, PredictionRequest};

/// User-facing message when the service cannot be reached at all.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Ensure the API is reachable.";

/// User-facing message when the service answers non-2xx without a usable
/// error body.
pub const GENERIC_ERROR_MESSAGE: &str = "Failed to get prediction. Please try again.";

/// Failure taxonomy for a prediction request. Both kinds are recoverable:
/// the user corrects or retries, no automatic retry is attempted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PredictError {
    /// Network unreachable, timeout, or malformed response
    #[error("{0}")]
    Transport(String),

    /// The service returned a structured error; surfaced verbatim
    #[error("{0}")]
    Service(String),
}

/// Trait for obtaining a risk prediction from the remote service.
pub trait Predictor: Send + Sync {
    /// Submit one prediction request and interpret the response.
    ///
    /// # Errors
    /// Returns `PredictError::Transport` when the service cannot be reached
    /// or replies with an unusable body, `PredictError::Service` when it
    /// returns a structured error.
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, PredictError>;
}
