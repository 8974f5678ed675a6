//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (prediction service,
//! report rendering backend).

mod predictor;
mod report;

pub use predictor::{PredictError, Predictor, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};
pub use report::{ReportEngine, ReportError};
