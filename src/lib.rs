//! # Cardioscope
//!
//! Terminal client for cardiovascular risk screening.
//!
//! This crate provides:
//! - A guided intake form for eleven physiological/lifestyle inputs
//! - Validation and submission to a remote prediction service
//! - Deterministic report composition for a printable risk assessment
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (intake record, prediction outcome, report document)
//! - `ports`: Trait definitions for external operations
//! - `adapters`: Concrete implementations (HTTP prediction client, text report engine)
//! - `application`: Use cases orchestrating domain and ports
//! - `tui`: Terminal user interface

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod tui;

pub use domain::{IntakeRecord, PredictionOutcome, RiskStatus, SubmissionState};

/// Result type for Cardioscope operations
pub type Result<T> = std::result::Result<T, CardioscopeError>;

/// Main error type for Cardioscope.
///
/// Validation and prediction failures never reach this type: the submission
/// pipeline folds them into `SubmissionState::Failed` with a user-facing
/// message. Only report persistence flows through `crate::Result`.
#[derive(Debug, thiserror::Error)]
pub enum CardioscopeError {
    #[error("Report generation failed: {0}")]
    Report(#[from] ports::ReportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
