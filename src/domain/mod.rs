//! Domain layer: Core business types and logic.
//!
//! This module contains pure types with no I/O dependencies. Everything here
//! is deterministic and directly unit-testable.

mod intake;
mod prediction;
mod report;
mod submission;

pub use intake::{IntakeRecord, ValidationError, FIELD_KEYS};
pub use prediction::{PredictionOutcome, PredictionRequest, RiskStatus};
pub use report::{Align, ReportDocument, ReportPage, TextSpan, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, REPORT_BASENAME};
pub use submission::SubmissionState;
