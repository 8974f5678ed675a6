//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod report;
mod submission;

pub use report::{ReportArtifact, ReportService};
pub use submission::SubmissionService;
