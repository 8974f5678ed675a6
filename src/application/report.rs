//! Report service: Composes and renders the downloadable risk report.
//!
//! Composition is pure; only the embedded generation timestamp varies
//! between invocations with identical inputs. The service hands the caller
//! a named byte artifact and never touches storage itself.

use chrono::Local;

use crate::domain::{IntakeRecord, PredictionOutcome, ReportDocument, REPORT_BASENAME};
use crate::ports::{ReportEngine, ReportError};

/// A rendered report ready to be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifact {
    /// Deterministic file name (fixed base name plus engine extension)
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Service producing report artifacts through a swappable engine.
pub struct ReportService<R>
where
    R: ReportEngine,
{
    engine: R,
}

impl<R> ReportService<R>
where
    R: ReportEngine,
{
    /// Create a report service backed by the given engine.
    pub fn new(engine: R) -> Self {
        Self { engine }
    }

    /// Compose and render the report for a completed screening.
    ///
    /// Precondition: `outcome` comes from a `Succeeded` submission. Calling
    /// this without one is a programming error in the caller, not a
    /// user-facing failure.
    ///
    /// # Errors
    /// Returns `ReportError` if the rendering backend fails.
    pub fn generate(
        &self,
        record: &IntakeRecord,
        outcome: &PredictionOutcome,
    ) -> Result<ReportArtifact, ReportError> {
        let document = ReportDocument::compose(record, outcome, Local::now());
        let bytes = self.engine.render(&document)?;

        tracing::info!(size = bytes.len(), "Report rendered");
        Ok(ReportArtifact {
            file_name: format!("{REPORT_BASENAME}.{}", self.engine.file_extension()),
            bytes,
        })
    }
}
