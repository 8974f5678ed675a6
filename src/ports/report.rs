//! Report engine port: Trait for rendering a composed document.
//!
//! The document model is engine-agnostic; implementations turn it into a
//! byte artifact (plain text today, a PDF backend would slot in here).

use crate::domain::ReportDocument;

/// Rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Report rendering failed: {0}")]
    Render(String),
}

/// Trait for turning a `ReportDocument` into a downloadable artifact.
///
/// Engines do not manage storage; the caller persists the returned bytes.
pub trait ReportEngine: Send + Sync {
    /// Render the document to its final byte representation.
    ///
    /// # Errors
    /// Returns `ReportError::Render` if the backend fails.
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;

    /// File extension of the produced artifact (without the dot).
    fn file_extension(&self) -> &'static str;
}
