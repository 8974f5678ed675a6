//! Plain-text report engine.
//!
//! Maps the millimeter-positioned document model onto a fixed-width
//! character grid: left-aligned spans are indented proportionally to their
//! x position, centered spans are centered in the line width, and vertical
//! gaps between spans become blank lines. Colors are a document property
//! and have no plain-text representation.

use crate::domain::{Align, ReportDocument, PAGE_WIDTH_MM};
use crate::ports::{ReportEngine, ReportError};

/// Vertical gap (mm) that produces one extra blank line between spans.
const LINE_STEP_MM: f64 = 8.0;

/// Renders report documents as plain UTF-8 text.
pub struct TextReportEngine {
    width: usize,
}

impl Default for TextReportEngine {
    fn default() -> Self {
        Self { width: 80 }
    }
}

impl TextReportEngine {
    /// Create an engine with a custom line width in characters.
    #[must_use]
    pub fn with_width(width: usize) -> Self {
        Self { width }
    }

    fn line_for(&self, x: f64, align: Align, text: &str) -> String {
        match align {
            Align::Center => {
                let pad = self.width.saturating_sub(text.chars().count()) / 2;
                format!("{}{}", " ".repeat(pad), text)
            }
            Align::Left => {
                let indent =
                    ((x / PAGE_WIDTH_MM) * self.width as f64).round().max(0.0) as usize;
                format!("{}{}", " ".repeat(indent.min(self.width)), text)
            }
        }
    }
}

impl ReportEngine for TextReportEngine {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut out = String::new();

        for (page_index, page) in document.pages.iter().enumerate() {
            if page_index > 0 {
                out.push('\x0c'); // form feed between pages
            }

            // Spans carry absolute positions; emit them top-to-bottom.
            let mut spans: Vec<_> = page.spans.iter().collect();
            spans.sort_by(|a, b| {
                a.y.partial_cmp(&b.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
            });

            let mut prev_y: Option<f64> = None;
            for span in spans {
                if let Some(prev) = prev_y {
                    let gap = span.y - prev;
                    if gap > LINE_STEP_MM {
                        let blanks = (gap / LINE_STEP_MM).floor() as usize;
                        for _ in 0..blanks {
                            out.push('\n');
                        }
                    }
                }
                out.push_str(&self.line_for(span.x, span.align, &span.text));
                out.push('\n');
                prev_y = Some(span.y);
            }
        }

        Ok(out.into_bytes())
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }
}
