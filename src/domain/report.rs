//! Report document model and composition.
//!
//! A report is a paginated set of absolutely positioned text spans on an A4
//! page. Composition is a pure function of the intake record, the prediction
//! outcome, and an injected timestamp: identical arguments yield identical
//! documents. The concrete rendering backend lives behind the `ReportEngine`
//! port so the document model stays engine-agnostic.

use chrono::{DateTime, Local};

use super::intake::IntakeRecord;
use super::prediction::PredictionOutcome;

/// A4 page width in millimeters.
pub const PAGE_WIDTH_MM: f64 = 210.0;

/// A4 page height in millimeters.
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Fixed artifact base name; the engine supplies the extension.
pub const REPORT_BASENAME: &str = "heart-disease-prediction";

const MARGIN_LEFT_MM: f64 = 20.0;
const MARGIN_BOTTOM_MM: f64 = 20.0;

const BLACK: (u8, u8, u8) = (0, 0, 0);
const MUTED: (u8, u8, u8) = (100, 100, 100);

/// Horizontal alignment of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// A positioned piece of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// Horizontal position in mm (anchor depends on alignment)
    pub x: f64,
    /// Vertical position in mm from the top of the page
    pub y: f64,
    /// Font size in points
    pub font_size: u8,
    /// RGB text color
    pub color: (u8, u8, u8),
    pub align: Align,
    pub text: String,
}

/// One page of positioned spans.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPage {
    pub spans: Vec<TextSpan>,
}

/// A complete, paginated report document.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub pages: Vec<ReportPage>,
}

impl ReportDocument {
    /// Compose the risk assessment report.
    ///
    /// Fixed section order: centered title, generation date/time, patient
    /// information, clinical measurements, lifestyle factors, prediction
    /// result (risk label colored by status, probability with one decimal),
    /// and the disclaimer footer.
    ///
    /// Pure and repeatable: the timestamp is a parameter, not read inside.
    #[must_use]
    pub fn compose(
        record: &IntakeRecord,
        outcome: &PredictionOutcome,
        generated_at: DateTime<Local>,
    ) -> Self {
        let mut doc = Composer::new();
        let x = MARGIN_LEFT_MM;

        doc.centered(20.0, 20, BLACK, "Heart Disease Prediction Report");

        doc.text(x, 40.0, 12, BLACK, format!("Date: {}", generated_at.format("%Y-%m-%d")));
        doc.text(x, 48.0, 12, BLACK, format!("Time: {}", generated_at.format("%H:%M:%S")));

        doc.text(x, 65.0, 14, BLACK, "Patient Information");
        doc.text(x, 75.0, 11, BLACK, format!("Age: {} years", record.age));
        doc.text(x, 82.0, 11, BLACK, format!("Gender: {}", record.gender));
        doc.text(x, 89.0, 11, BLACK, format!("Height: {} cm", record.height));
        doc.text(x, 96.0, 11, BLACK, format!("Weight: {} kg", record.weight));
        doc.text(x, 103.0, 11, BLACK, format!("BMI: {}", outcome.bmi));

        doc.text(x, 120.0, 14, BLACK, "Clinical Measurements");
        doc.text(x, 130.0, 11, BLACK, format!("Systolic BP: {} mm Hg", record.ap_hi));
        doc.text(x, 137.0, 11, BLACK, format!("Diastolic BP: {} mm Hg", record.ap_lo));
        doc.text(x, 144.0, 11, BLACK, format!("Cholesterol: {}", record.cholesterol));
        doc.text(x, 151.0, 11, BLACK, format!("Glucose: {}", record.gluc));

        doc.text(x, 168.0, 14, BLACK, "Lifestyle Factors");
        doc.text(x, 178.0, 11, BLACK, format!("Smoking: {}", record.smoke));
        doc.text(x, 185.0, 11, BLACK, format!("Alcohol: {}", record.alco));
        doc.text(x, 192.0, 11, BLACK, format!("Physical Activity: {}", record.active));

        let status = outcome.risk_status();
        doc.text(x, 215.0, 16, status.color(), "Prediction Result");
        doc.text(
            x,
            225.0,
            12,
            status.color(),
            format!("Risk Status: {}", status.label()),
        );
        doc.text(
            x,
            232.0,
            12,
            BLACK,
            format!("Risk Probability: {}", outcome.probability_percent()),
        );

        doc.text(
            x,
            255.0,
            10,
            MUTED,
            "Disclaimer: This prediction is for informational purposes only.",
        );
        doc.text(
            x,
            262.0,
            10,
            MUTED,
            "Please consult a healthcare professional for medical advice.",
        );

        doc.finish()
    }
}

/// Builder that starts a new page whenever a span would land below the
/// bottom margin. The current layout fits one page; the overflow handling
/// keeps the model honest if sections grow.
struct Composer {
    pages: Vec<ReportPage>,
    /// Vertical offset subtracted from span positions on continuation pages.
    page_base: f64,
}

impl Composer {
    fn new() -> Self {
        Self {
            pages: vec![ReportPage::default()],
            page_base: 0.0,
        }
    }

    fn push(&mut self, x: f64, y: f64, font_size: u8, color: (u8, u8, u8), align: Align, text: String) {
        let mut local_y = y - self.page_base;
        if local_y > PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM {
            self.pages.push(ReportPage::default());
            self.page_base = y - MARGIN_BOTTOM_MM;
            local_y = MARGIN_BOTTOM_MM;
        }

        // pages is never empty
        if let Some(page) = self.pages.last_mut() {
            page.spans.push(TextSpan {
                x,
                y: local_y,
                font_size,
                color,
                align,
                text,
            });
        }
    }

    fn text(&mut self, x: f64, y: f64, font_size: u8, color: (u8, u8, u8), text: impl Into<String>) {
        self.push(x, y, font_size, color, Align::Left, text.into());
    }

    fn centered(&mut self, y: f64, font_size: u8, color: (u8, u8, u8), text: impl Into<String>) {
        self.push(PAGE_WIDTH_MM / 2.0, y, font_size, color, Align::Center, text.into());
    }

    fn finish(self) -> ReportDocument {
        ReportDocument { pages: self.pages }
    }
}
