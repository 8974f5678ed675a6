//! Adapters layer: Concrete implementations of ports.
//!
//! These modules contain the actual integration with external systems:
//! - `http`: blocking HTTP client for the prediction service
//! - `text_report`: plain-text layout engine for report documents

pub mod http;
pub mod text_report;

pub use http::HttpPredictor;
pub use text_report::TextReportEngine;
