//! TUI module: Terminal User Interface using Ratatui.
//!
//! Provides a clinical-themed interface for:
//! - Guided intake of the eleven screening inputs
//! - Submission progress and prediction results
//! - Saving the downloadable risk report

mod app;
mod styles;
mod ui;
mod worker;

pub use app::App;
pub use styles::ClinicTheme;
pub use worker::{SubmitWorker, SubmitWorkerHandle};
