//! Main TUI application state machine.
//!
//! Handles:
//! - Screen navigation between intake form and results
//! - Input event handling
//! - Async submission via background worker
//! - Report generation and saving

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use crate::adapters::{HttpPredictor, TextReportEngine};
use crate::application::{ReportService, SubmissionService};
use crate::config::ApiConfig;
use crate::domain::{IntakeRecord, PredictionOutcome, SubmissionState};
use crate::ports::Predictor;

use super::ui::{
    form::{render_form, IntakeFormState},
    render_disclaimer,
    result::render_result,
};
use super::worker::{SubmitWorker, SubmitWorkerHandle};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intake,
    Result,
}

/// Main application state
pub struct App<P>
where
    P: Predictor + Send + Sync + 'static,
{
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Submission service (shared with the background worker)
    submission_service: Arc<SubmissionService<P>>,

    /// Report service
    report_service: ReportService<TextReportEngine>,

    /// Intake form state
    form_state: IntakeFormState,

    /// Single source of truth for the submission lifecycle
    submission: SubmissionState,

    /// Snapshot of the inputs behind the current submission (report input)
    last_record: Option<IntakeRecord>,

    /// Pending submission worker (if running); doubles as the re-entrancy guard
    pending_worker: Option<SubmitWorkerHandle>,

    /// Transient feedback, e.g. where the report was saved
    report_notice: Option<String>,

    /// Frame counter driving the pending spinner
    tick: usize,
}

impl App<HttpPredictor> {
    /// Create a new application instance using the environment-configured
    /// prediction endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        let config = ApiConfig::from_env();
        tracing::info!(base_url = %config.base_url, "Using prediction service");

        let predictor = Arc::new(HttpPredictor::new(&config)?);
        let submission_service = Arc::new(SubmissionService::new(predictor));
        let report_service = ReportService::new(TextReportEngine::default());

        Ok(Self::with_dependencies(submission_service, report_service))
    }
}

impl<P> App<P>
where
    P: Predictor + Send + Sync + 'static,
{
    /// Create application with injected dependencies (Composition Root pattern).
    ///
    /// This allows `main.rs` or tests to construct the adapters externally.
    pub fn with_dependencies(
        submission_service: Arc<SubmissionService<P>>,
        report_service: ReportService<TextReportEngine>,
    ) -> Self {
        Self {
            screen: Screen::Intake,
            should_quit: false,
            submission_service,
            report_service,
            form_state: IntakeFormState::default(),
            submission: SubmissionState::Idle,
            last_record: None,
            pending_worker: None,
            report_notice: None,
            tick: 0,
        }
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            // Poll the pending worker for its terminal state
            self.poll_worker();
            self.tick = self.tick.wrapping_add(1);

            // Draw current screen
            terminal.draw(|f| {
                let area = f.area();
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(0), Constraint::Length(3)])
                    .split(area);

                let content_area = chunks[0];
                let disclaimer_area = chunks[1];

                match self.screen {
                    Screen::Intake => render_form(f, content_area, &self.form_state),
                    Screen::Result => render_result(
                        f,
                        content_area,
                        &self.submission,
                        self.report_notice.as_deref(),
                        self.tick / 2,
                    ),
                }

                render_disclaimer(f, disclaimer_area);
            })?;

            // Handle input (short poll to stay responsive)
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Poll the background worker; a settled worker produces exactly one
    /// state transition and releases the re-entrancy guard.
    fn poll_worker(&mut self) {
        let Some(worker) = &self.pending_worker else {
            return;
        };

        if let Some(state) = worker.try_recv() {
            // Mirror a failure onto the form so editing a field clears it.
            if let SubmissionState::Failed(message) = &state {
                self.form_state.error_message = Some(message.clone());
            }
            self.submission = state;
            self.pending_worker = None;
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global quit handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Intake => self.handle_intake_key(key),
            Screen::Result => self.handle_result_key(key),
        }
    }

    fn handle_intake_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Up => {
                self.form_state.prev_field();
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
            }
            KeyCode::Left => {
                self.form_state.cycle_prev();
            }
            KeyCode::Right | KeyCode::Char(' ') => {
                self.form_state.cycle_next();
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                self.form_state.load_sample_data();
            }
            KeyCode::Char(c) => {
                self.form_state.input_char(c);
            }
            KeyCode::Backspace => {
                self.form_state.delete_char();
            }
            KeyCode::Delete => {
                self.form_state.clear_field();
            }
            KeyCode::Enter => {
                self.submit_form();
            }
            _ => {}
        }
    }

    fn handle_result_key(&mut self, key: KeyCode) {
        // The submit trigger and navigation stay inert while a request is
        // in flight; only the global quit works.
        if self.submission.is_pending() {
            return;
        }

        match &self.submission {
            SubmissionState::Succeeded(_) => match key {
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.save_report();
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    self.form_state = IntakeFormState::default();
                    self.submission = SubmissionState::Idle;
                    self.last_record = None;
                    self.report_notice = None;
                    self.screen = Screen::Intake;
                }
                KeyCode::Esc => {
                    // Back to the form with inputs intact; the successful
                    // result stays visible until the next submit.
                    self.screen = Screen::Intake;
                }
                _ => {}
            },
            SubmissionState::Failed(_) => match key {
                KeyCode::Enter | KeyCode::Esc => {
                    self.screen = Screen::Intake;
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// Start a submission for the current form contents.
    ///
    /// Validation failures surface on the form without touching the network;
    /// a second invocation while a worker is pending is ignored.
    fn submit_form(&mut self) {
        if self.pending_worker.is_some() {
            return;
        }

        let record = self.form_state.to_record();
        if let Err(violation) = record.validate() {
            self.form_state.error_message = Some(violation.to_string());
            return;
        }

        self.form_state.error_message = None;
        self.report_notice = None;
        self.submission = SubmissionState::Pending;
        self.last_record = Some(record.clone());
        self.screen = Screen::Result;

        self.pending_worker = Some(SubmitWorker::spawn(
            self.submission_service.clone(),
            record,
        ));
    }

    fn save_report(&mut self) {
        let (Some(record), Some(outcome)) =
            (self.last_record.clone(), self.submission.outcome().copied())
        else {
            // Guarded by the Succeeded match arm; nothing to do otherwise.
            return;
        };

        match self.write_report(&record, &outcome) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Report saved");
                self.report_notice = Some(format!("Report saved to {}", path.display()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save report");
                self.report_notice = Some(format!("Failed to save report: {e}"));
            }
        }
    }

    fn write_report(
        &self,
        record: &IntakeRecord,
        outcome: &PredictionOutcome,
    ) -> crate::Result<PathBuf> {
        let artifact = self.report_service.generate(record, outcome)?;

        let dir = std::env::var("CARDIOSCOPE_REPORT_DIR").unwrap_or_else(|_| ".".to_string());
        let path = std::path::Path::new(&dir).join(&artifact.file_name);
        std::fs::write(&path, &artifact.bytes)?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PredictionOutcome, PredictionRequest};
    use crate::ports::PredictError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Predictor that blocks until released, counting calls.
    struct GatedPredictor {
        gate: Mutex<Receiver<()>>,
        calls: AtomicUsize,
    }

    impl GatedPredictor {
        fn new() -> (Arc<Self>, Sender<()>) {
            let (tx, rx) = mpsc::channel();
            (
                Arc::new(Self {
                    gate: Mutex::new(rx),
                    calls: AtomicUsize::new(0),
                }),
                tx,
            )
        }
    }

    impl Predictor for GatedPredictor {
        fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionOutcome, PredictError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let gate = self.gate.lock().expect("gate lock");
            let _ = gate.recv_timeout(Duration::from_secs(5));
            Ok(PredictionOutcome {
                heart_risk: 1,
                risk_probability: 0.83,
                bmi: 24.5,
            })
        }
    }

    fn app_with(predictor: Arc<GatedPredictor>) -> App<GatedPredictor> {
        App::with_dependencies(
            Arc::new(SubmissionService::new(predictor)),
            ReportService::new(TextReportEngine::default()),
        )
    }

    fn settle(app: &mut App<GatedPredictor>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.pending_worker.is_some() {
            app.poll_worker();
            assert!(Instant::now() < deadline, "submission never settled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn resubmit_while_pending_is_ignored() {
        let (predictor, release) = GatedPredictor::new();
        let mut app = app_with(predictor.clone());
        app.form_state.load_sample_data();

        app.submit_form();
        assert!(app.submission.is_pending());
        assert_eq!(app.screen, Screen::Result);

        // Second submit while the first is in flight must not spawn a
        // second request.
        app.submit_form();
        release.send(()).expect("release worker");
        settle(&mut app);

        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
        assert!(matches!(app.submission, SubmissionState::Succeeded(_)));
    }

    #[test]
    fn invalid_form_fails_without_spawning_a_worker() {
        let (predictor, _release) = GatedPredictor::new();
        let mut app = app_with(predictor.clone());
        // Form left empty: presence rule names the first field.

        app.submit_form();

        assert!(app.pending_worker.is_none());
        assert_eq!(app.screen, Screen::Intake);
        assert_eq!(
            app.form_state.error_message.as_deref(),
            Some("Please fill in all fields. Missing: age")
        );
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn settled_failure_mirrors_onto_the_form() {
        struct FailingPredictor;
        impl Predictor for FailingPredictor {
            fn predict(
                &self,
                _request: &PredictionRequest,
            ) -> Result<PredictionOutcome, PredictError> {
                Err(PredictError::Service("model unavailable".to_string()))
            }
        }

        let mut app = App::with_dependencies(
            Arc::new(SubmissionService::new(Arc::new(FailingPredictor))),
            ReportService::new(TextReportEngine::default()),
        );
        app.form_state.load_sample_data();
        app.submit_form();

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.pending_worker.is_some() {
            app.poll_worker();
            assert!(Instant::now() < deadline, "submission never settled");
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(
            app.submission,
            SubmissionState::Failed("model unavailable".to_string())
        );
        assert_eq!(
            app.form_state.error_message.as_deref(),
            Some("model unavailable")
        );

        // Editing a field clears the mirrored error.
        app.form_state.input_char('1');
        assert_eq!(app.form_state.error_message, None);
    }

    #[test]
    fn report_is_written_for_a_successful_outcome() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::env::set_var("CARDIOSCOPE_REPORT_DIR", dir.path());

        let (predictor, release) = GatedPredictor::new();
        let mut app = app_with(predictor);
        app.form_state.load_sample_data();
        app.submit_form();
        release.send(()).expect("release worker");
        settle(&mut app);

        app.handle_result_key(KeyCode::Char('d'));

        let path = dir.path().join("heart-disease-prediction.txt");
        let text = std::fs::read_to_string(&path).expect("report file written");
        assert!(text.contains("Risk Status: HIGH RISK"));
        assert!(text.contains("Risk Probability: 83.0%"));
        assert!(app
            .report_notice
            .as_deref()
            .expect("notice set")
            .starts_with("Report saved to"));

        std::env::remove_var("CARDIOSCOPE_REPORT_DIR");
    }
}
