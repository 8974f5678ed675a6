//! Background submission worker.
//!
//! Runs the blocking prediction request off the UI thread so the interface
//! stays responsive while a submission is in flight. The main loop polls the
//! handle; at most one worker exists per form session, which is the
//! re-entrancy guard against double submits.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::application::SubmissionService;
use crate::domain::{IntakeRecord, SubmissionState};
use crate::ports::Predictor;

/// Handle to a running submission worker.
pub struct SubmitWorkerHandle {
    result_rx: Receiver<SubmissionState>,
    /// Thread handle (for joining)
    _handle: JoinHandle<()>,
}

impl SubmitWorkerHandle {
    /// Try to receive the terminal state (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmissionState> {
        self.result_rx.try_recv().ok()
    }
}

/// Worker that runs one submission in the background.
pub struct SubmitWorker;

impl SubmitWorker {
    /// Spawn a background submission.
    ///
    /// Returns a handle that yields exactly one terminal state.
    pub fn spawn<P>(
        service: Arc<SubmissionService<P>>,
        record: IntakeRecord,
    ) -> SubmitWorkerHandle
    where
        P: Predictor + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            let state = service.submit(&record);
            // Receiver may be gone if the app quit mid-flight.
            let _ = tx.send(state);
        });

        SubmitWorkerHandle {
            result_rx: rx,
            _handle: handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PredictionOutcome, PredictionRequest};
    use crate::ports::PredictError;
    use std::time::{Duration, Instant};

    struct InstantPredictor;

    impl Predictor for InstantPredictor {
        fn predict(
            &self,
            _request: &PredictionRequest,
        ) -> Result<PredictionOutcome, PredictError> {
            Ok(PredictionOutcome {
                heart_risk: 0,
                risk_probability: 0.2,
                bmi: 23.1,
            })
        }
    }

    fn wait_for(handle: &SubmitWorkerHandle) -> SubmissionState {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(state) = handle.try_recv() {
                return state;
            }
            assert!(Instant::now() < deadline, "worker never settled");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn worker_delivers_one_terminal_state() {
        let service = Arc::new(SubmissionService::new(Arc::new(InstantPredictor)));
        let record = IntakeRecord {
            age: "45".to_string(),
            gender: "Male".to_string(),
            height: "170".to_string(),
            weight: "75".to_string(),
            ap_hi: "120".to_string(),
            ap_lo: "80".to_string(),
            cholesterol: "Normal".to_string(),
            gluc: "Normal".to_string(),
            smoke: "No".to_string(),
            alco: "No".to_string(),
            active: "Yes".to_string(),
        };

        let handle = SubmitWorker::spawn(service, record);
        let state = wait_for(&handle);

        assert!(matches!(state, SubmissionState::Succeeded(_)));
        assert!(handle.try_recv().is_none(), "only one message expected");
    }
}
