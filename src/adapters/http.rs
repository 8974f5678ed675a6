//! HTTP adapter for the remote prediction service.
//!
//! One JSON POST to `{base}/predict` per submission. Response handling
//! follows a trust-the-service policy: a 2xx body is deserialized as the
//! outcome without further validation, a non-2xx body is probed for a
//! structured `{"error": "..."}` message to surface verbatim.

use serde::Deserialize;

use crate::config::ApiConfig;
use crate::domain::{PredictionOutcome, PredictionRequest};
use crate::ports::{PredictError, Predictor, GENERIC_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE};

/// Structured error body an unhealthy service may return.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Blocking HTTP client for the prediction service.
///
/// Carries an explicit request timeout so a hung service cannot leave a
/// submission pending indefinitely.
pub struct HttpPredictor {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpPredictor {
    /// Create a client for the configured endpoint.
    ///
    /// # Errors
    /// Returns `PredictError::Transport` if the underlying client cannot be
    /// constructed (TLS backend initialization).
    pub fn new(config: &ApiConfig) -> Result<Self, PredictError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/predict", self.base_url)
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, request: &PredictionRequest) -> Result<PredictionOutcome, PredictError> {
        let url = self.endpoint();
        tracing::debug!(%url, "Sending prediction request");

        let response = self.client.post(&url).json(request).send().map_err(|e| {
            tracing::warn!(error = %e, "Prediction service unreachable");
            PredictError::Transport(NETWORK_ERROR_MESSAGE.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .map(|body| body.error)
                .unwrap_or_else(|_| GENERIC_ERROR_MESSAGE.to_string());
            tracing::warn!(status = %status, "Prediction service returned an error");
            return Err(PredictError::Service(message));
        }

        response.json::<PredictionOutcome>().map_err(|e| {
            tracing::warn!(error = %e, "Prediction response body was malformed");
            PredictError::Transport(format!("Malformed response from prediction service: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;
    use std::time::Duration;

    /// Spawn a one-shot HTTP responder on a loopback port and return its base URL.
    fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                // Drain the full request (headers + body) before answering.
                let mut buf = [0u8; 4096];
                let mut seen = Vec::new();
                while let Ok(n) = stream.read(&mut buf) {
                    if n == 0 {
                        break;
                    }
                    seen.extend_from_slice(&buf[..n]);

                    let Some(header_end) =
                        seen.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
                    else {
                        continue;
                    };
                    let headers = String::from_utf8_lossy(&seen[..header_end]).to_lowercase();
                    let content_length = headers
                        .lines()
                        .find_map(|l| l.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if seen.len() >= header_end + content_length {
                        break;
                    }
                }

                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    fn predictor(base_url: String) -> HttpPredictor {
        let config = ApiConfig {
            base_url,
            timeout: Duration::from_secs(5),
        };
        HttpPredictor::new(&config).expect("client should build")
    }

    fn request() -> PredictionRequest {
        PredictionRequest {
            age: 45.0,
            gender: "Male".to_string(),
            height: 170.0,
            weight: 75.0,
            ap_hi: 120.0,
            ap_lo: 80.0,
            cholesterol: "Normal".to_string(),
            gluc: "Normal".to_string(),
            smoke: "No".to_string(),
            alco: "No".to_string(),
            active: "Yes".to_string(),
        }
    }

    #[test]
    fn success_response_yields_outcome() {
        let base = one_shot_server(
            "HTTP/1.1 200 OK",
            r#"{"heart_risk":1,"risk_probability":0.83,"bmi":24.5}"#,
        );

        let outcome = predictor(base).predict(&request()).expect("should succeed");
        assert_eq!(outcome.heart_risk, 1);
        assert!((outcome.risk_probability - 0.83).abs() < f64::EPSILON);
        assert!((outcome.bmi - 24.5).abs() < f64::EPSILON);
    }

    #[test]
    fn structured_error_is_surfaced_verbatim() {
        let base = one_shot_server("HTTP/1.1 400 Bad Request", r#"{"error":"model unavailable"}"#);

        let err = predictor(base).predict(&request()).unwrap_err();
        assert_eq!(err, PredictError::Service("model unavailable".to_string()));
    }

    #[test]
    fn unparseable_error_body_falls_back_to_generic_message() {
        let base = one_shot_server("HTTP/1.1 500 Internal Server Error", "<html>oops</html>");

        let err = predictor(base).predict(&request()).unwrap_err();
        assert_eq!(
            err,
            PredictError::Service(GENERIC_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn unreachable_service_reports_network_error() {
        // Bind then drop to get a port with nothing listening.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
            listener.local_addr().expect("local addr").port()
        };

        let err = predictor(format!("http://127.0.0.1:{port}"))
            .predict(&request())
            .unwrap_err();
        assert_eq!(
            err,
            PredictError::Transport(NETWORK_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn malformed_success_body_is_a_transport_error() {
        let base = one_shot_server("HTTP/1.1 200 OK", r#"{"unexpected":true}"#);

        let err = predictor(base).predict(&request()).unwrap_err();
        assert!(matches!(err, PredictError::Transport(_)));
    }

    #[test]
    fn trailing_slash_in_base_url_is_tolerated() {
        let config = ApiConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout: Duration::from_secs(1),
        };
        let client = HttpPredictor::new(&config).expect("client should build");
        assert_eq!(client.endpoint(), "http://localhost:5000/predict");
    }
}
