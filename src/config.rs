//! Runtime configuration resolved once at startup.
//!
//! The prediction service endpoint is environment-supplied so the same binary
//! works against a local development server or a deployed instance.

use std::time::Duration;

/// Default endpoint of the local development prediction service.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default request timeout. A hung request must not leave the UI pending
/// forever, so the HTTP client always carries a deadline.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the remote prediction service.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the prediction service (no trailing path).
    pub base_url: String,

    /// Timeout applied to each prediction request.
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from the environment.
    ///
    /// Reads `CARDIOSCOPE_API_URL` and `CARDIOSCOPE_HTTP_TIMEOUT_SECS`,
    /// falling back to defaults for anything missing or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("CARDIOSCOPE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout_secs = std::env::var("CARDIOSCOPE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
