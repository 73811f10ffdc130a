use std::time::Duration;

use tracing::debug;

/// Where the backend listens unless configured otherwise.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding [DEFAULT_BACKEND_URL].
pub const BACKEND_URL_ENV: &str = "BACKEND_URL";

pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(4);
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(7);

/// Configuration of the backend the client talks to.
///
/// - `read_timeout` applies to `GET` requests,
/// - `write_timeout` applies to `POST` requests like spins and resets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    base_url: String,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}

impl BackendConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        base_url.truncate(base_url.trim_end_matches('/').len());
        Self {
            base_url,
            read_timeout: DEFAULT_READ_TIMEOUT,
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Reads the base URL from `$BACKEND_URL`, falling back to [DEFAULT_BACKEND_URL].
    pub fn from_env() -> Self {
        match std::env::var(BACKEND_URL_ENV) {
            Ok(base_url) if !base_url.trim().is_empty() => Self::new(base_url.trim()),
            _ => {
                debug!("${BACKEND_URL_ENV} is not set, using {DEFAULT_BACKEND_URL}");
                Self::default()
            }
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The absolute URL of an endpoint, `path` being relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
