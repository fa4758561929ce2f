//! Environment-driven configuration.
//!
//! Binaries call `dotenv().ok()` first, so a local `.env` file works too.

use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_STUB_BIND: &str = "127.0.0.1:5000";

/// Where the analysis backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads `ANALYSIS_BASE_URL` and `ANALYSIS_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("ANALYSIS_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self { base_url, timeout }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Stub backend settings.
#[derive(Debug, Clone, PartialEq)]
pub struct StubConfig {
    pub bind: SocketAddr,
}

impl StubConfig {
    /// Reads `STUB_BIND`; an unparsable value is logged and replaced by the default.
    pub fn from_env() -> Self {
        let raw = std::env::var("STUB_BIND").unwrap_or_else(|_| DEFAULT_STUB_BIND.to_string());
        let bind = raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "invalid STUB_BIND, using {}", DEFAULT_STUB_BIND);
            default_bind()
        });
        Self { bind }
    }
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 5000))
}
