//! Configuration for the user directory module.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default remote users service.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Configuration for the user directory module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct UserDirectoryConfig {
    /// Base URL of the remote service. Requests go to `{base_url}/users`.
    pub base_url: String,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// User-Agent header sent with every request.
    pub user_agent: String,

    /// Maximum accepted response body size in bytes.
    pub max_response_bytes: usize,

    /// Permit plain `http://` base URLs (local mock servers). Honoured only in
    /// debug builds or with the `allow-insecure-http` feature.
    pub allow_insecure_http: bool,
}

impl Default for UserDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout_ms: 10_000,
            user_agent: concat!("user-directory/", env!("CARGO_PKG_VERSION")).to_owned(),
            max_response_bytes: 2 * 1024 * 1024,
            allow_insecure_http: false,
        }
    }
}

impl UserDirectoryConfig {
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
