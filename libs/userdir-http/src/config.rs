use std::time::Duration;

/// Default User-Agent string for HTTP requests
pub const DEFAULT_USER_AGENT: &str = concat!("userdir-http/", env!("CARGO_PKG_VERSION"));

/// Default response body limit (2 MiB). Directory listings are small.
pub const DEFAULT_MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

/// Maximum number of body bytes kept in an [`HttpError::HttpStatus`] preview.
///
/// [`HttpError::HttpStatus`]: crate::HttpError::HttpStatus
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Which URL schemes the client accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportSecurity {
    /// Only `https://` URLs are accepted
    #[default]
    TlsOnly,
    /// Plain `http://` is also accepted (mock servers, local testing)
    AllowInsecureHttp,
}

/// Client configuration consumed by [`HttpClientBuilder`](crate::HttpClientBuilder)
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout applied to each request (default: 30s)
    pub request_timeout: Duration,

    /// Value of the `User-Agent` header when the caller sets none
    pub user_agent: String,

    /// Maximum response body size in bytes
    pub max_body_size: usize,

    /// Scheme policy
    pub transport: TransportSecurity,

    /// Idle pooled connections are closed after this long (`None` keeps them)
    pub pool_idle_timeout: Option<Duration>,

    /// Maximum idle connections kept per host
    pub pool_max_idle_per_host: usize,

    /// Number of requests that may be queued in front of the connection pool
    pub buffer_capacity: usize,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            transport: TransportSecurity::TlsOnly,
            pool_idle_timeout: Some(Duration::from_secs(90)),
            pool_max_idle_per_host: 8,
            buffer_capacity: 64,
        }
    }
}

impl HttpClientConfig {
    /// Short timeout, small buffer. Suitable for tests against mock servers.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            buffer_capacity: 8,
            ..Self::default()
        }
    }
}
