//! Client configuration.

use std::env;
use std::time::Duration;

/// Default API server.
pub const DEFAULT_SERVER_URL: &str = "https://api.svix.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options accepted by [`crate::Svix::new`].
///
/// # Example
///
/// ```
/// use svix_client::SvixOptions;
/// use std::time::Duration;
///
/// let options = SvixOptions::default()
///     .with_server_url("http://localhost:8071")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(options.server_url(), Some("http://localhost:8071"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvixOptions {
    /// Overrides the server chosen from the token's region.
    server_url: Option<String>,
    /// Per-request timeout of the HTTP transport.
    timeout: Duration,
}

impl Default for SvixOptions {
    fn default() -> Self {
        Self {
            server_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SvixOptions {
    /// Create configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SVIX_SERVER_URL`: server base URL
    /// - `SVIX_TIMEOUT_SECS`: request timeout in seconds
    ///
    /// Unset, empty, zero or unparseable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let server_url = env::var("SVIX_SERVER_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let timeout = env::var("SVIX_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            server_url,
            timeout,
        }
    }

    /// Set the server base URL.
    #[must_use]
    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The explicit server URL, if any.
    pub fn server_url(&self) -> Option<&str> {
        self.server_url.as_deref()
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The URL the client will talk to for `token`.
    pub fn resolve_server_url(&self, token: &str) -> String {
        self.server_url
            .clone()
            .unwrap_or_else(|| default_server_url(token).to_string())
    }
}

/// Server for the region encoded as the token's last `.`-separated segment.
pub fn default_server_url(token: &str) -> &'static str {
    match token.rsplit('.').next() {
        Some("us") => "https://api.us.svix.com",
        Some("eu") => "https://api.eu.svix.com",
        Some("in") => "https://api.in.svix.com",
        _ => DEFAULT_SERVER_URL,
    }
}
