//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{ApiError, Result};

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection and credential settings for a `Client`.
///
/// Can be built in code or populated from environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `SYNO_HOST` | (required) | `host[:port]` of the remote API |
/// | `SYNO_SCHEME` | `https` | URL scheme |
/// | `SYNO_USERNAME` | (required) | Login account |
/// | `SYNO_PASSWORD` | (required) | Login password |
/// | `SYNO_SESSION` | (required) | Session namespace sent on login/logout |
/// | `SYNO_TIMEOUT_SECS` | `30` | Per-request timeout in seconds |
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub host: String,
    pub scheme: String,
    pub username: String,
    pub password: String,
    /// Session namespace, e.g. `"FileStation"`.
    pub session: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        session: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            scheme: DEFAULT_SCHEME.to_string(),
            username: username.into(),
            password: password.into(),
            session: session.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout expressed as a count of seconds.
    pub fn with_timeout_secs(self, secs: u64) -> Self {
        self.with_timeout(Duration::from_secs(secs))
    }

    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ApiError::Config(format!("{key} is not set")))
        };

        let timeout_secs = match lookup("SYNO_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                ApiError::Config(format!("SYNO_TIMEOUT_SECS must be a number of seconds: {e}"))
            })?,
            None => DEFAULT_TIMEOUT.as_secs(),
        };

        let config = Self::new(
            required("SYNO_HOST")?,
            required("SYNO_USERNAME")?,
            required("SYNO_PASSWORD")?,
            required("SYNO_SESSION")?,
        )
        .with_scheme(lookup("SYNO_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string()))
        .with_timeout_secs(timeout_secs);
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("session", &self.session)
            .field("timeout", &self.timeout)
            .finish()
    }
}
