//! Executing a built request.
//!
//! # Design
//! `Transport` is the I/O seam: the client hands it a fully-formed
//! `HttpRequest` and gets back the raw body of a 2xx response. Anything else
//! (network failure or a status of 400 and above) comes back as
//! `ApiError::Generic`. A status error is raised before the body is read,
//! since such responses are not expected to carry a usable envelope.

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};
use ureq::http::StatusCode;
use ureq::Agent;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest};

/// Executes one request, one attempt, no retries.
pub trait Transport {
    /// Returns the body of a 2xx response.
    fn execute(&self, request: &HttpRequest) -> Result<Vec<u8>>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The whole body is read into memory, capped by ureq's default body size
/// limit; a larger body surfaces as a `Generic` error.
pub struct UreqTransport {
    agent: Agent,
    timeout: Duration,
}

impl UreqTransport {
    /// `timeout` bounds the whole round trip, connect through body read.
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<Vec<u8>> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post => {
                let mut builder = self.agent.post(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.send_empty()
            }
        };

        let mut response = result.map_err(|e| {
            warn!(path = request.url.path(), error = %e, "transport failure");
            ApiError::Generic(e.to_string())
        })?;

        if let Some(err) = status_error(response.status()) {
            warn!(path = request.url.path(), status = %response.status(), "rejected by status");
            return Err(err);
        }

        let body = response
            .body_mut()
            .read_to_vec()
            .map_err(|e| ApiError::Generic(format!("reading response body: {e}")))?;
        debug!(path = request.url.path(), bytes = body.len(), "response received");
        Ok(body)
    }
}

/// Map a status of 400 and above to `Generic` carrying the status line.
pub fn status_error(status: StatusCode) -> Option<ApiError> {
    if status.as_u16() < 400 {
        return None;
    }
    let line = match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    };
    Some(ApiError::Generic(line))
}
