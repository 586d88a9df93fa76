//! Error types for the envelope API client.
//!
//! # Design
//! Transport failures and non-2xx statuses share `Generic` because neither
//! carries a usable envelope; the caller only gets a description. A
//! `success: false` envelope lands in `Domain` with the remote error code,
//! which callers map to meaning through their own endpoint-specific table.

use thiserror::Error;

/// Errors returned by every `Client` operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Network failure or an HTTP status of 400 and above.
    #[error("{0}")]
    Generic(String),

    /// The response body is not JSON or does not match the expected shape.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The envelope reported `success: false`.
    #[error("api error code {code}")]
    Domain { code: i64 },

    /// The request could not be assembled; no I/O was attempted.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The client configuration could not be loaded.
    #[error("invalid config: {0}")]
    Config(String),
}

impl ApiError {
    /// The remote error code, if this is a `Domain` error.
    pub fn code(&self) -> Option<i64> {
        match self {
            ApiError::Domain { code } => Some(*code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
