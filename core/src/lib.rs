//! Blocking client for a session-authenticated, envelope-wrapped web API.
//!
//! # Overview
//! Every response from the remote API is a JSON envelope
//! `{"success": bool, "data": ..., "error": {"code": int}}`. This crate builds
//! requests against `scheme://host/path?query`, attaches the session id once
//! logged in, executes the call under a timeout and turns the envelope into
//! either the payload or a typed `ApiError`.
//!
//! # Design
//! - `request` builds plain-data `HttpRequest` values; `transport` is the
//!   only module that touches the network, behind the `Transport` trait.
//! - `envelope` decodes once into a typed shape; a mismatch is
//!   `ApiError::Decode`, never a panic.
//! - `Session` is an explicit state owned by `Client`, changed only through
//!   `&mut self`.
//!
//! ```no_run
//! use std::collections::HashMap;
//! use synoclient::{Client, ClientConfig};
//!
//! # fn main() -> synoclient::Result<()> {
//! let config = ClientConfig::new("nas.local:5001", "admin", "secret", "FileStation");
//! let mut client = Client::new(config);
//! client.login()?;
//!
//! let params = HashMap::from([
//!     ("api".to_string(), "SYNO.FileStation.List".to_string()),
//!     ("version".to_string(), "2".to_string()),
//!     ("method".to_string(), "list_share".to_string()),
//! ]);
//! let shares = client.fetch("webapi/entry.cgi", &params)?;
//! println!("{shares}");
//!
//! client.logout()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod request;
pub mod session;
pub mod transport;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest};
pub use session::Session;
pub use transport::{Transport, UreqTransport};
