//! The client facade: `get`, `login`, `logout`.
//!
//! # Design
//! `Client` owns its config, its `Session` and a `Transport`. Every call goes
//! request builder → transport → envelope check. Only `login` and
//! `reset_session` change the session, and both take `&mut self`; a client
//! shared across threads needs external synchronisation (a `Mutex`), so a
//! request can never observe a half-finished login.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::info;

use crate::config::ClientConfig;
use crate::envelope;
use crate::error::{ApiError, Result};
use crate::http::HttpMethod;
use crate::request::build_request;
use crate::session::{self, LoginData, Session, AUTH_PATH};
use crate::transport::{Transport, UreqTransport};

/// Session-authenticated client for an envelope-wrapped web API.
///
/// One request at a time per instance. Wrap it in a `Mutex` to share it
/// between threads.
pub struct Client<T: Transport = UreqTransport> {
    config: ClientConfig,
    session: Session,
    transport: T,
}

impl Client<UreqTransport> {
    /// Client over a blocking ureq transport using `config.timeout`.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            session: Session::Unauthenticated,
            transport,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Forget the stored session id. Does not contact the server.
    pub fn reset_session(&mut self) {
        self.session = Session::Unauthenticated;
    }

    /// GET `path` with `params` and return the whole validated body.
    ///
    /// The envelope has been checked for success; use `get_data` or
    /// `fetch` to reach the payload.
    pub fn get(&self, path: &str, params: &HashMap<String, String>) -> Result<String> {
        self.request(HttpMethod::Get, path, params)
    }

    pub fn request(
        &self,
        method: HttpMethod,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<String> {
        let body = self.send(method, path, params)?;
        envelope::assert_response(&body)?;
        String::from_utf8(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// GET `path` and return the decoded `data` payload in a single parse.
    pub fn fetch(&self, path: &str, params: &HashMap<String, String>) -> Result<Value> {
        let body = self.send(HttpMethod::Get, path, params)?;
        envelope::decode(&body)
    }

    /// Extract `data` from a body previously returned by `get`.
    pub fn get_data(&self, raw: &str) -> Result<Value> {
        envelope::extract_data(raw)
    }

    /// Exchange the configured credentials for a session id and store it.
    ///
    /// Calling this while already authenticated logs in again and replaces
    /// the stored id.
    pub fn login(&mut self) -> Result<String> {
        let raw = self.get(AUTH_PATH, &session::login_params(&self.config))?;
        let data: LoginData = envelope::decode_data(self.get_data(&raw)?)?;
        if data.sid.is_empty() {
            return Err(ApiError::Decode("login returned an empty sid".to_string()));
        }

        self.session = Session::from_sid(data.sid.clone());
        info!(host = %self.config.host, session = %self.config.session, "logged in");
        Ok(data.sid)
    }

    /// Ask the server to invalidate the session.
    ///
    /// The stored id is left untouched; call `reset_session` to drop it.
    pub fn logout(&self) -> Result<()> {
        self.get(AUTH_PATH, &session::logout_params(&self.config))?;
        info!(host = %self.config.host, session = %self.config.session, "logged out");
        Ok(())
    }

    fn send(
        &self,
        method: HttpMethod,
        path: &str,
        params: &HashMap<String, String>,
    ) -> Result<Vec<u8>> {
        let request = build_request(&self.config, &self.session, method, path, params)?;
        self.transport.execute(&request)
    }
}

impl<T: Transport> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .field("authenticated", &self.session.is_authenticated())
            .finish()
    }
}
