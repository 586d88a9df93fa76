//! Session state and the auth endpoint's parameter sets.
//!
//! # Design
//! The session id lives in an explicit `Session` value owned by the client
//! rather than an empty-string sentinel. `Client::login` moves it to
//! `Authenticated`; nothing in this crate moves it back except
//! `Client::reset_session`, so a logout leaves the stale id in place.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ClientConfig;

/// Endpoint serving login and logout.
pub const AUTH_PATH: &str = "webapi/auth.cgi";
pub const AUTH_API: &str = "SYNO.API.Auth";
pub const AUTH_VERSION: &str = "2";

/// Query key the session id is sent under on authenticated requests.
pub const SID_PARAM: &str = "_sid";

/// Authentication state of a client instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Unauthenticated,
    Authenticated { sid: String },
}

impl Session {
    /// An empty id is treated as no session at all.
    pub fn from_sid(sid: impl Into<String>) -> Self {
        let sid = sid.into();
        if sid.is_empty() {
            Session::Unauthenticated
        } else {
            Session::Authenticated { sid }
        }
    }

    pub fn sid(&self) -> Option<&str> {
        match self {
            Session::Unauthenticated => None,
            Session::Authenticated { sid } => Some(sid),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// `data` payload of a successful login with `format=sid`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LoginData {
    pub sid: String,
}

fn auth_params(method: &str, config: &ClientConfig) -> HashMap<String, String> {
    HashMap::from([
        ("api".to_string(), AUTH_API.to_string()),
        ("version".to_string(), AUTH_VERSION.to_string()),
        ("method".to_string(), method.to_string()),
        ("session".to_string(), config.session.clone()),
    ])
}

pub fn login_params(config: &ClientConfig) -> HashMap<String, String> {
    let mut params = auth_params("login", config);
    params.insert("account".to_string(), config.username.clone());
    params.insert("passwd".to_string(), config.password.clone());
    params.insert("format".to_string(), "sid".to_string());
    params
}

pub fn logout_params(config: &ClientConfig) -> HashMap<String, String> {
    auth_params("logout", config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ClientConfig {
        ClientConfig::new("nas.local", "admin", "hunter2", "FileStation")
    }

    #[test]
    fn default_is_unauthenticated() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.sid(), None);
    }

    #[test]
    fn from_sid_empty_stays_unauthenticated() {
        assert_eq!(Session::from_sid(""), Session::Unauthenticated);
        assert_eq!(Session::from_sid("ABC").sid(), Some("ABC"));
    }

    #[test]
    fn login_params_carry_credentials_and_sid_format() {
        let params = login_params(&config());
        assert_eq!(params.len(), 7);
        assert_eq!(params["api"], "SYNO.API.Auth");
        assert_eq!(params["version"], "2");
        assert_eq!(params["method"], "login");
        assert_eq!(params["account"], "admin");
        assert_eq!(params["passwd"], "hunter2");
        assert_eq!(params["session"], "FileStation");
        assert_eq!(params["format"], "sid");
    }

    #[test]
    fn logout_params_omit_credentials() {
        let params = logout_params(&config());
        assert_eq!(params.len(), 4);
        assert_eq!(params["method"], "logout");
        assert_eq!(params["session"], "FileStation");
        assert!(!params.contains_key("passwd"));
    }
}
