//! Request construction: base URL, endpoint path, query and session id.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest};
use crate::session::{Session, SID_PARAM};

/// Assemble `scheme://host/path?query` for one call.
///
/// Every parameter is form-encoded into the query. When `session` is
/// authenticated its id is written under `_sid`, replacing any value the
/// caller supplied for that key. Query keys are emitted in sorted order.
pub fn build_request(
    config: &ClientConfig,
    session: &Session,
    method: HttpMethod,
    path: &str,
    params: &HashMap<String, String>,
) -> Result<HttpRequest> {
    if path.contains('?') {
        return Err(ApiError::InvalidRequest(format!(
            "path must not carry a query string: {path}"
        )));
    }

    let mut url = base_url(config)?;
    url.set_path(&format!("/{}", path.trim_start_matches('/')));

    let mut query: BTreeMap<&str, &str> = params
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    if let Some(sid) = session.sid() {
        query.insert(SID_PARAM, sid);
    }
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    debug!(
        method = method.as_str(),
        path = url.path(),
        authenticated = session.is_authenticated(),
        "built request"
    );

    Ok(HttpRequest {
        method,
        url,
        headers: vec![("Accept".to_string(), "application/json".to_string())],
    })
}

fn base_url(config: &ClientConfig) -> Result<Url> {
    if config.host.is_empty() || config.host.contains(['/', '?', '#', '@']) {
        return Err(ApiError::InvalidRequest(format!(
            "malformed host: {:?}",
            config.host
        )));
    }
    let url = Url::parse(&format!("{}://{}/", config.scheme, config.host)).map_err(|e| {
        ApiError::InvalidRequest(format!("{}://{}: {e}", config.scheme, config.host))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidRequest(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() || url.host().is_none() {
        return Err(ApiError::InvalidRequest(format!(
            "{}://{} has no host",
            config.scheme, config.host
        )));
    }
    Ok(url)
}
