//! Decoding of the `{success, data, error}` envelope every response carries.
//!
//! ```json
//! { "success": true,  "data": { "sid": "ABC123" } }
//! { "success": false, "error": { "code": 400 } }
//! ```
//!
//! `success` is authoritative. A failure envelope without a usable
//! `error.code` is reported as `Decode` rather than guessed at.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Value,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ErrorBlock {
    code: i64,
}

fn parse(body: &[u8]) -> Result<Envelope> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn into_data(envelope: Envelope) -> Result<Value> {
    if envelope.success {
        return Ok(envelope.data);
    }
    let block = envelope
        .error
        .ok_or_else(|| ApiError::Decode("failure envelope has no error block".to_string()))?;
    let block: ErrorBlock = serde_json::from_value(block)
        .map_err(|e| ApiError::Decode(format!("malformed error block: {e}")))?;
    Err(ApiError::Domain { code: block.code })
}

/// Validate a response body, discarding the payload.
pub fn assert_response(body: &[u8]) -> Result<()> {
    into_data(parse(body)?).map(|_| ())
}

/// Validate a response body and return its `data` verbatim.
///
/// A successful envelope without `data` yields `Value::Null`.
pub fn decode(body: &[u8]) -> Result<Value> {
    into_data(parse(body)?)
}

/// Pull `data` out of a body that was already validated.
pub fn extract_data(raw: &str) -> Result<Value> {
    let mut doc: Value = serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !doc.is_object() {
        return Err(ApiError::Decode("response is not a JSON object".to_string()));
    }
    Ok(doc.get_mut("data").map(Value::take).unwrap_or(Value::Null))
}

/// Interpret an opaque payload as a caller-chosen type.
pub fn decode_data<T: DeserializeOwned>(data: Value) -> Result<T> {
    serde_json::from_value(data).map_err(|e| ApiError::Decode(e.to_string()))
}
