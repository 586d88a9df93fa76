//! Verify envelope decoding and auth request construction against JSON test
//! vectors stored in `test-vectors/`.
//!
//! Payloads are compared as parsed JSON, not raw strings, so field ordering
//! in the vector files does not matter.

use synoclient::request::build_request;
use synoclient::session::{login_params, logout_params, AUTH_PATH};
use synoclient::{envelope, ApiError, ClientConfig, HttpMethod, Session};

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[test]
fn envelope_test_vectors() {
    let raw = include_str!("../../test-vectors/envelope.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap().as_bytes();
        let result = envelope::decode(body);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error["kind"].as_str().unwrap() {
                "Domain" => {
                    let code = expected_error["code"].as_i64().unwrap();
                    assert_eq!(err, ApiError::Domain { code }, "{name}: domain code");
                }
                "Decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            assert!(envelope::assert_response(body).is_err(), "{name}: assert_response");
        } else {
            let data = result.unwrap();
            assert_eq!(data, case["expected_data"], "{name}: data");
            assert!(envelope::assert_response(body).is_ok(), "{name}: assert_response");
        }
    }
}

// ---------------------------------------------------------------------------
// Auth requests
// ---------------------------------------------------------------------------

#[test]
fn auth_test_vectors() {
    let raw = include_str!("../../test-vectors/auth.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = &vectors["config"];
    let config = ClientConfig::new(
        c["host"].as_str().unwrap(),
        c["username"].as_str().unwrap(),
        c["password"].as_str().unwrap(),
        c["session"].as_str().unwrap(),
    )
    .with_scheme(c["scheme"].as_str().unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let session = Session::from_sid(case["sid"].as_str().unwrap_or_default());
        let params = match case["operation"].as_str().unwrap() {
            "login" => login_params(&config),
            "logout" => logout_params(&config),
            other => panic!("{name}: unknown operation: {other}"),
        };
        let expected = &case["expected_request"];

        let req = build_request(&config, &session, HttpMethod::Get, AUTH_PATH, &params).unwrap();
        let method = parse_method(expected["method"].as_str().unwrap());
        assert_eq!(req.method, method, "{name}: method");
        assert_eq!(req.url.as_str(), expected["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");
    }
}
