use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// No such account or incorrect password.
pub const ERR_BAD_CREDENTIALS: i64 = 400;
/// Requested API does not exist.
pub const ERR_NO_SUCH_API: i64 = 102;
/// Requested method does not exist.
pub const ERR_NO_SUCH_METHOD: i64 = 103;
/// Session id missing or not recognised.
pub const ERR_SID_NOT_FOUND: i64 = 119;

pub const AUTH_API: &str = "SYNO.API.Auth";

/// How long `/webapi/slow.cgi` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(10);

/// The `data` of a successful login.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginData {
    pub sid: String,
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub account: String,
    pub passwd: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            account: "admin".to_string(),
            passwd: "secret".to_string(),
        }
    }
}

pub type Sessions = Arc<RwLock<HashSet<String>>>;

#[derive(Clone)]
pub struct AppState {
    credentials: Credentials,
    sessions: Sessions,
}

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    app_with(Credentials::default())
}

pub fn app_with(credentials: Credentials) -> Router {
    let state = AppState {
        credentials,
        sessions: Arc::new(RwLock::new(HashSet::new())),
    };
    Router::new()
        .route("/webapi/auth.cgi", get(auth))
        .route("/webapi/entry.cgi", get(entry).post(entry))
        .route("/webapi/broken.cgi", get(broken))
        .route("/webapi/garbage.cgi", get(garbage))
        .route("/webapi/slow.cgi", get(slow))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Credentials::default()).await
}

pub async fn run_with(
    listener: TcpListener,
    credentials: Credentials,
) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(credentials)).await
}

fn success(data: Value) -> Json<Value> {
    Json(json!({ "success": true, "data": data }))
}

fn failure(code: i64) -> Json<Value> {
    Json(json!({ "success": false, "error": { "code": code } }))
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> &'a str {
    params.get(key).map(String::as_str).unwrap_or_default()
}

async fn auth(State(state): State<AppState>, Query(params): Params) -> Json<Value> {
    if param(&params, "api") != AUTH_API {
        return failure(ERR_NO_SUCH_API);
    }
    match param(&params, "method") {
        "login" => {
            if param(&params, "account") != state.credentials.account
                || param(&params, "passwd") != state.credentials.passwd
            {
                return failure(ERR_BAD_CREDENTIALS);
            }
            let sid = Uuid::new_v4().simple().to_string();
            state.sessions.write().await.insert(sid.clone());
            info!(session = param(&params, "session"), "login");
            success(json!(LoginData { sid }))
        }
        "logout" => {
            if let Some(sid) = params.get("_sid") {
                state.sessions.write().await.remove(sid);
            }
            info!(session = param(&params, "session"), "logout");
            Json(json!({ "success": true }))
        }
        _ => failure(ERR_NO_SUCH_METHOD),
    }
}

/// Echoes the method, the query (minus `_sid`) and the `Accept` header back
/// for a live session.
async fn entry(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    Query(mut params): Params,
) -> Json<Value> {
    let Some(sid) = params.remove("_sid") else {
        return failure(ERR_SID_NOT_FOUND);
    };
    if !state.sessions.read().await.contains(&sid) {
        return failure(ERR_SID_NOT_FOUND);
    }
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    success(json!({ "method": method.as_str(), "params": params, "accept": accept }))
}

/// A 500 whose body looks like a successful envelope.
async fn broken() -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": true, "data": {} })),
    )
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "<html>not an envelope</html>")
}

/// Answers only after `SLOW_DELAY`.
async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(json!({ "success": true }))
}
