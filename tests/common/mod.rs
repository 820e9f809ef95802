#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};

use chatbot_admin::{ApiClient, SessionStore};
use chatbot_admin::session::FileStorage;

pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "pw";
/// Login for this address is rejected with an HTML body and no message
pub const HTML_REJECTED_EMAIL: &str = "locked@x.com";
pub const TOKENS: [&str; 2] = ["tok-1", "tok-2"];

/// What the mock API has seen and what it serves
#[derive(Default)]
pub struct MockState {
    /// `Authorization` header of every request, in arrival order, keyed by path
    pub auth_headers: Vec<(String, Option<String>)>,
    pub token_limits: HashMap<String, u64>,
    pub renewals: Vec<Value>,
    pub companies: Vec<Value>,
}

pub type Shared = Arc<Mutex<MockState>>;

pub struct MockServer {
    pub base_url: String,
    pub state: Shared,
}

impl MockServer {
    /// Bind the mock API on a free port inside the current test runtime
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock API")?;

        let state: Shared = Arc::new(Mutex::new(MockState::default()));
        {
            let mut s = state.lock().unwrap();
            s.token_limits.insert("42".into(), 1000);
            s.token_limits.insert("7".into(), 500);
            s.companies.push(json!({"id": 1, "name": "Acme", "url": "acme.io"}));
        }

        let app = router(state.clone());
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            state,
        })
    }

    pub fn seen_auth(&self) -> Vec<(String, Option<String>)> {
        self.state.lock().unwrap().auth_headers.clone()
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.seen_auth().iter().filter(|(p, _)| p == path).count()
    }
}

/// File-backed session in a temp dir plus a client pointed at `base_url`
pub fn client_with_file_session(base_url: &str) -> Result<(tempfile::TempDir, SessionStore, ApiClient)> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::in_dir(dir.path())?;
    let session = SessionStore::new(Arc::new(storage));
    let client = ApiClient::new(base_url, session.clone())?;
    Ok((dir, session, client))
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/admin/login", post(login))
        .route("/api/admin/stats", get(stats))
        .route("/api/admin/all", get(admins))
        .route("/api/admin/create", post(create_admin))
        .route("/api/company/all", get(companies))
        .route("/api/company/create", post(create_company))
        .route("/api/chatbot/all", get(chatbots))
        .route("/api/chatbot/update-token-limit/:id", put(update_limit))
        .route("/api/chatbot/messages/:id", get(messages))
        .route("/api/chatbot/:id/subscription", get(subscription))
        .route("/api/chatbot/:id/renew", post(renew))
        .route("/api/chatbot/:id/config", get(get_config).put(put_config))
        .route("/api/report/download/:id", get(report))
        .route("/api/plans", get(plans))
        .with_state(state)
}

fn record(state: &Shared, path: &str, headers: &HeaderMap) -> bool {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let ok = auth
        .as_deref()
        .map(|a| TOKENS.iter().any(|t| a == format!("Bearer {}", t)))
        .unwrap_or(false);
    state.lock().unwrap().auth_headers.push((path.to_string(), auth));
    ok
}

fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"message": "Unauthorized"}))).into_response()
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record(&state, "/admin/login", &headers);
    if body["email"] == HTML_REJECTED_EMAIL {
        return (StatusCode::UNAUTHORIZED, "<html><body>401 Unauthorized</body></html>").into_response();
    }
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        Json(json!({"token": TOKENS[0]})).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid email or password"}))).into_response()
    }
}

async fn stats(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, "/admin/stats", &headers) {
        return unauthorized();
    }
    Json(json!({
        "totalChatbots": 2,
        "totalCompanies": 1,
        "unique_users": 17,
        "totalMessages": 230,
        "monthlyTokenUsage": 98765
    }))
    .into_response()
}

async fn admins(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, "/admin/all", &headers) {
        return unauthorized();
    }
    Json(json!({
        "success": true,
        "admins": [
            {"id": 1, "name": "Root", "email": "root@x.com", "created_at": "2026-01-02T03:04:05Z"}
        ]
    }))
    .into_response()
}

async fn create_admin(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !record(&state, "/admin/create", &headers) {
        return unauthorized();
    }
    if body["email"] == "root@x.com" {
        // 200 with a failure flag, the way the admin endpoint reports duplicates
        return Json(json!({"success": false, "error": "Admin already exists"})).into_response();
    }
    Json(json!({"success": true})).into_response()
}

async fn companies(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, "/company/all", &headers) {
        return unauthorized();
    }
    let companies = state.lock().unwrap().companies.clone();
    Json(json!({ "companies": companies })).into_response()
}

async fn create_company(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if !record(&state, "/company/create", &headers) {
        return unauthorized();
    }
    if body["name"] == "Broken" {
        // error body in a shape the client does not expect
        return (StatusCode::BAD_REQUEST, Json(json!({"error": {"code": 17}}))).into_response();
    }
    if body["name"] == "Gateway" {
        return (StatusCode::BAD_GATEWAY, "<html><body>502 Bad Gateway</body></html>").into_response();
    }
    let mut s = state.lock().unwrap();
    let id = s.companies.len() + 1;
    s.companies.push(json!({"id": id, "name": body["name"], "url": body["url"]}));
    (StatusCode::CREATED, Json(json!({"message": "Company created"}))).into_response()
}

async fn chatbots(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, "/chatbot/all", &headers) {
        return unauthorized();
    }
    let limits = state.lock().unwrap().token_limits.clone();
    Json(json!({
        "chatbots": [
            {
                "id": 42, "name": "Support Bot", "company_name": "Acme", "company_url": "acme.io",
                "token_limit": limits.get("42"), "used_tokens": 400, "total_messages": 12, "unique_users": 5
            },
            {
                "id": 7, "name": "Sales Bot", "company_name": "Acme", "company_url": "acme.io",
                "token_limit": limits.get("7"), "used_tokens": 900, "total_messages": 3, "unique_users": 1
            },
            {
                "id": "x1", "name": "Beta Bot", "company_name": null, "company_url": null,
                "token_limit": null, "used_tokens": null
            }
        ]
    }))
    .into_response()
}

async fn update_limit(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&state, "/chatbot/update-token-limit", &headers) {
        return unauthorized();
    }
    match body["token_limit"].as_u64() {
        Some(limit) => {
            state.lock().unwrap().token_limits.insert(id, limit);
            Json(json!({"message": "Token limit updated"})).into_response()
        }
        None => (StatusCode::BAD_REQUEST, Json(json!({"message": "token_limit must be a number"}))).into_response(),
    }
}

async fn messages(State(state): State<Shared>, Path(_id): Path<String>, headers: HeaderMap) -> Response {
    if !record(&state, "/chatbot/messages", &headers) {
        return unauthorized();
    }
    Json(json!({
        "messages": [
            {"id": 1, "sender": "user", "content": "hi", "timestamp": "2026-02-01T10:00:00Z"},
            {"id": 2, "sender": "bot", "content": "hello, \"friend\"", "timestamp": "2026-02-01T10:00:01Z"},
            {"id": 3, "sender": "user", "content": "pricing?", "timestamp": "2026-02-01T10:01:00Z"},
            {"id": 4, "sender": "bot", "content": "see plans", "timestamp": "2026-02-01T10:01:02Z"},
            {"id": 5, "sender": "user", "content": "thanks", "timestamp": "2026-02-01T10:02:00Z"}
        ]
    }))
    .into_response()
}

async fn subscription(State(state): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !record(&state, "/chatbot/subscription", &headers) {
        return unauthorized();
    }
    match id.as_str() {
        "42" => Json(json!({
            "subscription": {
                "plan_id": "pro", "name": "Pro", "duration_days": 30, "max_users": 500,
                "price": 49.99, "end_date": "2026-11-30T00:00:00Z"
            }
        }))
        .into_response(),
        "7" => Json(json!({ "subscription": null })).into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
    }
}

async fn renew(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&state, "/chatbot/renew", &headers) {
        return unauthorized();
    }
    state.lock().unwrap().renewals.push(json!({"id": id, "body": body}));
    Json(json!({"success": true})).into_response()
}

async fn get_config(State(state): State<Shared>, Path(_id): Path<String>, headers: HeaderMap) -> Response {
    if !record(&state, "/chatbot/config", &headers) {
        return unauthorized();
    }
    Json(json!({"greeting": "Hi there", "theme": "dark"})).into_response()
}

async fn put_config(
    State(state): State<Shared>,
    Path(_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !record(&state, "/chatbot/config", &headers) {
        return unauthorized();
    }
    Json(body).into_response()
}

async fn report(State(state): State<Shared>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    if !record(&state, "/report/download", &headers) {
        return unauthorized();
    }
    (
        [(header::CONTENT_TYPE, "application/pdf")],
        format!("%PDF-1.7 report for {}", id).into_bytes(),
    )
        .into_response()
}

async fn plans(State(state): State<Shared>, headers: HeaderMap) -> Response {
    if !record(&state, "/plans", &headers) {
        return unauthorized();
    }
    Json(json!([
        {"id": "starter", "name": "Starter", "duration_days": 30, "max_users": 50, "price": "9.00"},
        {"id": "pro", "name": "Pro", "duration_days": 30, "max_users": 500, "price": 49.99}
    ]))
    .into_response()
}
