//! In-process mock of the scoring service, for tests

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use crate::constants::API_KEY_HEADER;

pub const MODEL_VERSION: &str = "mock_xgb_v1";

#[derive(Debug, Default)]
struct Recorded {
    score_bodies: Vec<Value>,
    explain_bodies: Vec<Value>,
    api_keys: Vec<Option<String>>,
    fail_status: Option<u16>,
}

/// Shared handle: clone it before spawning to inspect what the service saw
#[derive(Debug, Clone, Default)]
pub struct MockService {
    recorded: Arc<Mutex<Recorded>>,
}

impl MockService {
    /// Answer every POST with this status from now on
    pub fn fail_with(&self, status: u16) {
        self.recorded.lock().unwrap().fail_status = Some(status);
    }

    pub fn last_score_body(&self) -> Option<Value> {
        self.recorded.lock().unwrap().score_bodies.last().cloned()
    }

    pub fn last_explain_body(&self) -> Option<Value> {
        self.recorded.lock().unwrap().explain_bodies.last().cloned()
    }

    pub fn api_keys(&self) -> Vec<Option<String>> {
        self.recorded.lock().unwrap().api_keys.clone()
    }

    /// Record the call; `Some(status)` when the call must fail
    fn observe(&self, headers: &HeaderMap) -> Option<StatusCode> {
        let mut recorded = self.recorded.lock().unwrap();
        let key = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        recorded.api_keys.push(key);
        recorded
            .fail_status
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}

/// Probability rises with the amount, enough to hit every tier
fn score_body(body: &Value) -> Value {
    let amount = body.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
    let (probability, level) = if amount >= 250_000.0 {
        (0.91, "high")
    } else if amount >= 10_000.0 {
        (0.4, "medium")
    } else {
        (0.05, "low")
    };
    json!({
        "fraud_probability": probability,
        "risk_level": level,
        "model_version": MODEL_VERSION,
    })
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn score(
    State(service): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = service.observe(&headers) {
        return status.into_response();
    }
    let response = score_body(&body);
    service.recorded.lock().unwrap().score_bodies.push(body);
    Json(response).into_response()
}

async fn score_batch(
    State(service): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = service.observe(&headers) {
        return status.into_response();
    }
    let results: Vec<Value> = body["items"]
        .as_array()
        .map(|items| items.iter().map(score_body).collect())
        .unwrap_or_default();
    Json(json!({ "results": results })).into_response()
}

async fn explain(
    State(service): State<MockService>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(status) = service.observe(&headers) {
        return status.into_response();
    }
    let level = body["risk_level"].as_str().unwrap_or("unknown").to_string();
    let response = json!({
        "fraud_probability": body["fraud_probability"],
        "risk_level": level,
        "explanation": format!("The {} tier is driven by the transfer amount.", level),
    });
    service.recorded.lock().unwrap().explain_bodies.push(body);
    Json(response).into_response()
}

/// Bind to an ephemeral port and serve in the background. Returns the base URL.
pub async fn spawn(service: MockService) -> String {
    let app = Router::new()
        .route("/", get(health))
        .route("/api/v1/score_transaction", post(score))
        .route("/api/v1/score_batch", post(score_batch))
        .route("/api/v1/explain_transaction", post(explain))
        .with_state(service);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
