//! Liveness handler — `GET /health`.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health`
///
/// Returns `{"status":"ok"}` without touching storage, so deployment probes
/// stay green even while the database is unavailable.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
