// rest/routes/health.rs — liveness probe.

use axum::Json;
use serde_json::{json, Value};

pub async fn home() -> Json<Value> {
    Json(json!({ "status": "Backend is running" }))
}
