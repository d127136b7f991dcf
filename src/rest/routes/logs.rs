// rest/routes/logs.rs — log ingestion routes.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::completion::{extract_tasks, TaskList};
use crate::pipeline;
use crate::rest::error_response;
use crate::sheets;
use crate::AppContext;

use super::LogRequest;

/// Extraction only — nothing is persisted.
pub async fn extract_log(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LogRequest>,
) -> Json<Value> {
    let tasks = extract_tasks(&ctx.completion, &body.message).await;
    Json(json!({ "user": body.user, "tasks": tasks }))
}

/// Raw save — writes a synthetic single-task record without calling the
/// extractor at all.
pub async fn save_log(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LogRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let tasks = TaskList::single_general(&body.message);
    match sheets::append_row(
        &ctx.config,
        &ctx.http,
        &body.user,
        &body.message,
        &tasks,
        Some(&body.timestamp),
    )
    .await
    {
        Ok(ack) => Ok(Json(json!({ "status": "saved", "zoho_response": ack }))),
        Err(e) => Err(error_response(e)),
    }
}

/// Full extract-then-write flow.
pub async fn data_to_sheet(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<LogRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(user = %body.user, "log message received");
    match pipeline::log_message(&ctx, &body.user, &body.message, Some(&body.timestamp)).await {
        Ok(ack) => Ok(Json(json!({ "status": "saved", "zoho_response": ack }))),
        Err(e) => Err(error_response(e)),
    }
}
