// rest/routes/summary.rs — report route.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::pipeline;
use crate::report::Period;
use crate::rest::error_response;
use crate::AppContext;

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub user: String,
    /// Report scope: "today" or anything else for unrestricted.
    #[serde(rename = "type")]
    pub period: String,
}

pub async fn summary(
    State(ctx): State<Arc<AppContext>>,
    Json(body): Json<SummaryRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    info!(user = %body.user, period = %body.period, "summary requested");
    match pipeline::build_report(&ctx, &body.user, Period::parse(&body.period)).await {
        Ok(summary) => Ok(Json(json!({ "user": body.user, "summary": summary }))),
        Err(e) => Err(error_response(e)),
    }
}
