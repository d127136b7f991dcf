// rest/mod.rs — Public HTTP API server.
//
// Thin axum shim over the pipeline façade.
//
// Endpoints:
//   GET  /             — liveness probe
//   POST /extract-log  — extraction only, no persistence
//   POST /save-log     — raw save (synthetic single task, bypasses extractor)
//   POST /datatosheet  — full extract-then-write flow
//   POST /summary      — report flow

pub mod routes;

use anyhow::Result;
use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::PipelineError;
use crate::AppContext;

pub async fn start_server(ctx: Arc<AppContext>) -> Result<()> {
    let bind = format!("{}:{}", ctx.config.bind_address, ctx.config.port);
    let addr: SocketAddr = bind.parse()?;

    let router = build_router(ctx);

    info!("HTTP API listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(routes::health::home))
        .route("/extract-log", post(routes::logs::extract_log))
        .route("/save-log", post(routes::logs::save_log))
        .route("/datatosheet", post(routes::logs::data_to_sheet))
        .route("/summary", post(routes::summary::summary))
        .layer(CorsLayer::permissive())
        .with_state(ctx)
}

/// Map a pipeline failure to an HTTP error payload.
///
/// Auth, store-shape, and transport failures are upstream faults — 502.
/// Recovered conditions never reach this point (they produce best-effort
/// 200 payloads inside the pipeline).
pub(crate) fn error_response(e: PipelineError) -> (StatusCode, Json<Value>) {
    warn!(err = %e, "request failed");
    (StatusCode::BAD_GATEWAY, Json(json!({ "error": e.to_string() })))
}
