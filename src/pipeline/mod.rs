//! Pipeline façade — the two end-to-end flows.
//!
//! `log_message`: message → extractor → sheet append.
//! `build_report`: fetch → filter → summarize (or sentinel).
//! Each flow is one linear sequence of outbound calls, no fan-out.

use chrono::Local;
use serde_json::Value;
use tracing::{info, warn};

use crate::completion::{extract_tasks, summarize};
use crate::error::PipelineError;
use crate::report::{filter_records, Period};
use crate::sheets;
use crate::AppContext;

/// Returned when the filtered record set is empty; the summarizer is not called.
pub const NO_TASKS_SENTINEL: &str = "No tasks found.";

/// Returned when records exist but the summarizer call failed.
pub const SUMMARY_FALLBACK: &str = "Summary unavailable.";

/// Extract tasks from `message` and append the log row.
///
/// Extraction failures degrade to an empty task list (the row is still
/// written); store failures propagate. `date` of `None` lets the writer
/// stamp the current local time.
pub async fn log_message(
    ctx: &AppContext,
    user: &str,
    message: &str,
    date: Option<&str>,
) -> Result<Value, PipelineError> {
    let tasks = extract_tasks(&ctx.completion, message).await;
    info!(user, task_count = tasks.tasks.len(), "tasks extracted");
    sheets::append_row(&ctx.config, &ctx.http, user, message, &tasks, date).await
}

/// Fetch, filter, and summarize one user's recorded tasks.
///
/// Empty result set → [`NO_TASKS_SENTINEL`] without a summarizer call.
/// Summarizer failure → [`SUMMARY_FALLBACK`] (the façade owns the fallback
/// text; the summarizer itself only reports a typed error).
pub async fn build_report(
    ctx: &AppContext,
    user: &str,
    period: Period,
) -> Result<String, PipelineError> {
    let records = sheets::fetch_all(&ctx.config, &ctx.http).await?;
    let mine = filter_records(&records, user, period, Local::now().date_naive());
    info!(user, ?period, matched = mine.len(), "records filtered");

    if mine.is_empty() {
        return Ok(NO_TASKS_SENTINEL.to_string());
    }

    match summarize(&ctx.completion, &mine).await {
        Ok(summary) => Ok(summary),
        Err(e) => {
            warn!(user, err = %e, "summarizer failed — using fallback text");
            Ok(SUMMARY_FALLBACK.to_string())
        }
    }
}
