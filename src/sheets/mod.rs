//! Zoho Sheet API client — append rows, fetch worksheet content.
//!
//! The API multiplexes operations through a form-encoded `method` parameter
//! on a single POST endpoint, authenticated with a `Zoho-oauthtoken` header.
//! A fresh access token is fetched per call (see `auth`).

pub mod schema;

pub use schema::{SheetRecord, SheetSchema};

use chrono::Local;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth;
use crate::completion::TaskList;
use crate::config::Config;
use crate::error::PipelineError;

/// Format used when this system writes the `Date` cell. The read path
/// parses the store-native display format instead (see `report`) — the
/// store reformats cell values between write and read.
pub const DATE_WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ─── Wire types (worksheet.content.get) ───────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    range_details: Vec<RowDetails>,
}

#[derive(Debug, Deserialize)]
struct RowDetails {
    #[serde(default)]
    row_details: Vec<Cell>,
}

/// One cell of a fetched row. `column_index` is 1-based.
#[derive(Debug, Clone, Deserialize)]
pub struct Cell {
    pub column_index: usize,
    #[serde(default)]
    pub content: String,
}

// ─── Append ───────────────────────────────────────────────────────────────────

/// Serialize one log row as the `json_data` form value.
fn row_json_data(user: &str, message: &str, tasks: &TaskList, date: &str) -> Result<String, serde_json::Error> {
    let row = json!([{
        "User": user,
        "Message": message,
        "Tasks": serde_json::to_string(tasks)?,
        "Date": date,
    }]);
    serde_json::to_string(&row)
}

/// Append one log row to the configured worksheet.
///
/// `date` falls back to the current local time in [`DATE_WRITE_FORMAT`].
/// Returns the store's parsed JSON ack verbatim. A non-JSON ack is a *soft*
/// failure — the append may still have landed server-side — so it yields
/// `{"status":"error","raw_response":<text>}` rather than an error.
pub async fn append_row(
    config: &Config,
    http: &reqwest::Client,
    user: &str,
    message: &str,
    tasks: &TaskList,
    date: Option<&str>,
) -> Result<Value, PipelineError> {
    let token = auth::fetch_access_token(config, http).await?;

    let date = match date {
        Some(d) if !d.is_empty() => d.to_string(),
        _ => Local::now().format(DATE_WRITE_FORMAT).to_string(),
    };
    let json_data = row_json_data(user, message, tasks, &date)?;

    let params = [
        ("method", "worksheet.jsondata.append"),
        ("worksheet_name", config.worksheet_name.as_str()),
        ("json_data", json_data.as_str()),
    ];

    let resp = http
        .post(config.sheet_url())
        .header("Authorization", token.authorization_header())
        .form(&params)
        .send()
        .await?;

    let text = resp.text().await?;
    match serde_json::from_str::<Value>(&text) {
        Ok(ack) => {
            info!(user, "row appended");
            Ok(ack)
        }
        Err(_) => {
            // The write's outcome is unknown here — do not treat as "no write".
            warn!(user, "non-JSON append ack from store");
            Ok(json!({ "status": "error", "raw_response": text }))
        }
    }
}

// ─── Fetch ────────────────────────────────────────────────────────────────────

/// Fetch every row of the configured worksheet as header-keyed records.
///
/// The first returned row is the header; it becomes the [`SheetSchema`] that
/// maps each later row's 1-based cell indices to column names. Row order is
/// preserved as returned by the store (append order). A missing or empty
/// header fails fast with [`PipelineError::StoreShape`].
pub async fn fetch_all(
    config: &Config,
    http: &reqwest::Client,
) -> Result<Vec<SheetRecord>, PipelineError> {
    let token = auth::fetch_access_token(config, http).await?;

    let params = [
        ("method", "worksheet.content.get"),
        ("worksheet_name", config.worksheet_name.as_str()),
    ];

    let body: ContentResponse = http
        .post(config.sheet_url())
        .header("Authorization", token.authorization_header())
        .form(&params)
        .send()
        .await?
        .json()
        .await
        .map_err(|e| PipelineError::StoreShape(format!("unreadable content reply: {e}")))?;

    let mut rows = body.range_details.into_iter();
    let header = rows
        .next()
        .ok_or_else(|| PipelineError::StoreShape("worksheet returned no rows (no header)".to_string()))?;
    let schema = SheetSchema::from_header(&header.row_details)?;

    let records: Vec<SheetRecord> = rows.map(|row| schema.record_from_row(&row.row_details)).collect();
    info!(rows = records.len(), "worksheet fetched");
    Ok(records)
}
