pub mod health;
pub mod logs;
pub mod summary;

use serde::Deserialize;

/// Body of the three log endpoints.
#[derive(Debug, Deserialize)]
pub struct LogRequest {
    pub user: String,
    pub message: String,
    /// Client-side timestamp, written to the `Date` column as-is.
    pub timestamp: String,
}
