//! Typed errors for the log/report pipelines.
//!
//! Only *fatal* conditions are modeled here. Recoverable conditions —
//! unparseable extraction replies, non-JSON write acks — are degraded
//! in place by their components and never surface as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The identity provider's reply carried no access token
    /// (expired/invalid refresh token, revoked client). Fatal for the
    /// current operation, never retried.
    #[error("identity provider rejected the refresh grant: {detail}")]
    Auth { detail: String },

    /// The completion service failed at transport level or returned a
    /// reply without a usable choice. The extractor swallows this; the
    /// summarizer propagates it and the façade picks the fallback text.
    #[error("completion service failure: {0}")]
    Completion(String),

    /// The sheet read payload was missing or malformed (no header row,
    /// unexpected shape). Fail fast rather than return a partial record set.
    #[error("malformed sheet payload: {0}")]
    StoreShape(String),

    /// Transport failure talking to the sheet API.
    #[error("sheet request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Row serialization failure (should not occur for well-formed tasks).
    #[error("row serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
