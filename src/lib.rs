pub mod auth;
pub mod completion;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod rest;
pub mod sheets;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use completion::CompletionClient;
use config::Config;

/// Shared application state passed to every route handler.
///
/// Everything here is read-only after startup — concurrent requests share
/// it through `Arc` without locking.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// Outbound HTTP client, bounded timeout, shared across all calls.
    pub http: reqwest::Client,
    /// Chat-completion client used by the extractor and the summarizer.
    pub completion: CompletionClient,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Arc<Self>> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let completion = CompletionClient::new(&config, http.clone());
        Ok(Arc::new(Self {
            config: Arc::new(config),
            http,
            completion,
        }))
    }
}
