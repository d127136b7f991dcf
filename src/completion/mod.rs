//! Chat-completion client shared by the task extractor and the summarizer.
//!
//! One request shape (`{model, temperature, messages}`), one reply shape
//! (first choice's message content). Temperature is pinned to 0 — both
//! callers want deterministic, instruction-following output.

pub mod extract;
pub mod summarize;

pub use extract::{extract_tasks, TaskList, TaskRecord};
pub use summarize::summarize;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::PipelineError;

// ─── Wire types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

// ─── Client ───────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            url: config.completion_url.clone(),
            api_key: config.groq_api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Send one system+user prompt pair and return the first choice's content.
    ///
    /// All failure modes (transport, non-JSON reply, empty choices) collapse
    /// into [`PipelineError::Completion`] — callers decide whether that is
    /// recoverable.
    pub async fn chat(&self, system: &str, user: &str) -> Result<String, PipelineError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: 0.0,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
        };

        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Completion(format!("transport: {e}")))?;

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| PipelineError::Completion(format!("non-JSON reply: {e}")))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| PipelineError::Completion("reply carried no choices".to_string()))
    }
}
