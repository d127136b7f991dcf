//! Task extraction — free-text work update in, structured task list out.
//!
//! Extraction never fails: any transport or parse problem degrades to an
//! empty `TaskList` with a `warn!`, so the log pipeline always proceeds to
//! the write stage. The model's `type` strings are accepted verbatim.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::CompletionClient;

const SYSTEM_PROMPT: &str = "Extract work tasks from text. Return STRICT JSON only.";

/// One extracted task. `type` is whatever the model chose to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub task: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Ordered task list. The `tasks` key is always present — extraction
/// failures degrade to an empty list, never to a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<TaskRecord>,
}

impl TaskList {
    /// Synthetic single-task list used by the raw save path, which bypasses
    /// the extractor entirely: `{"tasks":[{"task":<message>,"type":"general"}]}`.
    pub fn single_general(message: &str) -> Self {
        Self {
            tasks: vec![TaskRecord {
                task: message.to_string(),
                kind: "general".to_string(),
            }],
        }
    }
}

fn user_prompt(message: &str) -> String {
    format!(
        "Extract tasks from this text and return JSON only:\n\n\
         Text: \"{message}\"\n\n\
         Format:\n\
         {{\n\"tasks\": [\n    {{\"task\": \"...\", \"type\": \"...\"}}\n]\n}}"
    )
}

/// Extract structured tasks from a free-text message. Never fails.
pub async fn extract_tasks(client: &CompletionClient, message: &str) -> TaskList {
    let content = match client.chat(SYSTEM_PROMPT, &user_prompt(message)).await {
        Ok(content) => content,
        Err(e) => {
            warn!(err = %e, "task extraction call failed — returning empty task list");
            return TaskList::default();
        }
    };

    match parse_task_reply(&content) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(err = %e, reply = %content, "unparseable extraction reply — returning empty task list");
            TaskList::default()
        }
    }
}

/// Parse a model reply into a `TaskList`. Tolerates a surrounding markdown
/// code fence (models add one despite the STRICT JSON instruction).
pub(crate) fn parse_task_reply(content: &str) -> Result<TaskList, serde_json::Error> {
    serde_json::from_str(strip_code_fence(content))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
