//! One-sentence summarization of a user's recorded task rows.

use crate::error::PipelineError;
use crate::sheets::SheetRecord;

use super::CompletionClient;

const SYSTEM_PROMPT: &str =
    "Summarize the following tasks like what tasks done and status in a sentence";

/// Summarize task rows into one natural-language sentence.
///
/// Unlike extraction this propagates failures as
/// [`PipelineError::Completion`] — the report façade owns the user-facing
/// fallback text, so there is a single failure representation here.
pub async fn summarize(
    client: &CompletionClient,
    records: &[SheetRecord],
) -> Result<String, PipelineError> {
    let serialized = serde_json::to_string_pretty(records)?;
    let prompt = format!("Summarize these tasks:\n\n{serialized}");
    client.chat(SYSTEM_PROMPT, &prompt).await
}
