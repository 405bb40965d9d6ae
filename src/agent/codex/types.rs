//! Data structures for Codex conversation parsing.

use serde::Deserialize;

use crate::session::MessageContent;

/// A single line in a Codex JSONL session file.
#[derive(Debug, Deserialize)]
pub struct CodexJsonlLine {
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub record: CodexRecord,
}

/// Record body, keyed by the line's `type`.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CodexRecord {
    SessionMeta { payload: SessionMetaPayload },
    TurnContext { payload: TurnContextPayload },
    ResponseItem { payload: ResponseItemPayload },
    /// `event_msg`, `compacted` and anything newer
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct SessionMetaPayload {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
}

/// Per-turn settings. `summary` here is the reasoning summary mode
/// (e.g. "auto"), unrelated to reasoning summary text.
#[derive(Debug, Deserialize)]
pub struct TurnContextPayload {
    pub cwd: Option<String>,
    pub model: Option<String>,
    pub effort: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseItemPayload {
    Message(MessagePayload),
    Reasoning(ReasoningPayload),
    /// Tool calls, tool output and snapshots
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    pub role: Option<String>,
    pub content: Option<MessageContent>,
}

#[derive(Debug, Deserialize)]
pub struct ReasoningPayload {
    #[serde(default)]
    pub summary: Vec<CodexContent>,
}

/// Content within a Codex reasoning summary.
#[derive(Debug, Deserialize)]
pub struct CodexContent {
    #[serde(rename = "type", default)]
    pub content_type: String,
    pub text: Option<String>,
}
