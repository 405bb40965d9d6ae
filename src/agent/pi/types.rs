//! Pi session JSONL records.

use serde::Deserialize;

use crate::session::MessageContent;

/// One line of a Pi session file. The `session` header carries id/cwd,
/// `message` lines carry a message.
#[derive(Debug, Deserialize)]
pub struct PiJsonlLine {
    #[serde(rename = "type")]
    pub line_type: Option<String>,
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
    pub message: Option<PiMessage>,
}

#[derive(Debug, Deserialize)]
pub struct PiMessage {
    pub role: Option<String>,
    pub content: Option<MessageContent>,
}
