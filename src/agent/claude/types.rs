//! Data structures for Claude Code JSONL parsing.

use serde::Deserialize;

use crate::session::MessageContent;

/// A single line in a Claude Code session file
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeJsonlLine {
    #[serde(rename = "type")]
    pub line_type: Option<String>,
    pub session_id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
    /// Harness-injected lines such as local command caveats
    #[serde(default)]
    pub is_meta: bool,
    pub message: Option<ClaudeMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ClaudeMessage {
    pub role: Option<String>,
    pub content: Option<MessageContent>,
}
