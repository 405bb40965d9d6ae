use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which agent tool produced a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    ClaudeCode,
    Codex,
    Pi,
}

impl SourceTag {
    pub const ALL: [SourceTag; 3] = [SourceTag::ClaudeCode, SourceTag::Codex, SourceTag::Pi];

    /// Serialized name, e.g. "claude_code"
    pub fn as_str(self) -> &'static str {
        match self {
            SourceTag::ClaudeCode => "claude_code",
            SourceTag::Codex => "codex",
            SourceTag::Pi => "pi",
        }
    }

    /// Human-readable name of the agent tool
    pub fn display_name(self) -> &'static str {
        match self {
            SourceTag::ClaudeCode => "Claude Code",
            SourceTag::Codex => "Codex",
            SourceTag::Pi => "Pi",
        }
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session source: {0:?}")]
pub struct ParseSourceError(pub String);

impl FromStr for SourceTag {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SourceTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| ParseSourceError(s.to_string()))
    }
}

/// Author of a normalized message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    /// Map a raw role string from a log record. Tool, system and developer
    /// roles have no counterpart and yield `None`.
    pub fn from_raw(role: &str) -> Option<Self> {
        match role {
            "user" => Some(MessageRole::User),
            "assistant" => Some(MessageRole::Assistant),
            _ => None,
        }
    }
}

/// Normalized message from session history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionMessage {
    pub role: MessageRole,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Lightweight session metadata for list views
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: String,
    #[serde(rename = "runner_type")]
    pub source: SourceTag,
    pub directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_prompt: Option<String>,
    pub last_activity: String,
    pub message_count: usize,
    pub is_running: bool,
}

/// Summary plus ordered message history (oldest first)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionDetail {
    #[serde(flatten)]
    pub summary: SessionSummary,
    #[serde(default)]
    pub messages: Vec<SessionMessage>,
}
