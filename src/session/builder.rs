//! Accumulates normalized messages while a session file is streamed.

use super::content::NormalizedContent;
use super::model::{MessageRole, SessionDetail, SessionMessage, SourceTag, SessionSummary};

/// Builds a session from records visited in file order.
///
/// Every accepted message bumps the count and the prompt fields, but only
/// the first `message_limit` are retained. A summary scan uses a limit of 0.
#[derive(Debug, Default)]
pub struct SessionBuilder {
    message_limit: usize,
    messages: Vec<SessionMessage>,
    message_count: usize,
    first_prompt: Option<String>,
    last_prompt: Option<String>,
    last_timestamp: Option<String>,
    started_at: Option<String>,
}

impl SessionBuilder {
    pub fn for_summary() -> Self {
        Self::default()
    }

    pub fn for_detail(message_limit: usize) -> Self {
        Self {
            message_limit,
            ..Self::default()
        }
    }

    pub fn with_limit(message_limit: Option<usize>) -> Self {
        message_limit.map_or_else(Self::for_summary, Self::for_detail)
    }

    /// Record the timestamp of any record, message or not
    pub fn observe_timestamp(&mut self, timestamp: Option<&str>) {
        if let Some(ts) = timestamp.filter(|ts| !ts.is_empty()) {
            self.last_timestamp = Some(ts.to_string());
        }
    }

    /// Record the session start time; the first value wins
    pub fn set_started_at(&mut self, timestamp: Option<&str>) {
        if self.started_at.is_none() {
            self.started_at = timestamp.filter(|ts| !ts.is_empty()).map(str::to_string);
        }
    }

    /// Accept a message. Returns false when the content is empty, in which
    /// case nothing is counted.
    pub fn push(
        &mut self,
        role: MessageRole,
        content: NormalizedContent,
        timestamp: Option<&str>,
    ) -> bool {
        if content.is_empty() {
            return false;
        }

        self.message_count += 1;
        if role == MessageRole::User && !content.text.trim().is_empty() {
            if self.first_prompt.is_none() {
                self.first_prompt = Some(content.text.clone());
            }
            self.last_prompt = Some(content.text.clone());
        }

        if self.messages.len() < self.message_limit {
            self.messages.push(SessionMessage {
                role,
                content: content.text,
                thinking: content.thinking,
                timestamp: timestamp.map(str::to_string),
            });
        }
        true
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    /// Finish the session. `fallback_activity` is consulted only when no
    /// record carried a timestamp.
    pub fn finish(
        self,
        id: String,
        source: SourceTag,
        directory: String,
        fallback_activity: impl FnOnce() -> String,
    ) -> SessionDetail {
        let last_activity = self
            .last_timestamp
            .or(self.started_at)
            .unwrap_or_else(fallback_activity);

        SessionDetail {
            summary: SessionSummary {
                id,
                source,
                directory,
                first_prompt: self.first_prompt,
                last_prompt: self.last_prompt,
                last_activity,
                message_count: self.message_count,
                is_running: false,
            },
            messages: self.messages,
        }
    }
}
