//! Discover and inspect local AI coding agent sessions.
//!
//! Claude Code, Codex and Pi each keep their conversation history as JSONL
//! files under the user's home directory. This crate lists those sessions
//! in one uniform shape, flags the ones whose agent process is still alive,
//! and loads full message history for a single session.

pub mod agent;
pub mod config;
pub mod logging;
pub mod process;
pub mod session;

#[cfg(test)]
mod tests;

pub use agent::claude::{get_claude_session_detail, list_claude_sessions, ClaudeProvider};
pub use agent::codex::{get_codex_session_detail, list_codex_sessions, CodexProvider};
pub use agent::pi::{get_pi_session_detail, list_pi_sessions, PiProvider};
pub use agent::{
    discover_sessions, get_session_detail, SessionCatalog, SessionProvider, DEFAULT_DETAIL_LIMIT,
    DEFAULT_LIST_LIMIT,
};
pub use config::{Config, ProcessSource};
pub use process::{
    find_running_claude_sessions, find_running_codex_sessions, find_running_pi_sessions,
    is_claude_session_running, is_codex_session_running, is_pi_session_running, LivenessScanner,
    ProcessTable, ScanError,
};
pub use session::{
    normalize_directory_path, MessageRole, SessionDetail, SessionMessage, SessionSummary,
    SourceTag,
};
