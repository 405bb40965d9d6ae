//! Codex session discovery.
//!
//! This module parses Codex rollout files stored at
//! `~/.codex/sessions/YYYY/MM/DD/rollout-<timestamp>-<session-id>.jsonl`.

mod session;
mod types;

pub use session::{collect_session_files, find_session_file, parse_session_file, session_id_from_file_name};
pub use types::{
    CodexContent, CodexJsonlLine, CodexRecord, MessagePayload, ReasoningPayload,
    ResponseItemPayload, SessionMetaPayload, TurnContextPayload,
};

use log::debug;
use std::path::PathBuf;

use super::{finish_listing, is_valid_session_id, SessionProvider};
use crate::config::Config;
use crate::process::{LivenessScanner, SourceScanner};
use crate::session::{SessionDetail, SessionSummary, SourceTag};

/// Provider for Codex sessions.
pub struct CodexProvider {
    sessions_dir: PathBuf,
    scanner: Box<dyn LivenessScanner>,
}

impl CodexProvider {
    pub fn new(sessions_dir: impl Into<PathBuf>, scanner: Box<dyn LivenessScanner>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
            scanner,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.codex_sessions_dir.clone(),
            Box::new(SourceScanner::from_config(SourceTag::Codex, config)),
        )
    }
}

impl SessionProvider for CodexProvider {
    fn source(&self) -> SourceTag {
        SourceTag::Codex
    }

    fn list_sessions(&self, directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
        if !self.sessions_dir.is_dir() {
            debug!("Codex sessions directory does not exist: {:?}", self.sessions_dir);
            return Vec::new();
        }

        let files = collect_session_files(&self.sessions_dir);
        if files.is_empty() {
            return Vec::new();
        }

        let summaries = files
            .iter()
            .filter_map(|path| parse_session_file(path, None))
            .map(|detail| detail.summary);
        finish_listing(summaries, directory, self.scanner.as_ref(), limit)
    }

    fn session_detail(&self, session_id: &str, limit: usize) -> Option<SessionDetail> {
        if !is_valid_session_id(session_id) || !self.sessions_dir.is_dir() {
            return None;
        }
        let path = find_session_file(&self.sessions_dir, session_id)?;
        let mut detail = parse_session_file(&path, Some(limit))?;
        detail.summary.is_running = self.scanner.is_running(&detail.summary.id);
        Some(detail)
    }
}

/// List Codex sessions using environment configuration.
pub fn list_codex_sessions(directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
    CodexProvider::from_config(&Config::from_env()).list_sessions(directory, limit)
}

/// Load one Codex session using environment configuration.
pub fn get_codex_session_detail(session_id: &str, limit: usize) -> Option<SessionDetail> {
    CodexProvider::from_config(&Config::from_env()).session_detail(session_id, limit)
}
