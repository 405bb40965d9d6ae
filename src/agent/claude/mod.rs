//! Claude Code session discovery.
//!
//! Sessions live at `~/.claude/projects/<encoded-project>/<session-id>.jsonl`.

mod path_conversion;
mod session;
mod types;

pub use path_conversion::{decode_project_path, encode_project_path};
pub use session::{
    collect_session_files, find_session_file, is_subagent_file, parse_session_file,
    ClaudeSessionFile,
};
pub use types::{ClaudeJsonlLine, ClaudeMessage};

use log::debug;
use std::path::PathBuf;

use super::{finish_listing, is_valid_session_id, SessionProvider};
use crate::config::Config;
use crate::process::{LivenessScanner, SourceScanner};
use crate::session::{SessionDetail, SessionSummary, SourceTag};

/// Provider for Claude Code sessions
pub struct ClaudeProvider {
    projects_dir: PathBuf,
    scanner: Box<dyn LivenessScanner>,
}

impl ClaudeProvider {
    pub fn new(projects_dir: impl Into<PathBuf>, scanner: Box<dyn LivenessScanner>) -> Self {
        Self {
            projects_dir: projects_dir.into(),
            scanner,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.claude_projects_dir.clone(),
            Box::new(SourceScanner::from_config(SourceTag::ClaudeCode, config)),
        )
    }
}

impl SessionProvider for ClaudeProvider {
    fn source(&self) -> SourceTag {
        SourceTag::ClaudeCode
    }

    fn list_sessions(&self, directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
        if !self.projects_dir.is_dir() {
            debug!("Claude projects directory does not exist: {:?}", self.projects_dir);
            return Vec::new();
        }

        let files = collect_session_files(&self.projects_dir);
        if files.is_empty() {
            return Vec::new();
        }

        let summaries = files
            .iter()
            .filter_map(|file| parse_session_file(file, None))
            .map(|detail| detail.summary);
        finish_listing(summaries, directory, self.scanner.as_ref(), limit)
    }

    fn session_detail(&self, session_id: &str, limit: usize) -> Option<SessionDetail> {
        if !is_valid_session_id(session_id) || !self.projects_dir.is_dir() {
            return None;
        }
        let file = find_session_file(&self.projects_dir, session_id)?;
        let mut detail = parse_session_file(&file, Some(limit))?;
        detail.summary.is_running = self.scanner.is_running(&detail.summary.id);
        Some(detail)
    }
}

/// List Claude Code sessions using environment configuration
pub fn list_claude_sessions(directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
    ClaudeProvider::from_config(&Config::from_env()).list_sessions(directory, limit)
}

/// Load one Claude Code session using environment configuration
pub fn get_claude_session_detail(session_id: &str, limit: usize) -> Option<SessionDetail> {
    ClaudeProvider::from_config(&Config::from_env()).session_detail(session_id, limit)
}
