//! Pi coding agent session discovery
//!
//! Pi stores one JSONL file per session at
//! `~/.pi/agent/sessions/--<encoded-cwd>--/<timestamp>_<session-id>.jsonl`.

mod path_conversion;
mod session;
mod types;

pub use path_conversion::{decode_directory_name, encode_directory_name};
pub use session::{
    collect_session_files, find_session_file, parse_session_file, session_id_from_file_name,
    PiSessionFile,
};
pub use types::{PiJsonlLine, PiMessage};

use log::debug;
use std::path::PathBuf;

use super::{finish_listing, is_valid_session_id, SessionProvider};
use crate::config::Config;
use crate::process::{LivenessScanner, SourceScanner};
use crate::session::{SessionDetail, SessionSummary, SourceTag};

/// Provider for Pi sessions
pub struct PiProvider {
    sessions_dir: PathBuf,
    scanner: Box<dyn LivenessScanner>,
}

impl PiProvider {
    pub fn new(sessions_dir: impl Into<PathBuf>, scanner: Box<dyn LivenessScanner>) -> Self {
        Self {
            sessions_dir: sessions_dir.into(),
            scanner,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.pi_sessions_dir.clone(),
            Box::new(SourceScanner::from_config(SourceTag::Pi, config)),
        )
    }
}

impl SessionProvider for PiProvider {
    fn source(&self) -> SourceTag {
        SourceTag::Pi
    }

    fn list_sessions(&self, directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
        if !self.sessions_dir.is_dir() {
            debug!("Pi sessions directory does not exist: {:?}", self.sessions_dir);
            return Vec::new();
        }

        let files = collect_session_files(&self.sessions_dir);
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
        if !is_valid_session_id(session_id) || !self.sessions_dir.is_dir() {
            return None;
        }
        let file = find_session_file(&self.sessions_dir, session_id)?;
        let mut detail = parse_session_file(&file, Some(limit))?;
        detail.summary.is_running = self.scanner.is_running(&detail.summary.id);
        Some(detail)
    }
}

/// List Pi sessions using environment configuration
pub fn list_pi_sessions(directory: Option<&str>, limit: usize) -> Vec<SessionSummary> {
    PiProvider::from_config(&Config::from_env()).list_sessions(directory, limit)
}

/// Load one Pi session using environment configuration
pub fn get_pi_session_detail(session_id: &str, limit: usize) -> Option<SessionDetail> {
    PiProvider::from_config(&Config::from_env()).session_detail(session_id, limit)
}
