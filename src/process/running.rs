//! Running-session sets per source.

use log::debug;
use std::collections::HashSet;

use super::signature::match_running_sessions;
use super::ProcessTable;
use crate::config::Config;
use crate::session::SourceTag;

/// Set of session identifiers whose agent process is alive right now
pub trait LivenessScanner: Send + Sync {
    /// Take a fresh snapshot. Failures yield an empty set.
    fn running_sessions(&self) -> HashSet<String>;

    fn is_running(&self, session_id: &str) -> bool {
        self.running_sessions().contains(session_id)
    }
}

/// Applies one source's signature to a process table
pub struct SourceScanner {
    source: SourceTag,
    table: Box<dyn ProcessTable>,
}

impl SourceScanner {
    pub fn new(source: SourceTag, table: Box<dyn ProcessTable>) -> Self {
        Self { source, table }
    }

    pub fn from_config(source: SourceTag, config: &Config) -> Self {
        Self::new(source, config.process_table())
    }
}

impl LivenessScanner for SourceScanner {
    fn running_sessions(&self) -> HashSet<String> {
        match self.table.command_lines() {
            Ok(lines) => {
                let running = match_running_sessions(self.source, &lines);
                debug!(
                    "{}: found {} running sessions",
                    self.source.display_name(),
                    running.len()
                );
                running
            }
            Err(err) => {
                debug!(
                    "{}: process scan failed, treating nothing as running: {}",
                    self.source.display_name(),
                    err
                );
                HashSet::new()
            }
        }
    }
}

fn scan_from_env(source: SourceTag) -> HashSet<String> {
    SourceScanner::from_config(source, &Config::from_env()).running_sessions()
}

/// Claude Code session IDs with a live `claude --resume <id>` process
pub fn find_running_claude_sessions() -> HashSet<String> {
    scan_from_env(SourceTag::ClaudeCode)
}

/// Codex session IDs with a live `codex resume <id>` process
pub fn find_running_codex_sessions() -> HashSet<String> {
    scan_from_env(SourceTag::Codex)
}

/// Pi session IDs found on a live pi process command line
pub fn find_running_pi_sessions() -> HashSet<String> {
    scan_from_env(SourceTag::Pi)
}

pub fn is_claude_session_running(session_id: &str) -> bool {
    find_running_claude_sessions().contains(session_id)
}

pub fn is_codex_session_running(session_id: &str) -> bool {
    find_running_codex_sessions().contains(session_id)
}

pub fn is_pi_session_running(session_id: &str) -> bool {
    find_running_pi_sessions().contains(session_id)
}
