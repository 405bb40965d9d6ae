//! Storage roots and scan settings, resolved from the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::process::{NativeProcessTable, ProcessTable, PsCommand};

/// Claude Code config home; sessions live under `<dir>/projects`
pub const CLAUDE_CONFIG_DIR_ENV: &str = "CLAUDE_CONFIG_DIR";
/// Codex home; sessions live under `<dir>/sessions`
pub const CODEX_HOME_ENV: &str = "CODEX_HOME";
/// Pi sessions directory itself
pub const PI_SESSIONS_DIR_ENV: &str = "PI_SESSIONS_DIR";
/// `ps` (default) or `native`
pub const PROCESS_SOURCE_ENV: &str = "AGENT_SESSIONS_PROCESS_SOURCE";
/// Process listing timeout in milliseconds
pub const PS_TIMEOUT_ENV: &str = "AGENT_SESSIONS_PS_TIMEOUT_MS";

/// How running processes are enumerated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessSource {
    /// Shell out to `ps aux`
    #[default]
    Ps,
    /// Enumerate processes through sysinfo
    Native,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub claude_projects_dir: PathBuf,
    pub codex_sessions_dir: PathBuf,
    pub pi_sessions_dir: PathBuf,
    pub process_source: ProcessSource,
    pub ps_timeout: Duration,
}

impl Config {
    /// Resolve from process environment variables and the user's home directory
    pub fn from_env() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::resolve(&home, |key| std::env::var(key).ok())
    }

    /// Resolve against an explicit home directory and variable lookup
    pub fn resolve(home: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let claude_home = var(CLAUDE_CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".claude"));
        let codex_home = var(CODEX_HOME_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".codex"));
        let pi_sessions_dir = var(PI_SESSIONS_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".pi").join("agent").join("sessions"));

        let process_source = match var(PROCESS_SOURCE_ENV).as_deref() {
            Some("native") => ProcessSource::Native,
            Some("ps") | None => ProcessSource::Ps,
            Some(other) => {
                log::warn!("Unknown process source {:?}, using ps", other);
                ProcessSource::Ps
            }
        };

        let ps_timeout = var(PS_TIMEOUT_ENV)
            .and_then(|ms| match ms.parse::<u64>() {
                Ok(ms) => Some(Duration::from_millis(ms)),
                Err(err) => {
                    log::warn!("Ignoring invalid {}={:?}: {}", PS_TIMEOUT_ENV, ms, err);
                    None
                }
            })
            .unwrap_or(PsCommand::DEFAULT_TIMEOUT);

        Self {
            claude_projects_dir: claude_home.join("projects"),
            codex_sessions_dir: codex_home.join("sessions"),
            pi_sessions_dir,
            process_source,
            ps_timeout,
        }
    }

    /// Build the process table selected by this config
    pub fn process_table(&self) -> Box<dyn ProcessTable> {
        match self.process_source {
            ProcessSource::Ps => Box::new(PsCommand::new(self.ps_timeout)),
            ProcessSource::Native => Box::new(NativeProcessTable::new()),
        }
    }
}
