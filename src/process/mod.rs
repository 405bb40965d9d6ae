//! Best-effort liveness detection for agent sessions.
//!
//! A [`ProcessTable`] yields one command line per running process. The
//! per-source signature matchers in [`signature`] turn those lines into
//! session identifiers, and [`SourceScanner`] glues the two together behind
//! the [`LivenessScanner`] seam that providers consume.

mod command;
mod running;
pub mod signature;
mod system;

use std::process::ExitStatus;
use std::time::Duration;

pub use command::PsCommand;
pub use running::{
    find_running_claude_sessions, find_running_codex_sessions, find_running_pi_sessions,
    is_claude_session_running, is_codex_session_running, is_pi_session_running, LivenessScanner,
    SourceScanner,
};
pub use signature::{match_running_sessions, scan_claude_lines, scan_codex_lines, scan_pi_lines};
pub use system::NativeProcessTable;

/// Why a process table snapshot could not be taken
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} did not finish within {timeout:?}")]
    Timeout { program: String, timeout: Duration },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: ExitStatus },
    #[error("failed to collect {program} output: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Source of process command lines
pub trait ProcessTable: Send + Sync {
    /// One line per running process. The line must contain the process
    /// command and its arguments separated by whitespace.
    fn command_lines(&self) -> Result<Vec<String>, ScanError>;
}
