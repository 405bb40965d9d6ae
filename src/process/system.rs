//! Native process enumeration through sysinfo.
//!
//! Produces the same one-line-per-process shape as `ps`, built from each
//! process's argument vector, so the signature matchers work unchanged.

use std::sync::Mutex;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System, UpdateKind};

use super::{ProcessTable, ScanError};

pub struct NativeProcessTable {
    system: Mutex<System>,
}

fn refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::new().with_cmd(UpdateKind::Always)
}

impl NativeProcessTable {
    pub fn new() -> Self {
        log::debug!("Initializing System instance for process monitoring");
        Self {
            system: Mutex::new(System::new_with_specifics(
                RefreshKind::new().with_processes(refresh_kind()),
            )),
        }
    }
}

impl Default for NativeProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessTable for NativeProcessTable {
    fn command_lines(&self) -> Result<Vec<String>, ScanError> {
        let mut system = self.system.lock().unwrap_or_else(|e| e.into_inner());
        system.refresh_processes_specifics(ProcessesToUpdate::All, refresh_kind());

        let lines: Vec<String> = system
            .processes()
            .values()
            .filter_map(|process| {
                let cmd = process.cmd();
                if cmd.is_empty() {
                    return None;
                }
                Some(
                    cmd.iter()
                        .map(|arg| arg.to_string_lossy())
                        .collect::<Vec<_>>()
                        .join(" "),
                )
            })
            .collect();

        log::trace!("Total system processes with a command line: {}", lines.len());
        Ok(lines)
    }
}
