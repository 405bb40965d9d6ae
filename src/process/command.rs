//! Process listing by running `ps`.

use log::trace;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::{ProcessTable, ScanError};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs a process-listing command and returns its stdout lines
#[derive(Debug, Clone)]
pub struct PsCommand {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl PsCommand {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// `ps aux` with the given timeout
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("ps", ["aux"], timeout)
    }

    /// Any listing command. The output must have one process per line.
    pub fn with_program<I, S>(program: impl Into<String>, args: I, timeout: Duration) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }
}

impl Default for PsCommand {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TIMEOUT)
    }
}

impl ProcessTable for PsCommand {
    fn command_lines(&self) -> Result<Vec<String>, ScanError> {
        let io_error = |source: std::io::Error| ScanError::Io {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ScanError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // stdout is drained concurrently; a full pipe would block the child.
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| io_error(std::io::Error::other("stdout was not captured")))?;
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).map(|_| buf)
        });

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if Instant::now() >= deadline => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ScanError::Timeout {
                        program: self.program.clone(),
                        timeout: self.timeout,
                    });
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    let _ = child.kill();
                    return Err(io_error(err));
                }
            }
        };

        if !status.success() {
            return Err(ScanError::Failed {
                program: self.program.clone(),
                status,
            });
        }

        let output = reader
            .join()
            .map_err(|_| io_error(std::io::Error::other("output reader panicked")))?
            .map_err(io_error)?;

        let lines: Vec<String> = String::from_utf8_lossy(&output)
            .lines()
            .map(str::to_string)
            .collect();
        trace!("{} listed {} lines", self.program, lines.len());
        Ok(lines)
    }
}
