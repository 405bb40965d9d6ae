use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Set to a non-empty value other than "0" to log to a file
pub const DEBUG_LOG_ENV: &str = "AGENT_SESSIONS_DEBUG_LOG";

struct FileLogger {
    file: Mutex<Option<File>>,
    log_path: PathBuf,
}

impl FileLogger {
    fn new() -> Self {
        Self::open(get_log_path())
    }

    fn open(log_path: PathBuf) -> Self {
        // Truncate on startup
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_path)
            .ok();

        FileLogger {
            file: Mutex::new(file),
            log_path,
        }
    }

    fn write_record(&self, record: &Record) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let level = record.level();
        let target = record.target();
        let message = record.args();

        let log_line = format!("[{timestamp}] [{level:5}] [{target}] {message}\n");

        if let Ok(mut guard) = self.file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.write_all(log_line.as_bytes());
                let _ = file.flush();
            }
        }
    }
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_record(record);
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.file.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

fn get_log_path() -> PathBuf {
    get_log_dir().join("debug.log")
}

fn get_log_dir() -> PathBuf {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agent-sessions");
    let _ = std::fs::create_dir_all(&log_dir);
    log_dir
}

static LOGGER: OnceLock<FileLogger> = OnceLock::new();
static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize logging.
///
/// With `AGENT_SESSIONS_DEBUG_LOG` set, debug output goes to
/// [`log_file_path`]. Otherwise `env_logger` writes to stderr, filtered by
/// `RUST_LOG`. Calling this more than once is a no-op.
pub fn init() -> Result<(), SetLoggerError> {
    if INITIALIZED.get().is_some() {
        return Ok(());
    }

    if env_logging_enabled() {
        let logger = LOGGER.get_or_init(FileLogger::new);
        log::set_logger(logger)?;
        log::set_max_level(LevelFilter::Debug);
        log::info!("=== agent-sessions debug log started ===");
        log::info!("Log file: {:?}", logger.log_path);
    } else {
        env_logger::Builder::from_default_env().try_init()?;
    }

    let _ = INITIALIZED.set(());
    Ok(())
}

fn env_logging_enabled() -> bool {
    std::env::var(DEBUG_LOG_ENV)
        .map(|value| {
            let trimmed = value.trim();
            !trimmed.is_empty() && trimmed != "0"
        })
        .unwrap_or(false)
}

/// Get the path to the debug log file
pub fn log_file_path() -> PathBuf {
    get_log_path()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn init_is_idempotent() {
        assert!(init().is_ok());
        assert!(init().is_ok());
    }

    #[test]
    fn log_file_lives_in_cache_dir() {
        let path = log_file_path();
        assert!(path.ends_with("agent-sessions/debug.log"), "got {path:?}");
    }

    #[test]
    fn file_logger_truncates_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");
        std::fs::write(&path, "stale line\n").unwrap();

        let logger = FileLogger::open(path.clone());
        logger.write_record(
            &Record::builder()
                .level(log::Level::Error)
                .target("agent_sessions")
                .args(format_args!("fresh line"))
                .build(),
        );
        logger.flush();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale line"));
        assert!(written.contains("[ERROR] [agent_sessions] fresh line"), "got {written}");
    }
}
