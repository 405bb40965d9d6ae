//! Pi session file discovery and parsing.

use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};

use super::path_conversion::decode_directory_name;
use super::types::PiJsonlLine;
use crate::session::jsonl::{fallback_activity, for_each_record, report_read_error};
use crate::session::{normalize_directory_path, MessageRole, SessionBuilder, SessionDetail, SourceTag};

/// A session file and the encoded working-directory folder holding it
#[derive(Debug, Clone)]
pub struct PiSessionFile {
    pub path: PathBuf,
    pub dir_name: String,
}

/// Session id from `<timestamp>_<session-id>.jsonl`
pub fn session_id_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let (_, id) = stem.rsplit_once('_')?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Every `<root>/<encoded-cwd>/*.jsonl`
pub fn collect_session_files(sessions_dir: &Path) -> Vec<PiSessionFile> {
    let cwd_dirs = match fs::read_dir(sessions_dir) {
        Ok(entries) => entries,
        Err(err) => {
            report_read_error(sessions_dir, &err);
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for cwd_entry in cwd_dirs.flatten() {
        let cwd_path = cwd_entry.path();
        if !cwd_path.is_dir() {
            continue;
        }
        let dir_name = cwd_entry.file_name().to_string_lossy().into_owned();

        let entries = match fs::read_dir(&cwd_path) {
            Ok(entries) => entries,
            Err(err) => {
                report_read_error(&cwd_path, &err);
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |e| e == "jsonl") {
                files.push(PiSessionFile {
                    path,
                    dir_name: dir_name.clone(),
                });
            }
        }
    }

    trace!("Found {} Pi session files in {:?}", files.len(), sessions_dir);
    files
}

/// Locate the file named `*_<session_id>.jsonl`
pub fn find_session_file(sessions_dir: &Path, session_id: &str) -> Option<PiSessionFile> {
    collect_session_files(sessions_dir)
        .into_iter()
        .find(|file| session_id_from_file_name(&file.path).as_deref() == Some(session_id))
}

/// Parse a Pi session file. `message_limit` of `None` builds a summary only.
pub fn parse_session_file(file: &PiSessionFile, message_limit: Option<usize>) -> Option<SessionDetail> {
    debug!("Parsing Pi session file: {:?}", file.path);

    let mut builder = SessionBuilder::with_limit(message_limit);
    let mut header_id: Option<String> = None;
    let mut header_cwd: Option<String> = None;

    let read = for_each_record(&file.path, |line: PiJsonlLine| {
        builder.observe_timestamp(line.timestamp.as_deref());

        match line.line_type.as_deref() {
            Some("session") => {
                if header_id.is_none() {
                    header_id = line.id.filter(|id| !id.is_empty());
                }
                if header_cwd.is_none() {
                    header_cwd = line.cwd.filter(|cwd| !cwd.is_empty());
                }
                builder.set_started_at(line.timestamp.as_deref());
            }
            Some("message") => {
                let Some(message) = line.message else {
                    return;
                };
                let Some(role) = message.role.as_deref().and_then(MessageRole::from_raw) else {
                    return;
                };
                if let Some(content) = message.content {
                    builder.push(role, content.normalize(), line.timestamp.as_deref());
                }
            }
            _ => {}
        }
    });

    if let Err(err) = read {
        report_read_error(&file.path, &err);
        return None;
    }

    let session_id = header_id.or_else(|| session_id_from_file_name(&file.path))?;
    let directory =
        normalize_directory_path(&header_cwd.unwrap_or_else(|| decode_directory_name(&file.dir_name)));

    Some(builder.finish(session_id, SourceTag::Pi, directory, || {
        fallback_activity(&file.path)
    }))
}
