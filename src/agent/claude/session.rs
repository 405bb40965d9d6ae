//! Claude Code session file discovery and parsing.

use log::{debug, trace};
use std::fs;
use std::path::{Path, PathBuf};

use super::path_conversion::decode_project_path;
use super::types::ClaudeJsonlLine;
use crate::session::jsonl::{fallback_activity, for_each_record, report_read_error};
use crate::session::{normalize_directory_path, MessageRole, SessionBuilder, SessionDetail, SourceTag};

/// A session file together with the project directory that holds it
#[derive(Debug, Clone)]
pub struct ClaudeSessionFile {
    pub path: PathBuf,
    pub project_dir_name: String,
}

impl ClaudeSessionFile {
    fn session_id(&self) -> Option<String> {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }
}

/// Check if a JSONL file is a subagent file (named agent-*.jsonl)
pub fn is_subagent_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with("agent-") && name.ends_with(".jsonl"))
        .unwrap_or(false)
}

fn project_dirs(projects_dir: &Path) -> Vec<(PathBuf, String)> {
    match fs::read_dir(projects_dir) {
        Ok(entries) => entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .map(|entry| (entry.path(), entry.file_name().to_string_lossy().into_owned()))
            .collect(),
        Err(err) => {
            report_read_error(projects_dir, &err);
            Vec::new()
        }
    }
}

/// All session files under every project directory. Subagent side chains
/// are excluded.
pub fn collect_session_files(projects_dir: &Path) -> Vec<ClaudeSessionFile> {
    let mut files = Vec::new();

    for (project_path, project_dir_name) in project_dirs(projects_dir) {
        let entries = match fs::read_dir(&project_path) {
            Ok(entries) => entries,
            Err(err) => {
                report_read_error(&project_path, &err);
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let is_jsonl = path.extension().map(|ext| ext == "jsonl").unwrap_or(false);
            if is_jsonl && path.is_file() && !is_subagent_file(&path) {
                files.push(ClaudeSessionFile {
                    path,
                    project_dir_name: project_dir_name.clone(),
                });
            }
        }
    }

    trace!("Found {} Claude session files in {:?}", files.len(), projects_dir);
    files
}

/// Locate `<projects_dir>/<any project>/<session_id>.jsonl`
pub fn find_session_file(projects_dir: &Path, session_id: &str) -> Option<ClaudeSessionFile> {
    let file_name = format!("{session_id}.jsonl");
    project_dirs(projects_dir)
        .into_iter()
        .map(|(project_path, project_dir_name)| ClaudeSessionFile {
            path: project_path.join(&file_name),
            project_dir_name,
        })
        .find(|candidate| candidate.path.is_file())
}

/// Parse a Claude Code session file. `message_limit` of `None` builds a
/// summary only.
pub fn parse_session_file(
    file: &ClaudeSessionFile,
    message_limit: Option<usize>,
) -> Option<SessionDetail> {
    debug!("Parsing Claude session file: {:?}", file.path);

    let session_id = file.session_id()?;
    let mut builder = SessionBuilder::with_limit(message_limit);
    let mut cwd: Option<String> = None;

    let read = for_each_record(&file.path, |line: ClaudeJsonlLine| {
        builder.set_started_at(line.timestamp.as_deref());
        builder.observe_timestamp(line.timestamp.as_deref());
        if cwd.is_none() {
            cwd = line.cwd.filter(|c| !c.is_empty());
        }

        let line_type = line.line_type.as_deref().unwrap_or("");
        if !matches!(line_type, "user" | "assistant") || line.is_meta {
            return;
        }
        let Some(message) = line.message else {
            return;
        };
        let Some(role) = message.role.as_deref().or(Some(line_type)).and_then(MessageRole::from_raw)
        else {
            return;
        };
        if let Some(content) = message.content {
            builder.push(role, content.normalize(), line.timestamp.as_deref());
        }
    });

    if let Err(err) = read {
        report_read_error(&file.path, &err);
        return None;
    }

    let directory = normalize_directory_path(
        &cwd.unwrap_or_else(|| decode_project_path(&file.project_dir_name)),
    );

    Some(builder.finish(session_id, SourceTag::ClaudeCode, directory, || {
        fallback_activity(&file.path)
    }))
}
