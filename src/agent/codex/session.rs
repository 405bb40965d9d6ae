//! Codex session file discovery and parsing.

use log::{debug, trace, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::types::{CodexJsonlLine, CodexRecord, ReasoningPayload, ResponseItemPayload};
use crate::session::jsonl::{fallback_activity, for_each_record, report_read_error};
use crate::session::{
    normalize_directory_path, MessageRole, NormalizedContent, SessionBuilder, SessionDetail,
    SourceTag,
};

const UUID_LEN: usize = 36;

/// Prefixes of user-role messages that Codex injects itself
const INJECTED_PREFIXES: &[&str] = &[
    "<environment_context>",
    "<user_instructions>",
    "<permissions instructions>",
    "# AGENTS.md instructions",
];

fn is_rollout_file(path: &Path) -> bool {
    let is_jsonl = path.extension().map(|e| e == "jsonl").unwrap_or(false);
    let is_rollout = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|name| name.starts_with("rollout-"))
        .unwrap_or(false);
    is_jsonl && is_rollout
}

/// Trailing UUID of `rollout-<timestamp>-<uuid>.jsonl`
pub fn session_id_from_file_name(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let start = stem.len().checked_sub(UUID_LEN)?;
    stem.get(start..).map(str::to_string)
}

/// All rollout files under the sessions directory, at any depth
pub fn collect_session_files(sessions_dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(sessions_dir) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Failed to walk Codex sessions directory: {}", err);
                continue;
            }
        };
        if entry.file_type().is_file() && is_rollout_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    trace!("Found {} Codex session files in {:?}", files.len(), sessions_dir);
    files
}

/// Locate the rollout file whose name ends with `session_id`
pub fn find_session_file(sessions_dir: &Path, session_id: &str) -> Option<PathBuf> {
    collect_session_files(sessions_dir)
        .into_iter()
        .find(|path| session_id_from_file_name(path).as_deref() == Some(session_id))
}

fn extract_reasoning(payload: &ReasoningPayload) -> Option<String> {
    let parts: Vec<&str> = payload
        .summary
        .iter()
        .filter_map(|part| part.text.as_deref())
        .filter(|text| !text.trim().is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join("\n"))
}

fn is_injected(text: &str) -> bool {
    let trimmed = text.trim_start();
    INJECTED_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

fn select_best_cwd(candidates: [Option<String>; 2]) -> Option<String> {
    let trimmed: Vec<String> = candidates
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    trimmed
        .iter()
        .find(|value| value.as_str() != "/")
        .or(trimmed.first())
        .cloned()
}

/// Parse a Codex rollout file. `message_limit` of `None` builds a summary
/// only.
pub fn parse_session_file(path: &Path, message_limit: Option<usize>) -> Option<SessionDetail> {
    debug!("Parsing Codex session file: {:?}", path);

    let mut builder = SessionBuilder::with_limit(message_limit);
    let mut session_id: Option<String> = None;
    let mut cwd_meta: Option<String> = None;
    let mut cwd_turn: Option<String> = None;
    let mut pending_reasoning: Option<String> = None;

    let read = for_each_record(path, |line: CodexJsonlLine| {
        builder.observe_timestamp(line.timestamp.as_deref());

        match line.record {
            CodexRecord::SessionMeta { payload } => {
                if session_id.is_none() {
                    session_id = payload.id;
                }
                if cwd_meta.is_none() {
                    cwd_meta = payload.cwd;
                }
                builder.set_started_at(payload.timestamp.as_deref().or(line.timestamp.as_deref()));
            }
            CodexRecord::TurnContext { payload } => {
                if let Some(cwd) = payload.cwd.filter(|c| !c.trim().is_empty()) {
                    cwd_turn = Some(cwd);
                }
            }
            CodexRecord::ResponseItem {
                payload: ResponseItemPayload::Reasoning(reasoning),
            } => {
                if let Some(text) = extract_reasoning(&reasoning) {
                    pending_reasoning = Some(match pending_reasoning.take() {
                        Some(earlier) => format!("{earlier}\n{text}"),
                        None => text,
                    });
                }
            }
            CodexRecord::ResponseItem {
                payload: ResponseItemPayload::Message(message),
            } => {
                let Some(role) = message.role.as_deref().and_then(MessageRole::from_raw) else {
                    return;
                };
                let Some(content) = message.content.as_ref() else {
                    return;
                };
                let mut normalized = content.normalize();
                match role {
                    MessageRole::User => {
                        pending_reasoning = None;
                        if is_injected(&normalized.text) {
                            return;
                        }
                    }
                    MessageRole::Assistant => {
                        if normalized.thinking.is_none() {
                            normalized.thinking = pending_reasoning.take();
                        }
                    }
                }
                push_message(&mut builder, role, normalized, line.timestamp.as_deref());
            }
            CodexRecord::ResponseItem {
                payload: ResponseItemPayload::Other,
            }
            | CodexRecord::Other => {}
        }
    });

    if let Err(err) = read {
        report_read_error(path, &err);
        return None;
    }

    let session_id = session_id
        .filter(|id| !id.is_empty())
        .or_else(|| session_id_from_file_name(path))?;
    let directory = select_best_cwd([cwd_turn, cwd_meta]).unwrap_or_else(|| {
        debug!("Codex session file has no usable cwd: {:?}", path);
        "/".to_string()
    });

    Some(builder.finish(
        session_id,
        SourceTag::Codex,
        normalize_directory_path(&directory),
        || fallback_activity(path),
    ))
}

fn push_message(
    builder: &mut SessionBuilder,
    role: MessageRole,
    content: NormalizedContent,
    timestamp: Option<&str>,
) {
    if !builder.push(role, content, timestamp) {
        trace!("Skipping empty Codex {:?} message", role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_is_trailing_uuid() {
        let path = Path::new(
            "/x/2026/02/10/rollout-2026-02-10T12-00-00-019a2b3c-4d5e-6f70-8192-a3b4c5d6e7f8.jsonl",
        );
        assert_eq!(
            session_id_from_file_name(path).as_deref(),
            Some("019a2b3c-4d5e-6f70-8192-a3b4c5d6e7f8")
        );
        assert_eq!(session_id_from_file_name(Path::new("/x/rollout-1.jsonl")), None);
    }

    #[test]
    fn best_cwd_prefers_specific_directory() {
        assert_eq!(
            select_best_cwd([Some("/".into()), Some("/home/lars/app".into())]).as_deref(),
            Some("/home/lars/app")
        );
        assert_eq!(select_best_cwd([Some(" / ".into()), None]).as_deref(), Some("/"));
        assert_eq!(select_best_cwd([Some("".into()), None]), None);
    }

    #[test]
    fn injected_context_is_detected() {
        assert!(is_injected("<environment_context>\n<cwd>/x</cwd>"));
        assert!(is_injected("  # AGENTS.md instructions for /x"));
        assert!(!is_injected("fix the login bug"));
    }
}
