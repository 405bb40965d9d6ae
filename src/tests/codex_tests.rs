use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::agent::codex::CodexProvider;
use crate::agent::SessionProvider;
use crate::session::{MessageRole, SourceTag};

use super::test_helpers::{no_scanner, write_jsonl, StaticScanner};

const SESSION_ID: &str = "019a2b3c-4d5e-6f70-8192-a3b4c5d6e7f8";

fn rollout_path(root: &std::path::Path, day: &str, session_id: &str) -> PathBuf {
    root.join("2026")
        .join("02")
        .join(day)
        .join(format!("rollout-2026-02-{day}T12-00-00-{session_id}.jsonl"))
}

fn session_meta(session_id: &str, cwd: &str) -> Value {
    json!({
        "timestamp": "2026-02-10T12:00:00.000Z",
        "type": "session_meta",
        "payload": {
            "id": session_id,
            "timestamp": "2026-02-10T12:00:00.000Z",
            "cwd": cwd,
            "originator": "codex_cli_rs",
            "cli_version": "0.46.0",
        },
    })
}

/// Shape written by current Codex releases
fn turn_context(cwd: &str) -> Value {
    json!({
        "timestamp": "2026-02-10T12:00:00.200Z",
        "type": "turn_context",
        "payload": {
            "cwd": cwd,
            "approval_policy": "on-request",
            "sandbox_policy": {"type": "workspace-write"},
            "model": "gpt-5-codex",
            "effort": "medium",
            "summary": "auto",
        },
    })
}

fn message(role: &str, text: &str, timestamp: &str) -> Value {
    let block_type = if role == "user" { "input_text" } else { "output_text" };
    json!({
        "timestamp": timestamp,
        "type": "response_item",
        "payload": {
            "type": "message",
            "role": role,
            "content": [{"type": block_type, "text": text}],
        },
    })
}

fn reasoning(text: &str, timestamp: &str) -> Value {
    json!({
        "timestamp": timestamp,
        "type": "response_item",
        "payload": {
            "type": "reasoning",
            "summary": [{"type": "summary_text", "text": text}],
            "encrypted_content": "gAAAA",
        },
    })
}

fn fixture_records(session_id: &str) -> Vec<Value> {
    vec![
        session_meta(session_id, "/home/lars/project"),
        message(
            "user",
            "<environment_context>\n  <cwd>/home/lars/project</cwd>\n</environment_context>",
            "2026-02-10T12:00:00.100Z",
        ),
        turn_context("/home/lars/project"),
        message("user", "Add a --verbose flag", "2026-02-10T12:00:01.000Z"),
        reasoning("Look at the CLI parser", "2026-02-10T12:00:02.000Z"),
        json!({
            "timestamp": "2026-02-10T12:00:03.000Z",
            "type": "response_item",
            "payload": {"type": "function_call", "name": "shell", "arguments": "{\"command\":[\"ls\"]}"},
        }),
        message("assistant", "Added the flag in src/cli.rs", "2026-02-10T12:00:04.000Z"),
        json!({
            "timestamp": "2026-02-10T12:00:05.000Z",
            "type": "event_msg",
            "payload": {"type": "token_count"},
        }),
    ]
}

fn provider(root: &std::path::Path) -> CodexProvider {
    CodexProvider::new(root, no_scanner())
}

#[test]
fn test_list_codex_sessions() {
    let temp = TempDir::new().unwrap();
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &fixture_records(SESSION_ID));

    let sessions = provider(temp.path()).list_sessions(None, 50);
    assert_eq!(sessions.len(), 1);

    let session = &sessions[0];
    assert_eq!(session.id, SESSION_ID);
    assert_eq!(session.source, SourceTag::Codex);
    assert_eq!(session.directory, "/home/lars/project");
    assert_eq!(session.first_prompt.as_deref(), Some("Add a --verbose flag"));
    assert_eq!(session.message_count, 2);
    assert_eq!(session.last_activity, "2026-02-10T12:00:05.000Z");
    assert!(!session.is_running);
}

#[test]
fn test_get_codex_session_detail() {
    let temp = TempDir::new().unwrap();
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &fixture_records(SESSION_ID));

    let detail = provider(temp.path()).session_detail(SESSION_ID, 100).unwrap();
    assert_eq!(detail.messages.len(), 2);
    assert_eq!(detail.messages[0].role, MessageRole::User);
    assert_eq!(detail.messages[0].content, "Add a --verbose flag");
    assert_eq!(detail.messages[0].thinking, None);
    assert_eq!(detail.messages[1].role, MessageRole::Assistant);
    assert_eq!(detail.messages[1].content, "Added the flag in src/cli.rs");
    assert_eq!(
        detail.messages[1].thinking.as_deref(),
        Some("Look at the CLI parser")
    );
}

#[test]
fn test_reasoning_does_not_cross_user_turns() {
    let temp = TempDir::new().unwrap();
    write_jsonl(
        &rollout_path(temp.path(), "10", SESSION_ID),
        &[
            session_meta(SESSION_ID, "/home/lars/project"),
            reasoning("stale thought", "2026-02-10T12:00:01.000Z"),
            message("user", "never mind", "2026-02-10T12:00:02.000Z"),
            message("assistant", "ok", "2026-02-10T12:00:03.000Z"),
        ],
    );

    let detail = provider(temp.path()).session_detail(SESSION_ID, 100).unwrap();
    assert_eq!(detail.messages[1].content, "ok");
    assert_eq!(detail.messages[1].thinking, None);
}

#[test]
fn test_turn_context_cwd_beats_root_meta_cwd() {
    let temp = TempDir::new().unwrap();
    write_jsonl(
        &rollout_path(temp.path(), "10", SESSION_ID),
        &[
            session_meta(SESSION_ID, "/"),
            turn_context("/home/lars/app"),
            message("user", "hi", "2026-02-10T12:00:01.000Z"),
        ],
    );

    let sessions = provider(temp.path()).list_sessions(None, 50);
    assert_eq!(sessions[0].directory, "/home/lars/app");
}

#[test]
fn test_nested_date_directories_are_walked() {
    let temp = TempDir::new().unwrap();
    let older = "00000000-aaaa-bbbb-cccc-000000000001";
    let newer = "00000000-aaaa-bbbb-cccc-000000000002";

    let mut records = vec![session_meta(older, "/home/lars/project")];
    records.push(message("user", "first", "2026-02-09T09:00:00.000Z"));
    write_jsonl(&rollout_path(temp.path(), "09", older), &records);

    let mut records = vec![session_meta(newer, "/home/lars/project")];
    records.push(message("user", "second", "2026-02-11T09:00:00.000Z"));
    write_jsonl(&rollout_path(temp.path(), "11", newer), &records);

    // Not a rollout file
    write_jsonl(&temp.path().join("2026").join("history.jsonl"), &[json!({"x": 1})]);

    let sessions = provider(temp.path()).list_sessions(None, 50);
    let ids: Vec<&str> = sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![newer, older]);
}

#[test]
fn test_session_id_falls_back_to_file_name() {
    let temp = TempDir::new().unwrap();
    write_jsonl(
        &rollout_path(temp.path(), "10", SESSION_ID),
        &[message("user", "no header here", "2026-02-10T12:00:01.000Z")],
    );

    let sessions = provider(temp.path()).list_sessions(None, 50);
    assert_eq!(sessions[0].id, SESSION_ID);
    assert_eq!(sessions[0].directory, "/");
}

#[test]
fn test_directory_filter() {
    let temp = TempDir::new().unwrap();
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &fixture_records(SESSION_ID));
    let provider = provider(temp.path());

    assert_eq!(provider.list_sessions(Some("/home/lars/project"), 50).len(), 1);
    assert!(provider.list_sessions(Some("/home/lars/other"), 50).is_empty());
}

#[test]
fn test_running_flag_uses_codex_scanner() {
    let temp = TempDir::new().unwrap();
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &fixture_records(SESSION_ID));

    let scanner = StaticScanner::running(&[SESSION_ID]);
    let provider = CodexProvider::new(temp.path(), scanner.boxed());
    assert!(provider.list_sessions(None, 50)[0].is_running);
    assert!(provider.session_detail(SESSION_ID, 100).unwrap().summary.is_running);
}

#[test]
fn test_codex_not_found_and_missing_root() {
    let temp = TempDir::new().unwrap();
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &fixture_records(SESSION_ID));
    assert!(provider(temp.path()).session_detail("nonexistent", 100).is_none());

    let missing = provider(&temp.path().join("nope"));
    assert!(missing.list_sessions(None, 50).is_empty());
    assert!(missing.session_detail(SESSION_ID, 100).is_none());
}

#[test]
fn test_turn_context_summary_mode_does_not_clash_with_reasoning() {
    let temp = TempDir::new().unwrap();
    write_jsonl(
        &rollout_path(temp.path(), "10", SESSION_ID),
        &[
            session_meta(SESSION_ID, "/"),
            turn_context("/home/lars/app"),
            message("user", "explain", "2026-02-10T12:00:01.000Z"),
            reasoning("Read main.rs", "2026-02-10T12:00:02.000Z"),
            message("assistant", "It starts the server", "2026-02-10T12:00:03.000Z"),
        ],
    );

    let detail = provider(temp.path()).session_detail(SESSION_ID, 100).unwrap();
    assert_eq!(detail.summary.directory, "/home/lars/app");
    assert_eq!(detail.summary.message_count, 2);
    assert_eq!(detail.messages[1].thinking.as_deref(), Some("Read main.rs"));
}

#[test]
fn test_records_without_payload_still_advance_activity() {
    let temp = TempDir::new().unwrap();
    let mut records = fixture_records(SESSION_ID);
    records.push(json!({"timestamp": "2026-02-10T12:30:00.000Z", "type": "compacted"}));
    write_jsonl(&rollout_path(temp.path(), "10", SESSION_ID), &records);

    let sessions = provider(temp.path()).list_sessions(None, 50);
    assert_eq!(sessions[0].last_activity, "2026-02-10T12:30:00.000Z");
    assert_eq!(sessions[0].message_count, 2);
}
