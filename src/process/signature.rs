//! Command-line signatures that identify a running session.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::session::SourceTag;

static UUID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("UUID pattern is valid")
});

const MIN_SESSION_ID_LEN: usize = 32;

/// Coarse session-id shape check used for `--resume`-style arguments
fn looks_like_session_id(token: &str) -> bool {
    token.len() >= MIN_SESSION_ID_LEN && token.contains('-')
}

/// The token following the first occurrence of `flag` in `line`
fn token_after<'a>(line: &'a str, flag: &str) -> Option<&'a str> {
    let mut tokens = line.split_whitespace();
    tokens.by_ref().find(|token| *token == flag)?;
    tokens.next()
}

/// `claude --resume <id>`
pub fn scan_claude_lines<I, S>(lines: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            if !line.contains("claude") {
                return None;
            }
            token_after(line, "--resume")
                .filter(|id| looks_like_session_id(id))
                .map(str::to_string)
        })
        .collect()
}

/// `codex resume <id>`
pub fn scan_codex_lines<I, S>(lines: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            if !line.contains("codex resume") {
                return None;
            }
            token_after(line, "resume")
                .filter(|id| looks_like_session_id(id))
                .map(str::to_string)
        })
        .collect()
}

/// Any pi process carrying a UUID on its command line
pub fn scan_pi_lines<I, S>(lines: I) -> HashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            if !line.contains("pi-coding-agent") && !line.contains("/pi ") {
                return None;
            }
            UUID_PATTERN.find(line).map(|m| m.as_str().to_string())
        })
        .collect()
}

/// Dispatch to the matcher for `source`
pub fn match_running_sessions<S: AsRef<str>>(source: SourceTag, lines: &[S]) -> HashSet<String> {
    let lines = lines.iter().map(AsRef::as_ref);
    match source {
        SourceTag::ClaudeCode => scan_claude_lines(lines),
        SourceTag::Codex => scan_codex_lines(lines),
        SourceTag::Pi => scan_pi_lines(lines),
    }
}
