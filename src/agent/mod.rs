pub mod claude;
pub mod codex;
pub mod pi;

use log::{debug, info};

use crate::config::Config;
use crate::process::LivenessScanner;
use crate::session::{normalize_directory_path, SessionDetail, SessionSummary, SourceTag};

pub const DEFAULT_LIST_LIMIT: usize = 50;
pub const DEFAULT_DETAIL_LIMIT: usize = 100;

/// Reads one agent tool's session logs
pub trait SessionProvider: Send + Sync {
    /// The source tag attached to every session this provider returns
    fn source(&self) -> SourceTag;

    /// Recent sessions, newest first, optionally restricted to sessions
    /// started in `directory`
    fn list_sessions(&self, directory: Option<&str>, limit: usize) -> Vec<SessionSummary>;

    /// Full history of one session, first `limit` messages
    fn session_detail(&self, session_id: &str, limit: usize) -> Option<SessionDetail>;
}

/// Merges sessions from every registered provider
pub struct SessionCatalog {
    providers: Vec<Box<dyn SessionProvider>>,
}

impl SessionCatalog {
    pub fn new(providers: Vec<Box<dyn SessionProvider>>) -> Self {
        Self { providers }
    }

    /// Claude Code, Codex and Pi, configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(vec![
            Box::new(claude::ClaudeProvider::from_config(config)),
            Box::new(codex::CodexProvider::from_config(config)),
            Box::new(pi::PiProvider::from_config(config)),
        ])
    }

    /// Sessions from all providers (or only `source`), newest first
    pub fn discover_sessions(
        &self,
        directory: Option<&str>,
        source: Option<SourceTag>,
        limit: usize,
    ) -> Vec<SessionSummary> {
        let mut sessions = Vec::new();

        for provider in self.providers_for(source) {
            let found = provider.list_sessions(directory, limit);
            info!(
                "{}: found {} sessions",
                provider.source().display_name(),
                found.len()
            );
            sessions.extend(found);
        }

        sort_by_recency(&mut sessions);
        sessions.truncate(limit);
        sessions
    }

    /// Route a detail lookup to the provider for `source`
    pub fn session_detail(
        &self,
        session_id: &str,
        source: SourceTag,
        limit: usize,
    ) -> Option<SessionDetail> {
        let detail = self
            .providers_for(Some(source))
            .next()?
            .session_detail(session_id, limit);
        if detail.is_none() {
            debug!("{} session not found: {}", source.display_name(), session_id);
        }
        detail
    }

    fn providers_for(
        &self,
        source: Option<SourceTag>,
    ) -> impl Iterator<Item = &dyn SessionProvider> + '_ {
        self.providers
            .iter()
            .map(|provider| provider.as_ref())
            .filter(move |provider| source.map_or(true, |tag| provider.source() == tag))
    }
}

/// Discover sessions across all sources using environment configuration.
/// Callers typically pass [`DEFAULT_LIST_LIMIT`].
pub fn discover_sessions(
    directory: Option<&str>,
    source: Option<SourceTag>,
    limit: usize,
) -> Vec<SessionSummary> {
    SessionCatalog::from_config(&Config::from_env()).discover_sessions(directory, source, limit)
}

/// Load one session with message history using environment configuration.
/// Callers typically pass [`DEFAULT_DETAIL_LIMIT`].
pub fn get_session_detail(
    session_id: &str,
    source: SourceTag,
    limit: usize,
) -> Option<SessionDetail> {
    SessionCatalog::from_config(&Config::from_env()).session_detail(session_id, source, limit)
}

/// Newest `last_activity` first; ties keep their order
pub(crate) fn sort_by_recency(sessions: &mut [SessionSummary]) {
    sessions.sort_by(|a, b| b.last_activity.cmp(&a.last_activity));
}

/// Apply the directory filter, mark running sessions from one fresh scan,
/// then sort newest first and truncate.
pub(crate) fn finish_listing(
    summaries: impl Iterator<Item = SessionSummary>,
    directory: Option<&str>,
    scanner: &dyn LivenessScanner,
    limit: usize,
) -> Vec<SessionSummary> {
    let filter = directory.map(normalize_directory_path);
    let mut sessions: Vec<SessionSummary> = summaries
        .filter(|summary| filter.as_deref().map_or(true, |wanted| wanted == summary.directory))
        .collect();

    if !sessions.is_empty() {
        let running = scanner.running_sessions();
        for summary in &mut sessions {
            summary.is_running = running.contains(&summary.id);
        }
    }

    sort_by_recency(&mut sessions);
    sessions.truncate(limit);
    sessions
}

/// Session ids become file names; anything that could escape the storage
/// root is rejected.
pub(crate) fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
