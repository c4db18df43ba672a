use std::path::{Path, PathBuf};
use std::sync::Arc;

use ezsessions_core::{
    ConfigError, Diagnostics, ReaderError, RetryingSearch, SearchSettings, SessionsReader, Sleeper,
    ThreadSleeper, UserSessions,
};
use tracing::debug;

use crate::parser::read_entries;
use crate::reconcile::reconcile;
use crate::types::{into_user_sessions, SessionEntries};

/// Session reader backed by an EZproxy audit log file.
///
/// Every query re-reads and re-reconciles the whole file; nothing is cached
/// between calls.
pub struct AuditLogReader {
    path: PathBuf,
    settings: SearchSettings,
    sleeper: Arc<dyn Sleeper>,
    diagnostics: Diagnostics,
}

impl AuditLogReader {
    /// Create a reader for the given audit log, using the default search
    /// delay and retry count.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(ConfigError::MissingFilename);
        }

        Ok(Self {
            path,
            settings: SearchSettings::default(),
            sleeper: Arc::new(ThreadSleeper),
            diagnostics: Diagnostics::default(),
        })
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One reconciliation pass over the audit log, without delay or retry.
    /// Returns the surviving login-class entries for all users.
    pub fn all_session_entries(&self) -> Result<SessionEntries, ReaderError> {
        self.diagnostics.scope(|| self.reconcile_pass())
    }

    /// Active session entries, optionally limited to one username, found
    /// using the configured delay and retry budget.
    pub fn session_entries(&self, username: Option<&str>) -> Result<SessionEntries, ReaderError> {
        if username.is_some_and(str::is_empty) {
            return Err(ConfigError::MissingUsername.into());
        }

        self.diagnostics.scope(|| {
            debug!(
                path = %self.path.display(),
                username = username.unwrap_or("*"),
                attempts = self.settings.attempts(),
                "Searching audit log for active sessions"
            );

            RetryingSearch::new(self.settings, self.sleeper.as_ref())
                .run(username, || self.reconcile_pass())
        })
    }

    fn reconcile_pass(&self) -> Result<SessionEntries, ReaderError> {
        debug!(path = %self.path.display(), "Opening audit log");
        let entries = read_entries(&self.path)?;
        let scanned = entries.len();

        let active = reconcile(entries);
        debug!(scanned, active = active.len(), "Reconciled audit log");

        Ok(active)
    }
}

impl SessionsReader for AuditLogReader {
    fn all_user_sessions(&self) -> Result<UserSessions, ReaderError> {
        self.session_entries(None).map(into_user_sessions)
    }

    fn user_sessions(&self, username: &str) -> Result<UserSessions, ReaderError> {
        self.session_entries(Some(username)).map(into_user_sessions)
    }

    fn search_settings(&self) -> SearchSettings {
        self.settings
    }

    fn search_settings_mut(&mut self) -> &mut SearchSettings {
        &mut self.settings
    }
}

impl std::fmt::Debug for AuditLogReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditLogReader")
            .field("path", &self.path)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
