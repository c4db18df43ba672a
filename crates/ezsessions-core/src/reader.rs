use crate::{ConfigError, ReaderError, SearchSettings, UserSessions};

/// API for retrieving user sessions from a session source.
///
/// The audit-log reader is one implementer; any other source of session
/// snapshots plugs in by implementing the same methods.
pub trait SessionsReader {
    /// All active sessions, regardless of username.
    fn all_user_sessions(&self) -> Result<UserSessions, ReaderError>;

    /// Active sessions whose username matches case-insensitively.
    fn user_sessions(&self, username: &str) -> Result<UserSessions, ReaderError>;

    fn search_settings(&self) -> SearchSettings;

    fn search_settings_mut(&mut self) -> &mut SearchSettings;

    /// Replace the delay (in seconds) and retry count used by every query.
    /// Both values are validated before either is applied.
    fn configure(&mut self, search_delay_secs: i64, search_retries: i64) -> Result<(), ConfigError> {
        *self.search_settings_mut() = SearchSettings::new(search_delay_secs, search_retries)?;
        Ok(())
    }

    /// Set the delay in seconds applied before each search attempt.
    fn set_search_delay(&mut self, delay_secs: i64) -> Result<(), ConfigError> {
        self.search_settings_mut().set_delay_secs(delay_secs)
    }

    /// Set the number of additional attempts made while results are empty.
    fn set_search_retries(&mut self, retries: i64) -> Result<(), ConfigError> {
        self.search_settings_mut().set_retries(retries)
    }
}
