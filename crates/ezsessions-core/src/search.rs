use tracing::{debug, trace};

use crate::{ReaderError, SearchSettings, SessionRecord, Sleeper};

/// Bounded retry loop around a single reconciliation pass.
///
/// Each attempt sleeps first, then runs the pass. The loop stops at the
/// first non-empty (filtered) result or once every attempt is spent. An
/// empty final result is not an error.
pub struct RetryingSearch<'a> {
    settings: SearchSettings,
    sleeper: &'a dyn Sleeper,
}

impl<'a> RetryingSearch<'a> {
    pub fn new(settings: SearchSettings, sleeper: &'a dyn Sleeper) -> Self {
        Self { settings, sleeper }
    }

    /// Run `pass` up to `retries + 1` times, keeping only records for
    /// `username` when one is given.
    pub fn run<T, F>(&self, username: Option<&str>, mut pass: F) -> Result<Vec<T>, ReaderError>
    where
        T: SessionRecord,
        F: FnMut() -> Result<Vec<T>, ReaderError>,
    {
        let attempts = self.settings.attempts();
        let delay = self.settings.delay();

        for attempt in 1..=attempts {
            debug!(
                attempt,
                attempts,
                username = username.unwrap_or("*"),
                "Beginning search attempt"
            );

            trace!(
                delay_ms = delay.as_millis() as u64,
                "Delaying to let pending EZproxy writes land"
            );
            self.sleeper.sleep(delay);

            let records = pass().map_err(|source| ReaderError::Attempt {
                attempt,
                attempts,
                source: Box::new(source),
            })?;

            let records = match username {
                Some(username) => filter_by_username(records, username),
                None => records,
            };

            if !records.is_empty() {
                debug!(attempt, found = records.len(), "Search attempt found sessions");
                return Ok(records);
            }
        }

        debug!(attempts, "Search attempts exhausted without results");
        Ok(Vec::new())
    }
}

/// Keep records whose username equals `username`, ignoring case.
pub fn filter_by_username<T: SessionRecord>(records: Vec<T>, username: &str) -> Vec<T> {
    let wanted = username.to_lowercase();
    records
        .into_iter()
        .filter(|r| r.username().to_lowercase() == wanted)
        .collect()
}
