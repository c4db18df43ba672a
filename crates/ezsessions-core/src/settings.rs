use std::time::Duration;

use crate::ConfigError;

/// Delay applied before every search attempt, including the first.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_secs(1);

/// Extra attempts made after a first attempt that found nothing.
pub const DEFAULT_SEARCH_RETRIES: u32 = 7;

/// Delay and retry budget for a session query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    delay: Duration,
    retries: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_SEARCH_DELAY,
            retries: DEFAULT_SEARCH_RETRIES,
        }
    }
}

impl SearchSettings {
    /// Build settings from caller-supplied values, rejecting negatives.
    pub fn new(delay_secs: i64, retries: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            delay: Self::validate_delay(delay_secs)?,
            retries: Self::validate_retries(retries)?,
        })
    }

    /// Settings with a sub-second delay, mostly useful in tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    /// Total number of attempts: the first one plus every retry.
    pub fn attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn set_delay_secs(&mut self, delay_secs: i64) -> Result<(), ConfigError> {
        self.delay = Self::validate_delay(delay_secs)?;
        Ok(())
    }

    pub fn set_retries(&mut self, retries: i64) -> Result<(), ConfigError> {
        self.retries = Self::validate_retries(retries)?;
        Ok(())
    }

    fn validate_delay(delay_secs: i64) -> Result<Duration, ConfigError> {
        u64::try_from(delay_secs)
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::NegativeSearchDelay(delay_secs))
    }

    fn validate_retries(retries: i64) -> Result<u32, ConfigError> {
        if retries < 0 {
            return Err(ConfigError::NegativeSearchRetries(retries));
        }
        Ok(u32::try_from(retries).unwrap_or(u32::MAX))
    }
}

/// Blocks for the search delay. Injectable so the timing contract can be tested.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

/// Sleeps on the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<F> Sleeper for F
where
    F: Fn(Duration) + Send + Sync,
{
    fn sleep(&self, duration: Duration) {
        self(duration)
    }
}
