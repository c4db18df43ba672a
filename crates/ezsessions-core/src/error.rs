use std::path::PathBuf;

use thiserror::Error;

/// Misuse rejected at the point of configuration. Values are never clamped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not a valid number of seconds for search delay")]
    NegativeSearchDelay(i64),

    #[error("{0} is not a valid number of search retries")]
    NegativeSearchRetries(i64),

    #[error("missing username")]
    MissingUsername,

    #[error("missing filename")]
    MissingFilename,
}

/// Errors raised while reading a session source.
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read line {line} of {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("search attempt {attempt} of {attempts} failed: {source}")]
    Attempt {
        attempt: u32,
        attempts: u32,
        #[source]
        source: Box<ReaderError>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ReaderError {
    /// The innermost error, skipping any attempt wrappers.
    pub fn root(&self) -> &ReaderError {
        match self {
            ReaderError::Attempt { source, .. } => source.root(),
            other => other,
        }
    }
}
