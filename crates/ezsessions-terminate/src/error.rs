use serde::Serialize;
use thiserror::Error;

/// Why a single termination attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminationError {
    /// The executable could not be located or started.
    #[error("executable not found or not executable: {detail}")]
    NotFound { detail: String },

    /// The program ran and reported failure. The code is
    /// [`EXIT_CODE_UNAVAILABLE`](crate::EXIT_CODE_UNAVAILABLE) when the
    /// process was killed by a signal.
    #[error("kill subcommand exited with code {code}")]
    NonZeroExit { code: i32 },

    #[error("unexpected error running kill subcommand: {detail}")]
    Unexpected { detail: String },
}

impl TerminationError {
    /// Classify a failure to launch the process.
    pub fn from_spawn_error(err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                TerminationError::NotFound {
                    detail: err.to_string(),
                }
            }
            _ => TerminationError::Unexpected {
                detail: err.to_string(),
            },
        }
    }
}
