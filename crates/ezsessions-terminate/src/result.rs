use serde::Serialize;

use crate::{KillOutcome, TerminationError};

/// Exit code recorded when none is available.
pub const EXIT_CODE_UNAVAILABLE: i32 = -1;

/// Result of calling the `kill` subcommand for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TerminationResult {
    pub session_id: String,
    /// Exit code of the subcommand
    pub exit_code: i32,
    /// Trimmed stdout of the subcommand
    pub stdout: String,
    /// Trimmed stderr of the subcommand
    pub stderr: String,
    pub error: Option<TerminationError>,
}

impl TerminationResult {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            exit_code: EXIT_CODE_UNAVAILABLE,
            stdout: String::new(),
            stderr: String::new(),
            error: None,
        }
    }

    /// Check if the session was terminated
    pub fn success(&self) -> bool {
        self.error.is_none() && self.exit_code == 0
    }

    pub fn outcome(&self) -> KillOutcome {
        KillOutcome::from_exit_code(self.exit_code)
    }

    /// Get combined output (stdout + stderr)
    pub fn combined_output(&self) -> String {
        if self.stderr.is_empty() {
            self.stdout.clone()
        } else if self.stdout.is_empty() {
            self.stderr.clone()
        } else {
            format!("{}\n{}", self.stdout, self.stderr)
        }
    }
}
