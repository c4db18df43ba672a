//! Exit codes and messages of the EZproxy `kill` subcommand.

use serde::Serialize;

use crate::EXIT_CODE_UNAVAILABLE;

pub const DEFAULT_BINARY_NAME: &str = "ezproxy";
pub const KILL_SUBCOMMAND: &str = "kill";

pub const KILL_EXIT_CODE_SESSION_TERMINATED: i32 = 0;
pub const KILL_EXIT_CODE_SESSION_NOT_SPECIFIED: i32 = 1;
pub const KILL_EXIT_CODE_SESSION_DOES_NOT_EXIST: i32 = 3;

pub const KILL_TEXT_SESSION_NOT_SPECIFIED: &str = "Session must be specified";

pub fn kill_text_session_terminated(session_id: &str) -> String {
    format!("Session {} terminated", session_id)
}

pub fn kill_text_session_does_not_exist(session_id: &str) -> String {
    format!("Session {} does not exist", session_id)
}

/// What a `kill` exit code means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "exit_code", rename_all = "snake_case")]
pub enum KillOutcome {
    Terminated,
    SessionNotSpecified,
    SessionDoesNotExist,
    /// Any other exit code.
    Failed(i32),
    /// No exit code was available (the process never ran, or was killed by a signal).
    Unknown,
}

impl KillOutcome {
    pub fn from_exit_code(code: i32) -> Self {
        match code {
            KILL_EXIT_CODE_SESSION_TERMINATED => KillOutcome::Terminated,
            KILL_EXIT_CODE_SESSION_NOT_SPECIFIED => KillOutcome::SessionNotSpecified,
            KILL_EXIT_CODE_SESSION_DOES_NOT_EXIST => KillOutcome::SessionDoesNotExist,
            EXIT_CODE_UNAVAILABLE => KillOutcome::Unknown,
            other => KillOutcome::Failed(other),
        }
    }
}

impl std::fmt::Display for KillOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KillOutcome::Terminated => write!(f, "terminated"),
            KillOutcome::SessionNotSpecified => write!(f, "session not specified"),
            KillOutcome::SessionDoesNotExist => write!(f, "session does not exist"),
            KillOutcome::Failed(code) => write!(f, "failed with exit code {}", code),
            KillOutcome::Unknown => write!(f, "exit code unavailable"),
        }
    }
}
