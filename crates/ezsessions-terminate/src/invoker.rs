use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use ezsessions_core::{Diagnostics, UserSession};
use tracing::{debug, warn};

use crate::{TerminationError, TerminationResult, EXIT_CODE_UNAVAILABLE, KILL_SUBCOMMAND};

/// Something that can terminate user sessions.
pub trait Terminator {
    /// Terminate every session in order, returning one result per session.
    fn terminate(&self, sessions: &[UserSession]) -> Vec<TerminationResult>;
}

/// Terminates sessions by running `<executable> kill <session-id>`.
///
/// Calls run one at a time on the calling thread with no timeout; a hung
/// executable hangs the batch.
#[derive(Debug, Clone)]
pub struct CommandTerminator {
    executable: PathBuf,
    diagnostics: Diagnostics,
}

impl CommandTerminator {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    fn terminate_one(&self, session: &UserSession) -> TerminationResult {
        debug!(
            session_id = %session.session_id,
            username = %session.username,
            "Terminating session"
        );

        let mut cmd = Command::new(&self.executable);
        cmd.arg(KILL_SUBCOMMAND)
            .arg(&session.session_id)
            .stdin(Stdio::null());

        debug!(
            command = %format!("{} {} {}", self.executable.display(), KILL_SUBCOMMAND, session.session_id),
            "Executing"
        );

        let result = match cmd.output() {
            Ok(output) => result_from_output(&session.session_id, &output),
            Err(err) => {
                warn!(
                    executable = %self.executable.display(),
                    error = %err,
                    "Failed to run kill subcommand"
                );
                let mut result = TerminationResult::new(&session.session_id);
                result.error = Some(TerminationError::from_spawn_error(&err));
                result
            }
        };

        debug!(
            exit_code = result.exit_code,
            stdout = %result.stdout,
            stderr = %result.stderr,
            "Kill subcommand completed"
        );

        result
    }
}

impl Terminator for CommandTerminator {
    fn terminate(&self, sessions: &[UserSession]) -> Vec<TerminationResult> {
        self.diagnostics.scope(|| {
            sessions
                .iter()
                .map(|session| self.terminate_one(session))
                .collect()
        })
    }
}

/// Terminate `sessions` using the given executable.
pub fn terminate_user_sessions(
    executable: impl Into<PathBuf>,
    sessions: &[UserSession],
) -> Vec<TerminationResult> {
    CommandTerminator::new(executable).terminate(sessions)
}

fn result_from_output(session_id: &str, output: &Output) -> TerminationResult {
    let mut result = TerminationResult::new(session_id);
    result.exit_code = output.status.code().unwrap_or(EXIT_CODE_UNAVAILABLE);
    result.stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    result.stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

    if !output.status.success() {
        if output.status.code().is_none() {
            debug!("No exit code available; process did not exit normally");
        }
        result.error = Some(TerminationError::NonZeroExit {
            code: result.exit_code,
        });
    }

    result
}
