//! # ezsessions-terminate
//!
//! Terminates EZproxy sessions by calling `<ezproxy> kill <session-id>` once
//! per session. Each call is captured as a [`TerminationResult`]; failures are
//! recorded per session and never abort the rest of the batch.

mod contract;
mod error;
mod invoker;
mod result;

pub use contract::{
    kill_text_session_does_not_exist, kill_text_session_terminated, KillOutcome,
    DEFAULT_BINARY_NAME, KILL_EXIT_CODE_SESSION_DOES_NOT_EXIST, KILL_EXIT_CODE_SESSION_NOT_SPECIFIED,
    KILL_EXIT_CODE_SESSION_TERMINATED, KILL_SUBCOMMAND, KILL_TEXT_SESSION_NOT_SPECIFIED,
};
pub use error::TerminationError;
pub use invoker::{terminate_user_sessions, CommandTerminator, Terminator};
pub use result::{TerminationResult, EXIT_CODE_UNAVAILABLE};
