//! # ezsessions-core
//!
//! Shared building blocks for reconstructing EZproxy user sessions.
//!
//! ## Key Types
//!
//! - [`UserSession`] - An active session for one user account
//! - [`SessionsReader`] - Capability set every session source implements
//! - [`SearchSettings`] - Delay and retry budget applied to each query
//! - [`RetryingSearch`] - Bounded retry loop compensating for delayed writes
//! - [`Diagnostics`] - Injected diagnostic sink (no-op unless provided)
//!
//! ## Write lag
//!
//! EZproxy does not flush session events to disk the moment they happen.
//! Every query therefore sleeps before each attempt and retries while the
//! result is empty, up to the configured number of extra attempts.

mod diagnostics;
mod error;
mod reader;
mod search;
mod session;
mod settings;

pub use diagnostics::Diagnostics;
pub use error::{ConfigError, ReaderError};
pub use reader::SessionsReader;
pub use search::{filter_by_username, RetryingSearch};
pub use session::{is_valid_session_id, SessionRecord, UserSession, UserSessions};
pub use settings::{SearchSettings, Sleeper, ThreadSleeper};

/// Approximates the `::Limit=X` value of the EZproxy `user.txt` config.
/// Used as a preallocation hint for per-user collections.
pub const SESSIONS_LIMIT: usize = 4;

/// Preallocation hint for collections holding sessions of all users.
pub const ALL_USERS_SESSIONS_LIMIT: usize = SESSIONS_LIMIT * 10;

/// Session ID length as of the EZproxy 6.x series.
pub const SESSION_ID_LENGTH: usize = 15;
