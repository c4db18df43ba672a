//! # ezsessions-auditlog
//!
//! Reconstructs active EZproxy sessions from an audit log
//! (`audit/YYYYMMDD.txt`).
//!
//! Each line of the audit log holds tab-separated fields. As of EZproxy 6.x
//! the columns are Date/Time, Event, IP, Username, Session and Other; only the
//! first five are used. `Logout` lines carry no IP, so their username and
//! session ID sit one column to the left.
//!
//! A session is active when its most recent login-class event
//! (`Login.Success`, `Login.Success.Relogin` or `Session.IPChange`) is not
//! followed anywhere in the same file by a `Logout` for the same session ID.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ezsessions_auditlog::AuditLogReader;
//! use ezsessions_core::SessionsReader;
//!
//! let mut reader = AuditLogReader::new("/usr/local/ezproxy/audit/20200524.txt")?;
//! reader.configure(1, 7)?;
//!
//! for session in reader.user_sessions("alice")? {
//!     println!("{} {}", session.session_id, session.ip_address);
//! }
//! ```

mod parser;
mod reader;
mod reconcile;
mod types;

pub use parser::{parse_line, read_entries, scan_entries, MIN_FIELDS};
pub use reader::AuditLogReader;
pub use reconcile::reconcile;
pub use types::{into_user_sessions, EventKind, SessionEntries, SessionEntry, TIMESTAMP_FORMAT};
