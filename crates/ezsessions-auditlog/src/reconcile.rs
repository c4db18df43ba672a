use std::collections::HashMap;

use ezsessions_core::ALL_USERS_SESSIONS_LIMIT;

use crate::types::{EventKind, SessionEntries, SessionEntry};

/// Fold audit log entries (in file order) into the sessions still active at
/// the end of the log.
///
/// The last login-class entry for a session ID wins over earlier ones. A
/// logout for that ID anywhere in the same pass removes it. Logouts for IDs
/// never seen logging in are ignored. Output order is unspecified.
pub fn reconcile<I>(entries: I) -> SessionEntries
where
    I: IntoIterator<Item = SessionEntry>,
{
    let mut active: HashMap<String, SessionEntry> = HashMap::with_capacity(ALL_USERS_SESSIONS_LIMIT);
    let mut logouts: Vec<String> = Vec::new();

    for entry in entries {
        match entry.kind {
            EventKind::Logout => logouts.push(entry.session_id),
            kind if kind.is_login_class() => {
                active.insert(entry.session_id.clone(), entry);
            }
            _ => {}
        }
    }

    for session_id in &logouts {
        active.remove(session_id);
    }

    active.into_values().collect()
}
