use serde::{Deserialize, Serialize};

use crate::SESSION_ID_LENGTH;

/// A session for a specific user account, as reconstructed from a session source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSession {
    pub session_id: String,
    pub ip_address: String,
    pub username: String,
}

/// A collection of sessions, usually gathered before bulk processing.
pub type UserSessions = Vec<UserSession>;

impl UserSession {
    pub fn new(
        session_id: impl Into<String>,
        ip_address: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            session_id: session_id.into(),
            ip_address: ip_address.into(),
            username: username.into(),
        }
    }
}

/// Anything that can be filtered by username and keyed by session ID.
pub trait SessionRecord {
    fn username(&self) -> &str;
    fn session_id(&self) -> &str;
}

impl SessionRecord for UserSession {
    fn username(&self) -> &str {
        &self.username
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Check whether a value has the shape of an EZproxy 6.x session ID.
///
/// Informational only; log lines are never rejected on this basis.
pub fn is_valid_session_id(id: &str) -> bool {
    id.len() == SESSION_ID_LENGTH && id.chars().all(|c| c.is_ascii_alphanumeric())
}
