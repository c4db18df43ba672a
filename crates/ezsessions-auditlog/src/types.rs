use chrono::NaiveDateTime;
use ezsessions_core::{SessionRecord, UserSession, UserSessions};
use serde::{Deserialize, Serialize};

/// Layout of the audit log Date/Time column, e.g. `2020-05-24 00:17:37`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Audit log event types relevant to session tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    LoginSuccess,
    LoginSuccessRelogin,
    SessionIpChange,
    Logout,
    /// Any other event type. Never retained past parsing.
    Other,
}

impl EventKind {
    const KNOWN: [EventKind; 4] = [
        EventKind::LoginSuccess,
        EventKind::LoginSuccessRelogin,
        EventKind::SessionIpChange,
        EventKind::Logout,
    ];

    /// Match an audit log event label, ignoring case.
    pub fn from_label(label: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
            .unwrap_or(EventKind::Other)
    }

    /// The label EZproxy writes for this event.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::LoginSuccess => "Login.Success",
            EventKind::LoginSuccessRelogin => "Login.Success.Relogin",
            EventKind::SessionIpChange => "Session.IPChange",
            EventKind::Logout => "Logout",
            EventKind::Other => "Other",
        }
    }

    /// Login-class events establish (or re-establish) a session.
    pub fn is_login_class(&self) -> bool {
        matches!(
            self,
            EventKind::LoginSuccess | EventKind::LoginSuccessRelogin | EventKind::SessionIpChange
        )
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One session-related line of the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Kept verbatim; see [`SessionEntry::parsed_timestamp`].
    pub timestamp: String,
    pub kind: EventKind,
    /// Empty for `Logout` entries.
    pub ip_address: String,
    pub username: String,
    pub session_id: String,
}

pub type SessionEntries = Vec<SessionEntry>;

impl SessionEntry {
    /// Parse the Date/Time column. `None` when it does not follow the
    /// audit log layout.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    pub fn to_user_session(&self) -> UserSession {
        UserSession {
            session_id: self.session_id.clone(),
            ip_address: self.ip_address.clone(),
            username: self.username.clone(),
        }
    }
}

impl From<SessionEntry> for UserSession {
    fn from(entry: SessionEntry) -> Self {
        UserSession {
            session_id: entry.session_id,
            ip_address: entry.ip_address,
            username: entry.username,
        }
    }
}

impl SessionRecord for SessionEntry {
    fn username(&self) -> &str {
        &self.username
    }

    fn session_id(&self) -> &str {
        &self.session_id
    }
}

/// Convert a collection of audit log entries into user sessions.
pub fn into_user_sessions(entries: SessionEntries) -> UserSessions {
    entries.into_iter().map(UserSession::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn entry(timestamp: &str) -> SessionEntry {
        SessionEntry {
            timestamp: timestamp.to_string(),
            kind: EventKind::LoginSuccess,
            ip_address: "192.168.1.10".to_string(),
            username: "Alice".to_string(),
            session_id: "SID000000000001".to_string(),
        }
    }

    #[test]
    fn test_event_labels_case_insensitive() {
        assert_eq!(EventKind::from_label("Login.Success"), EventKind::LoginSuccess);
        assert_eq!(EventKind::from_label("login.success"), EventKind::LoginSuccess);
        assert_eq!(
            EventKind::from_label("LOGIN.SUCCESS.RELOGIN"),
            EventKind::LoginSuccessRelogin
        );
        assert_eq!(
            EventKind::from_label("session.ipchange"),
            EventKind::SessionIpChange
        );
        assert_eq!(EventKind::from_label("LogOut"), EventKind::Logout);
        assert_eq!(EventKind::from_label("Login.Failure"), EventKind::Other);
        assert_eq!(EventKind::from_label("System"), EventKind::Other);
        assert_eq!(EventKind::from_label(""), EventKind::Other);
    }

    #[test]
    fn test_login_class() {
        assert!(EventKind::LoginSuccess.is_login_class());
        assert!(EventKind::LoginSuccessRelogin.is_login_class());
        assert!(EventKind::SessionIpChange.is_login_class());
        assert!(!EventKind::Logout.is_login_class());
        assert!(!EventKind::Other.is_login_class());
    }

    #[test]
    fn test_parsed_timestamp() {
        let ts = entry("2020-05-24 00:17:37").parsed_timestamp().unwrap();
        assert_eq!(ts.year(), 2020);
        assert_eq!(ts.month(), 5);
        assert_eq!(ts.day(), 24);
        assert_eq!(ts.minute(), 17);
        assert_eq!(ts.second(), 37);

        assert!(entry("t1").parsed_timestamp().is_none());
    }

    #[test]
    fn test_conversion_preserves_fields() {
        let session: UserSession = entry("t1").into();
        assert_eq!(session.session_id, "SID000000000001");
        assert_eq!(session.ip_address, "192.168.1.10");
        assert_eq!(session.username, "Alice");
        assert_eq!(entry("t1").to_user_session(), session);
    }
}
