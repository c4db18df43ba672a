use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ezsessions_core::ReaderError;
use tracing::trace;

use crate::types::{EventKind, SessionEntry};

/// Minimum number of tab-separated fields in an audit log line we process.
pub const MIN_FIELDS: usize = 5;

/// Parse one audit log line into a session entry.
///
/// Returns `None` for lines with too few fields and for event types that do
/// not affect sessions. Neither case is an error: both are common in real
/// audit logs.
pub fn parse_line(line: &str) -> Option<SessionEntry> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let kind = EventKind::from_label(fields[1]);
    let timestamp = fields[0].to_string();

    match kind {
        EventKind::Other => None,
        EventKind::Logout => {
            // Logout has no IP. Some writers leave the IP column empty
            // instead of dropping it; shift right in that case.
            let (username, session_id) = if fields[2].is_empty() {
                (fields[3], fields[4])
            } else {
                (fields[2], fields[3])
            };
            Some(SessionEntry {
                timestamp,
                kind,
                ip_address: String::new(),
                username: username.to_string(),
                session_id: session_id.to_string(),
            })
        }
        _ => Some(SessionEntry {
            timestamp,
            kind,
            ip_address: fields[2].to_string(),
            username: fields[3].to_string(),
            session_id: fields[4].to_string(),
        }),
    }
}

/// Scan every line of `reader`, keeping the session-related entries in
/// file order. Any read error aborts the scan.
pub fn scan_entries<R: BufRead>(mut reader: R, source: &Path) -> Result<Vec<SessionEntry>, ReaderError> {
    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut lineno = 0;

    loop {
        buf.clear();
        lineno += 1;

        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source_err| ReaderError::Scan {
                path: source.to_path_buf(),
                line: lineno,
                source: source_err,
            })?;
        if read == 0 {
            break;
        }

        // Usernames are not guaranteed to be UTF-8.
        let line = String::from_utf8_lossy(&buf);
        trace!(line = lineno, text = %line.trim_end(), "Scanned audit log line");

        if let Some(entry) = parse_line(&line) {
            entries.push(entry);
        }
    }

    trace!(lines = lineno - 1, entries = entries.len(), "Finished scanning audit log");
    Ok(entries)
}

/// Open and scan an audit log file.
pub fn read_entries(path: &Path) -> Result<Vec<SessionEntry>, ReaderError> {
    let file = File::open(path).map_err(|source| ReaderError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    scan_entries(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn test_parse_login_success() {
        let entry =
            parse_line("2020-05-24 00:17:37\tLogin.Success\t1.2.3.4\tbob\tSID000000000002\t").unwrap();
        assert_eq!(entry.timestamp, "2020-05-24 00:17:37");
        assert_eq!(entry.kind, EventKind::LoginSuccess);
        assert_eq!(entry.ip_address, "1.2.3.4");
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.session_id, "SID000000000002");
    }

    #[test]
    fn test_parse_relogin_and_ip_change() {
        let relogin =
            parse_line("t1\tLogin.Success.Relogin\t10.0.0.1\tcarol\tSID000000000003\tother").unwrap();
        assert_eq!(relogin.kind, EventKind::LoginSuccessRelogin);
        assert_eq!(relogin.ip_address, "10.0.0.1");

        let change = parse_line("t2\tsession.ipchange\t10.0.0.2\tcarol\tSID000000000003").unwrap();
        assert_eq!(change.kind, EventKind::SessionIpChange);
        assert_eq!(change.ip_address, "10.0.0.2");
        assert_eq!(change.session_id, "SID000000000003");
    }

    #[test]
    fn test_parse_logout_without_ip_column() {
        let entry = parse_line("t3\tLogout\talice\tSID000000000001\tother").unwrap();
        assert_eq!(entry.kind, EventKind::Logout);
        assert_eq!(entry.ip_address, "");
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.session_id, "SID000000000001");
    }

    #[test]
    fn test_parse_logout_with_empty_ip_column() {
        let entry = parse_line("t2\tLogout\t\talice\tSID0000000000001").unwrap();
        assert_eq!(entry.kind, EventKind::Logout);
        assert_eq!(entry.username, "alice");
        assert_eq!(entry.session_id, "SID0000000000001");
    }

    #[test]
    fn test_short_lines_skipped() {
        assert!(parse_line("garbage\tdata").is_none());
        assert!(parse_line("t1\tLogin.Success\t1.2.3.4\tbob").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_unknown_events_skipped() {
        assert!(parse_line("t1\tLogin.Failure\t1.2.3.4\tbob\tSID000000000002").is_none());
        assert!(parse_line("t1\tSystem\tStartup\tx\ty").is_none());
    }

    #[test]
    fn test_surrounding_whitespace_trimmed_case_preserved() {
        let entry = parse_line("  t1\tLogin.Success\t1.2.3.4\tBoB\tSID000000000002\r\n").unwrap();
        assert_eq!(entry.timestamp, "t1");
        assert_eq!(entry.username, "BoB");
        assert_eq!(entry.session_id, "SID000000000002");
    }

    #[test]
    fn test_scan_keeps_file_order_and_skips_noise() {
        let log = "t1\tLogin.Success\t1.2.3.4\talice\tSID000000000001\n\
                   garbage\tdata\n\
                   t2\tSystem\tStartup\t-\t-\n\
                   t3\tLogout\talice\tSID000000000001\t-\n\
                   t4\tLogin.Success\t5.6.7.8\tbob\tSID000000000002";

        let entries = scan_entries(Cursor::new(log), Path::new("audit.txt")).unwrap();

        let kinds: Vec<EventKind> = entries.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::LoginSuccess, EventKind::Logout, EventKind::LoginSuccess]
        );
        assert_eq!(entries[2].username, "bob");
    }

    #[test]
    fn test_scan_tolerates_invalid_utf8() {
        let mut log = b"t1\tLogin.Success\t1.2.3.4\tj\xF6rg\tSID000000000004\n".to_vec();
        log.extend_from_slice(b"t2\tLogin.Success\t1.2.3.5\tana\tSID000000000005\n");

        let entries = scan_entries(Cursor::new(log), Path::new("audit.txt")).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].session_id, "SID000000000004");
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
            }
            self.served = true;
            let line = b"t1\tLogin.Success\t1.2.3.4\talice\tSID000000000001\n";
            buf[..line.len()].copy_from_slice(line);
            Ok(line.len())
        }
    }

    #[test]
    fn test_scan_error_aborts_with_line_number() {
        let reader = BufReader::new(FailingReader { served: false });

        let err = scan_entries(reader, Path::new("audit.txt")).unwrap_err();

        match err {
            ReaderError::Scan { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_entries(Path::new("/nonexistent/audit/20200524.txt")).unwrap_err();
        assert!(matches!(err, ReaderError::Open { .. }));
    }
}
