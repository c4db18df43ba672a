#![cfg(unix)]

use ezsessions_core::UserSession;
use ezsessions_terminate::{
    terminate_user_sessions, CommandTerminator, KillOutcome, TerminationError, Terminator,
};

fn sessions() -> Vec<UserSession> {
    vec![
        UserSession::new("SID000000000001", "192.168.1.10", "alice"),
        UserSession::new("SID000000000002", "192.168.1.20", "alice"),
        UserSession::new("SID000000000003", "10.0.0.5", "alice"),
    ]
}

#[test]
fn test_successful_termination() {
    let results = terminate_user_sessions("true", &sessions());

    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(result.success());
        assert_eq!(result.exit_code, 0);
        assert_eq!(result.outcome(), KillOutcome::Terminated);
    }
}

#[test]
fn test_results_follow_input_order() {
    let results = terminate_user_sessions("true", &sessions());

    let ids: Vec<&str> = results.iter().map(|r| r.session_id.as_str()).collect();
    assert_eq!(ids, vec!["SID000000000001", "SID000000000002", "SID000000000003"]);
}

#[test]
fn test_arguments_and_stdout_captured() {
    let results = CommandTerminator::new("echo").terminate(&sessions()[..1]);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].stdout, "kill SID000000000001");
    assert_eq!(results[0].stderr, "");
}

#[test]
fn test_non_zero_exit_recorded() {
    let results = terminate_user_sessions("false", &sessions());

    assert_eq!(results.len(), 3);
    for result in &results {
        assert_eq!(result.exit_code, 1);
        assert_eq!(result.error, Some(TerminationError::NonZeroExit { code: 1 }));
        assert_eq!(result.outcome(), KillOutcome::SessionNotSpecified);
    }
}

#[test]
fn test_missing_binary_does_not_abort_batch() {
    let results = terminate_user_sessions("/nonexistent/ezproxy", &sessions());

    assert_eq!(results.len(), 3);
    for result in &results {
        assert!(matches!(result.error, Some(TerminationError::NotFound { .. })));
        assert_eq!(result.outcome(), KillOutcome::Unknown);
        assert!(!result.success());
    }
}

#[test]
fn test_directory_is_not_executable() {
    let results = terminate_user_sessions(std::env::temp_dir(), &sessions()[..1]);

    assert!(matches!(results[0].error, Some(TerminationError::NotFound { .. })));
}

#[test]
fn test_empty_batch() {
    assert!(terminate_user_sessions("true", &[]).is_empty());
}

#[test]
fn test_result_serializes_error_kind() {
    let results = terminate_user_sessions("false", &sessions()[..1]);

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["session_id"], "SID000000000001");
    assert_eq!(json["exit_code"], 1);
    assert_eq!(json["error"]["kind"], "non_zero_exit");
    assert_eq!(json["error"]["code"], 1);
}
