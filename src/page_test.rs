use serde_json::json;

use super::*;

#[test]
fn successful_submission_notifies_success() {
    let outcome: Result<Value, PageError> = Ok(json!({"ok": true}));
    assert_eq!(submission_notification(&outcome), Notification::success());
}

#[test]
fn failed_submission_notifies_error() {
    let outcome: Result<Value, PageError> = Err(PageError::Status(500));
    assert_eq!(submission_notification(&outcome), Notification::error());
}

#[test]
fn failed_initial_load_notifies_error() {
    let outcome: Result<Value, PageError> = Err(PageError::Status(404));
    assert_eq!(load_notification(&outcome), Some(Notification::load_error()));
    assert_eq!(load_notification(&outcome).map(|n| n.title).as_deref(), Some("Error"));
}

#[test]
fn successful_initial_load_is_silent() {
    let outcome: Result<Value, PageError> = Ok(json!({"designs": []}));
    assert_eq!(load_notification(&outcome), None);
}

#[test]
fn status_ranges() {
    assert!(is_success_status(200));
    assert!(is_success_status(204));
    assert!(!is_success_status(199));
    assert!(!is_success_status(302));
    assert!(!is_success_status(404));
}

#[test]
fn status_error_message() {
    assert_eq!(PageError::Status(503).to_string(), "unexpected status 503");
}

#[test]
fn content_payload_skips_null() {
    assert_eq!(content_payload(&Value::Null), None);
    assert_eq!(content_payload(&json!({"a": 1})).as_deref(), Some("{\"a\":1}"));
    assert_eq!(content_payload(&json!([])).as_deref(), Some("[]"));
}
