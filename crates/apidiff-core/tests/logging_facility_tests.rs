//! Error-boundary logging: what an `end_error` event carries for the
//! failures a check can actually hit.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidiff_core::apidiff_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND,
};
use apidiff_core::errors::{ApiDiffError, ExError, ExErrorKind};
use apidiff_core::logging_facility::test_capture::{init_test_capture, CapturedEvent};
use apidiff_core::{log_op_end, log_op_error, log_op_start};
use tracing::Level;

fn only_error_event(op: &str) -> CapturedEvent {
    let mut events: Vec<_> = init_test_capture()
        .events_for_op(op)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();
    assert_eq!(events.len(), 1, "events for {}: {:?}", op, events);
    events.remove(0)
}

// S1: a parse failure logs its code and the file:line it points at
#[test]
fn test_parse_failure_carries_position() {
    init_test_capture();
    let err = ApiDiffError::Parse {
        path: "client.go".to_string(),
        line: 14,
        message: "syntax error".to_string(),
    };

    log_op_error!("parse_client_go", err, duration_ms = 3);

    let event = only_error_event("parse_client_go");
    assert_eq!(event.level, Level::ERROR);
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_PARSE"));
    assert_eq!(event.field(FIELD_ERR_KIND), Some("Parse"));
    assert!(event.field("message").unwrap().contains("(client.go:14)"));
}

// S2: extra fields and the package tag both survive on a package-scoped failure
#[test]
fn test_package_scoped_failure() {
    init_test_capture();
    let err = ExError::from(ApiDiffError::UnsupportedSyntax {
        path: "gen.go".to_string(),
        line: 9,
        node_kind: "type_elem".to_string(),
    })
    .with_package("pkg/gen");

    log_op_error!(
        "check_pkg_gen",
        err,
        duration_ms = 1,
        package = "pkg/gen"
    );

    let event = only_error_event("check_pkg_gen");
    assert_eq!(event.package.as_deref(), Some("pkg/gen"));
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_UNSUPPORTED_SYNTAX"));
    let message = event.field("message").unwrap();
    assert!(message.contains("type_elem"));
    assert!(message.contains("(package: pkg/gen)"));
}

// S3: a bad base revision logs the git stderr, not just the code
#[test]
fn test_retrieval_failure_keeps_git_stderr() {
    init_test_capture();
    let err = ApiDiffError::Retrieval {
        op: "git diff".to_string(),
        stderr: "fatal: bad revision 'nope'\n".to_string(),
    };

    log_op_error!("list_changes_bad_rev", err, duration_ms = 0);

    let event = only_error_event("list_changes_bad_rev");
    assert_eq!(event.field(FIELD_ERR_CODE), Some("ERR_RETRIEVAL"));
    let message = event.field("message").unwrap();
    assert!(message.contains("in operation 'git diff'"));
    assert!(message.contains("fatal: bad revision 'nope'"));
}

// S4: boundaries log at debug, and an error replaces the end event
#[test]
fn test_boundary_levels() {
    let capture = init_test_capture();

    log_op_start!("summarize_ok", package = "pkg/ok");
    log_op_end!("summarize_ok", duration_ms = 2, decl_count = 7);

    log_op_start!("summarize_failed", package = "pkg/bad");
    log_op_error!(
        "summarize_failed",
        ExError::new(ExErrorKind::Io).with_message("permission denied"),
        duration_ms = 2
    );

    let ok = capture.events_for_op("summarize_ok");
    assert_eq!(ok.len(), 2);
    assert!(ok.iter().all(|e| e.level == Level::DEBUG));
    let end = ok
        .iter()
        .find(|e| e.event.as_deref() == Some(EVENT_END))
        .unwrap();
    assert_eq!(end.field("decl_count"), Some("7"));
    assert_eq!(end.field(FIELD_DURATION_MS), Some("2"));
    assert!(end.field(FIELD_COMPONENT).is_some());

    let failed = capture.events_for_op("summarize_failed");
    let events: Vec<_> = failed.iter().filter_map(|e| e.event.as_deref()).collect();
    assert_eq!(events, vec![EVENT_START, EVENT_END_ERROR]);
}
