use super::*;
use crate::ErrorCode;
use natint_ir::Span;
use pretty_assertions::assert_eq;

fn error_at(code: ErrorCode, start: u32, message: &str) -> Diagnostic {
    Diagnostic::new(code, Span::new(start, start + 1), message)
}

#[test]
fn test_flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(ErrorCode::E2002, 30, "third")));
    assert!(queue.add(error_at(ErrorCode::E1001, 10, "first")));
    assert!(queue.add(error_at(ErrorCode::E3001, 20, "second")));

    let messages: Vec<String> = queue.flush().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn test_deduplicates_identical_reports() {
    let mut queue = DiagnosticQueue::new();
    assert!(queue.add(error_at(ErrorCode::E2003, 5, "ambiguous")));
    assert!(!queue.add(error_at(ErrorCode::E2003, 5, "ambiguous")));
    // Same code at a different position is a different report.
    assert!(queue.add(error_at(ErrorCode::E2003, 9, "ambiguous")));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.error_count(), 2);
}

#[test]
fn test_deduplication_can_be_disabled() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 0,
        deduplicate: false,
    });
    assert!(queue.add(error_at(ErrorCode::E2003, 5, "ambiguous")));
    assert!(queue.add(error_at(ErrorCode::E2003, 5, "ambiguous")));
    assert_eq!(queue.len(), 2);
}

#[test]
fn test_error_limit_drops_errors_not_warnings() {
    let mut queue = DiagnosticQueue::with_config(DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    });
    assert!(queue.add(error_at(ErrorCode::E4001, 1, "one")));
    assert!(queue.add(error_at(ErrorCode::E4001, 2, "two")));
    assert!(!queue.add(error_at(ErrorCode::E4001, 3, "three")));

    assert!(queue.add(error_at(ErrorCode::W4001, 4, "hides")));
    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.warning_count(), 1);
}

#[test]
fn test_has_errors_ignores_warnings() {
    let mut queue = DiagnosticQueue::new();
    assert!(!queue.has_errors());
    assert!(queue.add(error_at(ErrorCode::W4001, 0, "hides")));
    assert!(!queue.has_errors());
    assert!(queue.add(error_at(ErrorCode::E4002, 0, "nothing to override")));
    assert!(queue.has_errors());
    assert_eq!(queue.len(), 2);
}
