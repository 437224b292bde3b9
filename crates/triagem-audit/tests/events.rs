use serde_json::json;
use triagem_audit::events::{AuditAction, AuditEvent};
use triagem_audit::log::{AuditLog, MemoryAuditLog};
use triagem_core::session_id::SessionId;

#[test]
fn events_serialize_with_snake_case_actions() {
    let id = SessionId::generate("anxiety", jiff::Timestamp::UNIX_EPOCH).unwrap();
    let event = AuditEvent::for_session(AuditAction::SessionFinalized, &id, "anxiety")
        .with_details(json!({ "risk_level": "moderate" }));

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["action"], "session_finalized");
    assert_eq!(value["instrument_id"], "anxiety");
    assert_eq!(value["session_id"], id.as_str());
    assert_eq!(value["details"]["risk_level"], "moderate");
}

#[test]
fn only_failures_are_flagged() {
    assert!(AuditAction::ValidationFailed.is_failure());
    assert!(AuditAction::ResultPersistFailed.is_failure());
    assert!(!AuditAction::SessionStarted.is_failure());
    assert!(!AuditAction::SessionsEvicted.is_failure());
}

#[test]
fn memory_log_keeps_events_in_order() {
    let log = MemoryAuditLog::new();
    log.record(AuditEvent::new(AuditAction::SessionsEvicted).with_details(json!({ "evicted": 2 })));
    log.record(AuditEvent::new(AuditAction::SessionStarted));

    let actions: Vec<_> = log.events().into_iter().map(|e| e.action).collect();
    assert_eq!(actions, [AuditAction::SessionsEvicted, AuditAction::SessionStarted]);
}
