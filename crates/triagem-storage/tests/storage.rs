use std::collections::BTreeMap;
use std::io::Write;

use triagem_core::models::result::ScoreResult;
use triagem_core::models::risk::RiskLevel;
use triagem_core::models::session::{Session, SessionState};
use triagem_core::session_id::SessionId;
use triagem_storage::results::{JsonlResultSink, MemoryResultSink, ResultSink, load_history};
use triagem_storage::sessions::{FileSessionStore, MemorySessionStore, SessionStore};
use triagem_storage::state::{load_state, save_state};
use triagem_storage::error::StorageError;

fn ts(secs: i64) -> jiff::Timestamp {
    jiff::Timestamp::from_second(secs).expect("valid timestamp")
}

fn session(instrument_id: &str, started: i64) -> Session {
    let id = SessionId::generate(instrument_id, ts(started)).unwrap();
    let mut session = Session::new(id, instrument_id, ts(started));
    session.responses.insert("q1", 3);
    session
}

fn result_for(session: &Session, total: u32) -> ScoreResult {
    ScoreResult {
        session_id: session.id.clone(),
        instrument_id: session.instrument_id.clone(),
        instrument_name: "Test".to_string(),
        total_score: total,
        max_score: 40,
        percentage: f64::from(total) / 40.0 * 100.0,
        subscale_scores: BTreeMap::new(),
        risk_level: RiskLevel::Mild,
        interpretation: "Mild symptoms present".to_string(),
        recommendations: vec!["Rest".to_string()],
        detailed_analysis: BTreeMap::new(),
        scientific_basis: "Fixture".to_string(),
        elapsed_seconds: 120,
        timestamp: ts(1_700_000_600),
    }
}

fn exercise_store(store: &dyn SessionStore) {
    let first = session("anxiety", 1_700_000_000);
    let second = session("depression", 1_700_000_100);

    assert!(store.get(&first.id).unwrap().is_none());
    store.put(&second).unwrap();
    store.put(&first).unwrap();

    let mut updated = first.clone();
    updated.state = SessionState::Answering;
    store.put(&updated).unwrap();

    let loaded = store.get(&first.id).unwrap().expect("stored session");
    assert_eq!(loaded.state, SessionState::Answering);
    assert_eq!(loaded.responses.get("q1"), Some(3));

    let ids: Vec<_> = store.list().unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![first.id.clone(), second.id.clone()]);

    assert!(store.delete(&first.id).unwrap());
    assert!(!store.delete(&first.id).unwrap());
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn memory_session_store_round_trips() {
    exercise_store(&MemorySessionStore::new());
}

#[test]
fn file_session_store_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    exercise_store(&FileSessionStore::new(dir.path().join("sessions")));
}

#[test]
fn file_session_store_lists_nothing_before_first_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSessionStore::new(dir.path().join("missing"));
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn missing_state_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_state::<Session>(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, StorageError::NotFound { .. }));
}

#[test]
fn save_state_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("state.json");
    save_state(&path, &vec![1, 2, 3]).unwrap();

    assert_eq!(load_state::<Vec<i32>>(&path).unwrap(), vec![1, 2, 3]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn memory_sink_keeps_records_in_order() {
    let sink = MemoryResultSink::new();
    let a = session("adhd", 1_700_000_000);
    let b = session("adhd", 1_700_000_050);
    sink.persist(&result_for(&a, 10), &a).unwrap();
    sink.persist(&result_for(&b, 20), &b).unwrap();

    let records = sink.records().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].result.total_score, 10);
    assert_eq!(records[1].result.session_id, b.id);
    assert_eq!(records[1].responses.get("q1"), Some(3));
}

#[test]
fn jsonl_sink_appends_and_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let sink = JsonlResultSink::new(dir.path().join("history.jsonl"));

    let a = session("bipolar", 1_700_000_000);
    let b = session("narcissism", 1_700_000_300);
    sink.persist(&result_for(&a, 12), &a).unwrap();
    sink.persist(&result_for(&b, 30), &b).unwrap();

    let records = sink.load_all().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].result, result_for(&a, 12));
    assert_eq!(records[1].started_at, b.started_at);
}

#[test]
fn history_skips_malformed_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.jsonl");
    let sink = JsonlResultSink::new(&path);
    let a = session("mythomania", 1_700_000_000);
    sink.persist(&result_for(&a, 5), &a).unwrap();

    let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
    writeln!(file, "{{not json").unwrap();
    writeln!(file).unwrap();

    assert_eq!(load_history(&path).unwrap().len(), 1);
}

#[test]
fn missing_history_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_history(&dir.path().join("none.jsonl")).unwrap().is_empty());
}

/// A store whose backend is down, as an external implementation would be.
struct OfflineStore;

impl SessionStore for OfflineStore {
    fn get(&self, _id: &SessionId) -> Result<Option<Session>, StorageError> {
        Err(StorageError::Unavailable("replica offline".to_string()))
    }

    fn put(&self, _session: &Session) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("replica offline".to_string()))
    }

    fn delete(&self, _id: &SessionId) -> Result<bool, StorageError> {
        Err(StorageError::Unavailable("replica offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Session>, StorageError> {
        Err(StorageError::Unavailable("replica offline".to_string()))
    }
}

#[test]
fn external_store_reports_an_unavailable_backend() {
    let store: Box<dyn SessionStore> = Box::new(OfflineStore);
    let err = store.put(&session("anxiety", 1_700_000_000)).unwrap_err();

    assert!(matches!(err, StorageError::Unavailable(_)));
    assert_eq!(err.to_string(), "storage unavailable: replica offline");
}
