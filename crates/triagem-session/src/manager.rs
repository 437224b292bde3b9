use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;

use triagem_audit::events::{AuditAction, AuditEvent};
use triagem_audit::log::{AuditLog, TracingAuditLog};
use triagem_core::models::response::{LIKERT_MAX, LIKERT_MIN, ResponseSet};
use triagem_core::models::result::ScoreResult;
use triagem_core::models::session::{Session, SessionState};
use triagem_core::session_id::SessionId;
use triagem_instruments::aggregate;
use triagem_instruments::catalog::Catalog;
use triagem_instruments::error::{InstrumentError, OutOfRangeResponse, ValidationError};
use triagem_instruments::interpret;
use triagem_instruments::scoring::{Instrument, InstrumentSummary};
use triagem_instruments::validate;
use triagem_storage::results::ResultSink;
use triagem_storage::sessions::SessionStore;

use crate::error::SessionError;

/// Attempts at drawing a session id that is not already stored.
const ID_ATTEMPTS: usize = 3;

/// Drives sessions through `created -> answering -> finalized`.
///
/// Every mutating call on a session holds that session's lock, so two
/// concurrent `finalize` calls on the same id cannot both succeed.
pub struct SessionManager {
    catalog: Catalog,
    store: Arc<dyn SessionStore>,
    sink: Arc<dyn ResultSink>,
    audit: Arc<dyn AuditLog>,
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl SessionManager {
    pub fn new(catalog: Catalog, store: Arc<dyn SessionStore>, sink: Arc<dyn ResultSink>) -> Self {
        Self {
            catalog,
            store,
            sink,
            audit: Arc::new(TracingAuditLog),
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditLog>) -> Self {
        self.audit = audit;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn get_instrument(&self, id: &str) -> Result<Arc<Instrument>, SessionError> {
        Ok(self.catalog.get(id)?)
    }

    pub fn list_instruments(&self) -> Vec<InstrumentSummary> {
        self.catalog.list()
    }

    /// Open a new session for `instrument_id`, ready for answers.
    pub fn start(&self, instrument_id: &str) -> Result<Session, SessionError> {
        let instrument = self.catalog.get(instrument_id)?;
        let now = jiff::Timestamp::now();

        let mut id = SessionId::generate(&instrument.id, now)?;
        for _ in 1..ID_ATTEMPTS {
            if self.store.get(&id)?.is_none() {
                break;
            }
            id = SessionId::generate(&instrument.id, now)?;
        }

        let mut session = Session::new(id, instrument.id.clone(), now);
        session.state = SessionState::Answering;
        self.store.put(&session)?;

        tracing::info!(session_id = %session.id, instrument_id = %instrument.id, "session started");
        self.audit.record(AuditEvent::for_session(
            AuditAction::SessionStarted,
            &session.id,
            &instrument.id,
        ));
        Ok(session)
    }

    /// Record a single answer on an open session.
    pub fn record_answer(
        &self,
        session_id: &SessionId,
        question_id: &str,
        value: i32,
    ) -> Result<Session, SessionError> {
        let lock = self.session_lock(session_id)?;
        let _guard = lock.lock().map_err(|_| SessionError::LockPoisoned)?;

        let mut session = self.open_session(session_id)?;
        let instrument = self.catalog.get(&session.instrument_id)?;

        if instrument.question(question_id).is_none() {
            return Err(SessionError::UnknownQuestion {
                instrument_id: instrument.id.clone(),
                question_id: question_id.to_string(),
            });
        }
        if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                responses: vec![OutOfRangeResponse {
                    question_id: question_id.to_string(),
                    value,
                }],
            }
            .into());
        }

        session.responses.insert(question_id, value);
        session.state = SessionState::Answering;
        self.store.put(&session)?;

        tracing::debug!(session_id = %session.id, question_id, "answer recorded");
        self.audit.record(
            AuditEvent::for_session(AuditAction::AnswerRecorded, &session.id, &instrument.id)
                .with_details(json!({ "question_id": question_id })),
        );
        Ok(session)
    }

    /// Score the session and close it.
    ///
    /// `responses` are merged over answers recorded earlier. On a validation
    /// failure the session stays open with the merged answers saved. A
    /// failure to persist the result is logged and audited but does not
    /// prevent the result from being returned.
    pub fn finalize(
        &self,
        session_id: &SessionId,
        responses: &ResponseSet,
        elapsed_seconds: u64,
    ) -> Result<ScoreResult, SessionError> {
        let lock = self.session_lock(session_id)?;
        let _guard = lock.lock().map_err(|_| SessionError::LockPoisoned)?;

        let mut session = self.open_session(session_id)?;
        let instrument = self.catalog.get(&session.instrument_id)?;

        session.responses.merge(responses);
        session.state = SessionState::Answering;

        let now = jiff::Timestamp::now();
        let result = match score(&instrument, &session, elapsed_seconds, now) {
            Ok(result) => result,
            Err(e) => {
                self.store.put(&session)?;
                if let InstrumentError::Validation(validation) = &e {
                    self.audit.record(
                        AuditEvent::for_session(
                            AuditAction::ValidationFailed,
                            &session.id,
                            &instrument.id,
                        )
                        .with_details(json!({ "error": validation })),
                    );
                }
                return Err(e.into());
            }
        };

        session.state = SessionState::Finalized;
        session.finalized_at = Some(now);
        self.store.put(&session)?;

        if let Err(e) = self.sink.persist(&result, &session) {
            tracing::warn!(
                session_id = %session.id,
                error = %e,
                "failed to persist result; returning it anyway"
            );
            self.audit.record(
                AuditEvent::for_session(
                    AuditAction::ResultPersistFailed,
                    &session.id,
                    &instrument.id,
                )
                .with_details(json!({ "error": e.to_string() })),
            );
        }

        tracing::info!(
            session_id = %session.id,
            instrument_id = %instrument.id,
            total_score = result.total_score,
            risk_level = %result.risk_level,
            "session finalized"
        );
        self.audit.record(
            AuditEvent::for_session(AuditAction::SessionFinalized, &session.id, &instrument.id)
                .with_details(json!({
                    "total_score": result.total_score,
                    "max_score": result.max_score,
                    "risk_level": result.risk_level,
                    "elapsed_seconds": elapsed_seconds,
                })),
        );
        Ok(result)
    }

    pub fn session(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        self.store
            .get(session_id)?
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }

    /// Remove every session, open or finalized, that started more than
    /// `max_age` before `now`. Returns how many were removed.
    pub fn evict_stale(
        &self,
        max_age: jiff::SignedDuration,
        now: jiff::Timestamp,
    ) -> Result<usize, SessionError> {
        let stale: Vec<SessionId> = self
            .store
            .list()?
            .into_iter()
            .filter(|s| s.age(now) > max_age)
            .map(|s| s.id)
            .collect();

        let mut evicted = 0;
        for id in &stale {
            let lock = self.session_lock(id)?;
            let _guard = lock.lock().map_err(|_| SessionError::LockPoisoned)?;
            if self.store.delete(id)? {
                evicted += 1;
            }
        }

        if !stale.is_empty() {
            let mut locks = self.locks.lock().map_err(|_| SessionError::LockPoisoned)?;
            for id in &stale {
                locks.remove(id);
            }
        }

        if evicted > 0 {
            tracing::info!(evicted, "stale sessions evicted");
            self.audit.record(
                AuditEvent::new(AuditAction::SessionsEvicted)
                    .with_details(json!({ "evicted": evicted })),
            );
        }
        Ok(evicted)
    }

    /// Number of session ids currently holding a lock entry.
    pub fn tracked_locks(&self) -> Result<usize, SessionError> {
        let locks = self.locks.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(locks.len())
    }

    fn session_lock(&self, session_id: &SessionId) -> Result<Arc<Mutex<()>>, SessionError> {
        let mut locks = self.locks.lock().map_err(|_| SessionError::LockPoisoned)?;
        Ok(locks.entry(session_id.clone()).or_default().clone())
    }

    /// Load a session that can still take answers. Must be called with the
    /// session's lock held; the lock entry is dropped if the session is gone.
    fn open_session(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        let Some(session) = self.store.get(session_id)? else {
            let mut locks = self.locks.lock().map_err(|_| SessionError::LockPoisoned)?;
            locks.remove(session_id);
            return Err(SessionError::NotFound(session_id.clone()));
        };
        if session.is_finalized() {
            return Err(SessionError::AlreadyFinalized(session_id.clone()));
        }
        Ok(session)
    }
}

/// Validator -> aggregator -> interpreter.
fn score(
    instrument: &Instrument,
    session: &Session,
    elapsed_seconds: u64,
    now: jiff::Timestamp,
) -> Result<ScoreResult, InstrumentError> {
    let validated = validate::validate(instrument, &session.responses)?;
    let scores = aggregate::aggregate(&validated)?;
    let total = interpret::classify_total(scores.total, instrument);
    let detailed_analysis = interpret::build_detailed_analysis(&scores.subscales, instrument)?;

    Ok(ScoreResult {
        session_id: session.id.clone(),
        instrument_id: instrument.id.clone(),
        instrument_name: instrument.name.clone(),
        total_score: scores.total,
        max_score: instrument.algorithm.max_score,
        percentage: total.percentage,
        subscale_scores: scores.subscales,
        risk_level: total.risk_level,
        interpretation: total.description,
        recommendations: total.recommendations,
        detailed_analysis,
        scientific_basis: instrument.scientific_basis.clone(),
        elapsed_seconds,
        timestamp: now,
    })
}
