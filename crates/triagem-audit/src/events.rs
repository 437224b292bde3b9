use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use triagem_core::session_id::SessionId;

/// What happened to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SessionStarted,
    AnswerRecorded,
    SessionFinalized,
    ValidationFailed,
    ResultPersistFailed,
    SessionsEvicted,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SessionStarted => "session_started",
            Self::AnswerRecorded => "answer_recorded",
            Self::SessionFinalized => "session_finalized",
            Self::ValidationFailed => "validation_failed",
            Self::ResultPersistFailed => "result_persist_failed",
            Self::SessionsEvicted => "sessions_evicted",
        }
    }

    /// Failures are logged at warn level, everything else at info.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::ValidationFailed | Self::ResultPersistFailed)
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured audit event for a session lifecycle action.
///
/// Carries identifiers and aggregate facts only, never individual answers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditEvent {
    pub action: AuditAction,
    pub instrument_id: Option<String>,
    pub session_id: Option<SessionId>,
    pub details: Option<serde_json::Value>,
}

impl AuditEvent {
    pub fn new(action: AuditAction) -> Self {
        Self {
            action,
            instrument_id: None,
            session_id: None,
            details: None,
        }
    }

    pub fn for_session(action: AuditAction, session_id: &SessionId, instrument_id: &str) -> Self {
        Self {
            action,
            instrument_id: Some(instrument_id.to_string()),
            session_id: Some(session_id.clone()),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Emit this audit event via tracing.
    pub fn emit(&self) {
        let session_id = self.session_id.as_ref().map(SessionId::as_str).unwrap_or("-");
        let instrument_id = self.instrument_id.as_deref().unwrap_or("-");
        let details = self
            .details
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        if self.action.is_failure() {
            warn!(
                audit.action = %self.action,
                audit.session_id = session_id,
                audit.instrument_id = instrument_id,
                audit.details = %details,
                "audit event"
            );
        } else {
            info!(
                audit.action = %self.action,
                audit.session_id = session_id,
                audit.instrument_id = instrument_id,
                audit.details = %details,
                "audit event"
            );
        }
    }
}
