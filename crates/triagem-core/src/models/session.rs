use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::response::ResponseSet;
use crate::session_id::SessionId;

/// Lifecycle of a screening session. There is no transition back out of
/// `Finalized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    Created,
    Answering,
    Finalized,
}

/// One subject's attempt at an instrument.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    pub id: SessionId,
    pub instrument_id: String,
    pub state: SessionState,
    pub responses: ResponseSet,
    pub started_at: jiff::Timestamp,
    pub finalized_at: Option<jiff::Timestamp>,
}

impl Session {
    pub fn new(id: SessionId, instrument_id: impl Into<String>, started_at: jiff::Timestamp) -> Self {
        Self {
            id,
            instrument_id: instrument_id.into(),
            state: SessionState::Created,
            responses: ResponseSet::new(),
            started_at,
            finalized_at: None,
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.state == SessionState::Finalized
    }

    /// Time elapsed between the session start and `now`.
    pub fn age(&self, now: jiff::Timestamp) -> jiff::SignedDuration {
        now.duration_since(self.started_at)
    }
}
