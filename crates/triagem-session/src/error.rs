use thiserror::Error;

use triagem_core::error::CoreError;
use triagem_core::session_id::SessionId;
use triagem_instruments::error::{InstrumentError, ScoringError, ValidationError};
use triagem_storage::error::StorageError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(SessionId),

    #[error("session already finalized: {0}")]
    AlreadyFinalized(SessionId),

    #[error("instrument '{instrument_id}' has no question '{question_id}'")]
    UnknownQuestion {
        instrument_id: String,
        question_id: String,
    },

    #[error(transparent)]
    Instrument(#[from] InstrumentError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("session lock poisoned")]
    LockPoisoned,
}

impl From<ValidationError> for SessionError {
    fn from(e: ValidationError) -> Self {
        Self::Instrument(e.into())
    }
}

impl From<ScoringError> for SessionError {
    fn from(e: ScoringError) -> Self {
        Self::Instrument(e.into())
    }
}

impl SessionError {
    /// The validation failure behind this error, if any.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Instrument(InstrumentError::Validation(e)) => Some(e),
            _ => None,
        }
    }
}
