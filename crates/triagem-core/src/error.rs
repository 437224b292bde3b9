use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid session id: {0}")]
    InvalidSessionId(String),

    #[error("cannot derive a session prefix from instrument id {0:?}")]
    InvalidPrefix(String),
}
