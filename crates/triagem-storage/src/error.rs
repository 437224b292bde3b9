use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("not found: {key}")]
    NotFound { key: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),

    /// For `SessionStore` and `ResultSink` implementations outside this
    /// crate whose backend cannot be reached (database, remote service).
    /// The built-in stores only fail with the variants above.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
