use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use triagem_core::models::response::ResponseSet;
use triagem_core::models::result::ScoreResult;
use triagem_core::models::session::Session;

use crate::error::StorageError;

/// Receives each finalized result exactly once.
pub trait ResultSink: Send + Sync {
    fn persist(&self, result: &ScoreResult, session: &Session) -> Result<(), StorageError>;
}

/// A persisted screening: the result plus the answers that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ResultRecord {
    pub result: ScoreResult,
    pub responses: ResponseSet,
    pub started_at: jiff::Timestamp,
}

impl ResultRecord {
    pub fn new(result: &ScoreResult, session: &Session) -> Self {
        Self {
            result: result.clone(),
            responses: session.responses.clone(),
            started_at: session.started_at,
        }
    }
}

/// Keeps records in memory. Used by tests and embedders that collect
/// results themselves.
#[derive(Debug, Default)]
pub struct MemoryResultSink {
    records: Mutex<Vec<ResultRecord>>,
}

impl MemoryResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let records = self
            .records
            .lock()
            .map_err(|_| StorageError::LockPoisoned("result sink"))?;
        Ok(records.clone())
    }
}

impl ResultSink for MemoryResultSink {
    fn persist(&self, result: &ScoreResult, session: &Session) -> Result<(), StorageError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StorageError::LockPoisoned("result sink"))?;
        records.push(ResultRecord::new(result, session));
        Ok(())
    }
}

/// Appends one JSON record per line to a history file.
#[derive(Debug)]
pub struct JsonlResultSink {
    path: PathBuf,
    // Serializes appends from concurrent finalizations.
    write_lock: Mutex<()>,
}

impl JsonlResultSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<Vec<ResultRecord>, StorageError> {
        load_history(&self.path)
    }
}

impl ResultSink for JsonlResultSink {
    fn persist(&self, result: &ScoreResult, session: &Session) -> Result<(), StorageError> {
        let mut line = serde_json::to_vec(&ResultRecord::new(result, session))?;
        line.push(b'\n');

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::LockPoisoned("history file"))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;

        tracing::debug!(
            path = %self.path.display(),
            session_id = %result.session_id,
            "result appended to history"
        );
        Ok(())
    }
}

/// Read every record from a history file. A missing file is an empty
/// history; malformed lines are skipped with a warning.
pub fn load_history(path: &Path) -> Result<Vec<ResultRecord>, StorageError> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<ResultRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    line = index + 1,
                    error = %e,
                    "skipping malformed history line"
                );
            }
        }
    }
    Ok(records)
}
