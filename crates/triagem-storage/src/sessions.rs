use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use triagem_core::models::session::Session;
use triagem_core::session_id::SessionId;

use crate::error::StorageError;
use crate::state;

/// Where live sessions are kept between calls.
pub trait SessionStore: Send + Sync {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, StorageError>;

    /// Insert or replace the session with the same id.
    fn put(&self, session: &Session) -> Result<(), StorageError>;

    /// Remove a session. Returns `false` if it was not stored.
    fn delete(&self, id: &SessionId) -> Result<bool, StorageError>;

    fn list(&self) -> Result<Vec<Session>, StorageError>;
}

/// Process-local session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, StorageError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StorageError::LockPoisoned("session store"))?;
        Ok(sessions.get(id).cloned())
    }

    fn put(&self, session: &Session) -> Result<(), StorageError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StorageError::LockPoisoned("session store"))?;
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }

    fn delete(&self, id: &SessionId) -> Result<bool, StorageError> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| StorageError::LockPoisoned("session store"))?;
        Ok(sessions.remove(id).is_some())
    }

    fn list(&self) -> Result<Vec<Session>, StorageError> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| StorageError::LockPoisoned("session store"))?;
        let mut all: Vec<Session> = sessions.values().cloned().collect();
        all.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(all)
    }
}

/// One JSON file per session under a directory, so an interrupted
/// questionnaire can be resumed by a later process.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{}.json", id.as_str()))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, id: &SessionId) -> Result<Option<Session>, StorageError> {
        match state::load_state(&self.path_for(id)) {
            Ok(session) => Ok(Some(session)),
            Err(StorageError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn put(&self, session: &Session) -> Result<(), StorageError> {
        state::save_state(&self.path_for(&session.id), session)
    }

    fn delete(&self, id: &SessionId) -> Result<bool, StorageError> {
        match std::fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self) -> Result<Vec<Session>, StorageError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut all = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match state::load_state::<Session>(&path) {
                Ok(session) => all.push(session),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "skipping unreadable session file"
                    );
                }
            }
        }
        all.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(all)
    }
}
