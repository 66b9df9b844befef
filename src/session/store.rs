//! Session Store
//!
//! Persists the logged-in user as one JSON record under a fixed key, on top
//! of any key/value backend (browser local storage, files, memory).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use crate::models::Session;

/// Storage key of the serialized session record
pub const SESSION_KEY: &str = "Movie Review User";

/// Errors raised by a session storage backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Reading or writing the backend failed
    #[error("IO error: {0}")]
    Io(String),

    /// The record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The backend is not available (e.g. storage disabled in the browser)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session storage operations
pub type SessionResult<T> = Result<T, SessionError>;

/// String key/value backend, shaped after the Web Storage API
pub trait SessionStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> SessionResult<()>;
    fn remove(&self, key: &str) -> SessionResult<()>;
}

/// In-memory backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        self.values
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        self.values
            .lock()
            .map_err(|e| SessionError::Unavailable(e.to_string()))?
            .remove(key);
        Ok(())
    }
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`; characters unsafe in file names become `_`
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> SessionResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> SessionResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> SessionResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Reads and writes the session record
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&self, session: &Session) -> SessionResult<()> {
        let json = serde_json::to_string(session)?;
        self.storage.set(SESSION_KEY, &json)
    }

    /// The stored session, or `None` when absent, unreadable or malformed
    pub fn load(&self) -> Option<Session> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Cannot read stored session: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Option<Session>>(&raw) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Ignoring malformed session record: {}", e);
                None
            }
        }
    }

    pub fn clear(&self) -> SessionResult<()> {
        self.storage.remove(SESSION_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn ana() -> Session {
        let mut session = Session::new("65a1b2c3d4e5f6a7b8c9d0e1", "Ana");
        session.email = Some("ana@example.com".to_string());
        session
            .extra
            .insert("createdAt".to_string(), serde_json::json!("2024-01-01T00:00:00"));
        session
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let no_email = Session::new("65a1b2c3d4e5f6a7b8c9d0e2", "Bo");

        let numeric_id: Session =
            serde_json::from_value(serde_json::json!({"_id": 42, "name": "Cy"})).unwrap();

        let mut nested = Session::new("65a1b2c3d4e5f6a7b8c9d0e3", "Di");
        nested.extra.insert(
            "prefs".to_string(),
            serde_json::json!({"genres": ["Drama", "Sci-Fi"], "autoplay": false}),
        );
        nested.extra.insert("tags".to_string(), serde_json::json!([1, 2, null]));

        let mut accented = Session::new("65a1b2c3d4e5f6a7b8c9d0e4", "Zoë Ñúñez 映画");
        accented.email = Some("zoë@example.com".to_string());

        for session in [ana(), no_email, numeric_id, nested, accented] {
            let store = SessionStore::new(MemoryStorage::new());
            store.save(&session).unwrap();
            assert_eq!(store.load(), Some(session));
        }
    }

    #[test]
    fn test_clear_then_load_is_absent() {
        let store = SessionStore::new(MemoryStorage::new());
        store.save(&ana()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.load(), None);

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_malformed_record_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "{\"name\": ").unwrap();
        let store = SessionStore::new(storage);
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_null_record_is_absent() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "null").unwrap();
        assert_eq!(SessionStore::new(storage).load(), None);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("state"));
        let path = storage.path_for(SESSION_KEY);
        assert!(path.ends_with("Movie_Review_User.json"));

        let store = SessionStore::new(storage);
        assert_eq!(store.load(), None);

        store.save(&ana()).unwrap();
        assert!(path.exists());
        assert_eq!(store.load(), Some(ana()));

        store.clear().unwrap();
        assert!(!path.exists());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn test_session_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: SessionError = io_err.into();
        assert_eq!(err.to_string(), "IO error: denied");
    }
}
