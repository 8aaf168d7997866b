use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

use shared_config::ApiConfig;
use shared_models::{ClientError, Session};

/// Process-wide session state with an init-at-login/teardown-at-logout
/// lifecycle, backed by a JSON session file (the local-storage equivalent).
/// Every network call reads the token from here; nothing else mutates it.
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    /// Loads any previously persisted session. A missing or unreadable file
    /// just means no session; it never fails construction.
    pub fn new(config: &ApiConfig) -> Self {
        let current = Self::load_from(&config.session_file);
        Self {
            path: config.session_file.clone(),
            current: RwLock::new(current),
        }
    }

    fn load_from(path: &PathBuf) -> Option<Session> {
        let raw = fs::read_to_string(path).ok()?;
        match serde_json::from_str::<Session>(&raw) {
            Ok(session) => {
                debug!("Restored session for user {}", session.user_id);
                Some(session)
            }
            Err(e) => {
                warn!("Discarding unreadable session file: {}", e);
                None
            }
        }
    }

    pub fn current(&self) -> Option<Session> {
        // A poisoned lock still guards valid session data; keep serving it.
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Token for the bearer-header helper. Raised before any request is
    /// attempted when no session exists.
    pub fn require_token(&self) -> Result<String, ClientError> {
        self.current()
            .map(|session| session.token)
            .ok_or(ClientError::MissingToken)
    }

    pub fn set(&self, session: Session) -> Result<(), ClientError> {
        let serialized = serde_json::to_string_pretty(&session)?;
        fs::write(&self.path, serialized)
            .map_err(|e| ClientError::SessionStore(e.to_string()))?;
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Some(session);
        Ok(())
    }

    /// Invalidates the session wholesale. Best-effort on the file: a failed
    /// delete still clears the in-memory session.
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Could not remove session file: {}", e);
            }
        }
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use shared_models::UserRole;

    fn config_in(dir: &tempfile::TempDir) -> ApiConfig {
        ApiConfig {
            base_url: "http://localhost:9999".to_string(),
            session_file: dir.path().join("session.json"),
        }
    }

    #[test]
    fn persists_session_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);

        let store = SessionStore::new(&config);
        assert!(store.current().is_none());
        store
            .set(Session::new("user-1", UserRole::Patient, "tok-abc"))
            .unwrap();

        let reopened = SessionStore::new(&config);
        let session = reopened.current().unwrap();
        assert_eq!(session.user_id, "user-1");
        assert_eq!(session.token, "tok-abc");
    }

    #[test]
    fn require_token_fails_before_login() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(&config_in(&dir));
        assert_matches!(store.require_token(), Err(ClientError::MissingToken));
    }

    #[test]
    fn clear_removes_file_and_memory() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let store = SessionStore::new(&config);
        store
            .set(Session::new("user-1", UserRole::Doctor, "tok"))
            .unwrap();

        store.clear();
        assert!(store.current().is_none());
        assert!(SessionStore::new(&config).current().is_none());
    }

    #[test]
    fn survives_a_poisoned_lock() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(&config_in(&dir));
        store
            .set(Session::new("user-1", UserRole::Patient, "tok"))
            .unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.current.write().unwrap();
            panic!("poison the session lock");
        }));
        assert!(poisoned.is_err());

        // The store keeps answering with the last written session.
        assert_eq!(store.current().unwrap().user_id, "user-1");
        assert_eq!(store.require_token().unwrap(), "tok");
        store.clear();
        assert!(store.current().is_none());
    }

    #[test]
    fn corrupt_session_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        fs::write(&config.session_file, "{not json").unwrap();

        let store = SessionStore::new(&config);
        assert!(store.current().is_none());
    }
}
