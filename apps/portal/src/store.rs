//! Credential persistence — the client-side keeper of the session token and
//! profile snapshot.
//!
//! No network or validation logic lives here; the Session Manager is the only
//! writer.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::PortalError;
use crate::models::user::UserProfile;

/// On-disk document holding both halves of a session. Persisted as a single
/// file so a reader can never observe a token without its user or vice versa.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredCredentials {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// Client-persisted key-value storage for the session pair.
///
/// `save` is atomic with respect to token+user. `clear` removes both keys
/// unconditionally and is idempotent. Reads are synchronous so the Access
/// Gate can decide before anything renders.
pub trait CredentialStore: Send + Sync {
    fn save(&self, token: &str, user: &UserProfile) -> Result<(), PortalError>;
    fn load_token(&self) -> Option<String>;
    fn load_user(&self) -> Option<UserProfile>;
    fn clear(&self);
}

/// File-backed store: one JSON document, replaced via temp-file-then-rename
/// so the pair changes in a single step.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    fn read(&self) -> StoredCredentials {
        match std::fs::read(&self.path) {
            // A corrupt file yields the default (both keys absent), which
            // keeps the pair invariant intact.
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => StoredCredentials::default(),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn save(&self, token: &str, user: &UserProfile) -> Result<(), PortalError> {
        let document = StoredCredentials {
            token: Some(token.to_string()),
            user: Some(user.clone()),
        };
        let json = serde_json::to_vec_pretty(&document)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.persist(&self.path)
            .map_err(|e| PortalError::Storage(e.error))?;
        Ok(())
    }

    fn load_token(&self) -> Option<String> {
        self.read().token
    }

    fn load_user(&self) -> Option<UserProfile> {
        self.read().user
    }

    fn clear(&self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!("failed to remove credential file {}: {e}", self.path.display());
            }
        }
    }
}

/// Volatile store for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: Mutex<StoredCredentials>,
}

impl InMemoryCredentialStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, StoredCredentials> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn save(&self, token: &str, user: &UserProfile) -> Result<(), PortalError> {
        *self.lock() = StoredCredentials {
            token: Some(token.to_string()),
            user: Some(user.clone()),
        };
        Ok(())
    }

    fn load_token(&self) -> Option<String> {
        self.lock().token.clone()
    }

    fn load_user(&self) -> Option<UserProfile> {
        self.lock().user.clone()
    }

    fn clear(&self) {
        *self.lock() = StoredCredentials::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn profile() -> UserProfile {
        UserProfile {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Recruiter,
        }
    }

    fn file_store() -> (tempfile::TempDir, FileCredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        (dir, store)
    }

    #[test]
    fn test_save_then_load_returns_both_halves() {
        let (_dir, store) = file_store();
        store.save("tok-123", &profile()).unwrap();
        assert_eq!(store.load_token().as_deref(), Some("tok-123"));
        assert_eq!(store.load_user(), Some(profile()));
    }

    #[test]
    fn test_clear_removes_both_and_is_idempotent() {
        let (_dir, store) = file_store();
        store.save("tok-123", &profile()).unwrap();
        store.clear();
        assert_eq!(store.load_token(), None);
        assert_eq!(store.load_user(), None);
        // Clearing an already-empty store must not fail.
        store.clear();
    }

    #[test]
    fn test_save_overwrites_previous_session() {
        let (_dir, store) = file_store();
        store.save("tok-old", &profile()).unwrap();
        let mut newer = profile();
        newer.username = "alice2".to_string();
        store.save("tok-new", &newer).unwrap();
        assert_eq!(store.load_token().as_deref(), Some("tok-new"));
        assert_eq!(store.load_user().unwrap().username, "alice2");
    }

    #[test]
    fn test_corrupt_file_reads_as_absent_pair() {
        let (_dir, store) = file_store();
        std::fs::write(&store.path, b"{not json").unwrap();
        assert_eq!(store.load_token(), None);
        assert_eq!(store.load_user(), None);
    }

    #[test]
    fn test_persisted_document_always_holds_the_pair() {
        let (_dir, store) = file_store();
        store.save("tok-123", &profile()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&store.path).unwrap()).unwrap();
        assert!(raw["token"].is_string());
        assert!(raw["user"].is_object());
    }

    #[test]
    fn test_in_memory_store_round_trip() {
        let store = InMemoryCredentialStore::default();
        assert_eq!(store.load_token(), None);
        store.save("tok", &profile()).unwrap();
        assert_eq!(store.load_token().as_deref(), Some("tok"));
        store.clear();
        assert_eq!(store.load_user(), None);
    }
}
