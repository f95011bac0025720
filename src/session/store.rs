use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::{SESSION_FILE_NAME, SESSION_TTL_HOURS};
use crate::utils::AgoraError;

/// The anonymous identity attached to every chat turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub origin: SessionOrigin,
}

/// Where a session came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOrigin {
    #[default]
    Server,
    Fallback,
}

impl SessionOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOrigin::Server => "server",
            SessionOrigin::Fallback => "fallback",
        }
    }
}

impl Session {
    /// A session stays usable for a fixed TTL after creation. An identity
    /// without a user id is never usable.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.user_id.is_empty()
            && now.signed_duration_since(self.created_at) < Duration::hours(SESSION_TTL_HOURS)
    }
}

/// Durable home of the current session record
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store under the platform data directory, e.g. ~/.local/share/agora
    pub fn open_default() -> Result<Self, AgoraError> {
        let dirs = ProjectDirs::from("", "", "agora").ok_or_else(|| {
            AgoraError::ConfigError("could not determine a home directory".to_string())
        })?;
        Self::open_in(dirs.data_dir())
    }

    /// Store under an explicit directory
    pub fn open_in(dir: impl AsRef<Path>) -> Result<Self, AgoraError> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        })
    }

    /// Load the stored session, if any. Unreadable records count as absent.
    pub fn load(&self) -> Option<Session> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!("discarding unreadable session record: {err}");
                None
            }
        }
    }

    /// Save a session to disk
    pub fn save(&self, session: &Session) -> Result<(), AgoraError> {
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the stored record. A missing file is not an error.
    pub fn clear(&self) -> Result<(), AgoraError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Path of the record on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            user_id: "u-123".to_string(),
            created_at: Utc::now(),
            origin: SessionOrigin::Server,
        }
    }

    #[test]
    fn save_then_load_returns_the_same_record() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        let session = sample_session();

        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_record_counts_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        fs::write(store.path(), "not json at all").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn record_without_origin_defaults_to_server() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        fs::write(
            store.path(),
            r#"{"user_id":"u-1","created_at":"2026-08-25T10:00:00Z"}"#,
        )
        .unwrap();

        let session = store.load().unwrap();
        assert_eq!(session.origin, SessionOrigin::Server);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        store.save(&sample_session()).unwrap();

        store.clear().unwrap();
        assert!(store.load().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn validity_follows_the_ttl() {
        let now = Utc::now();
        let mut session = sample_session();

        session.created_at = now - Duration::hours(23);
        assert!(session.is_valid(now));

        session.created_at = now - Duration::hours(24);
        assert!(!session.is_valid(now));

        session.created_at = now - Duration::hours(25);
        assert!(!session.is_valid(now));
    }

    #[test]
    fn empty_user_id_is_never_valid() {
        let mut session = sample_session();
        session.user_id = String::new();
        assert!(!session.is_valid(Utc::now()));
    }
}
