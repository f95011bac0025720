use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use super::store::{Session, SessionOrigin, SessionStore};
use crate::api::{ChatBackend, ResetOutcome};
use crate::utils::AgoraError;

/// Owns the current anonymous identity: restores it at startup, creates one
/// on demand and persists every change.
pub struct SessionManager {
    backend: Arc<dyn ChatBackend>,
    store: SessionStore,
    current: Option<Session>,
}

impl SessionManager {
    /// Build the manager and read the stored record. An expired or
    /// unreadable record is ignored; the next `ensure_session` replaces it.
    pub fn new(backend: Arc<dyn ChatBackend>, store: SessionStore) -> Self {
        let current = store.load().filter(|s| s.is_valid(Utc::now()));
        if let Some(session) = &current {
            info!(user_id = %session.user_id, "restored existing session");
        }
        Self {
            backend,
            store,
            current,
        }
    }

    /// The current session, created when absent or expired. Never fails:
    /// backend trouble degrades to a locally minted identity.
    pub async fn ensure_session(&mut self) -> Session {
        if let Some(session) = &self.current {
            if session.is_valid(Utc::now()) {
                return session.clone();
            }
        }
        self.create_session().await
    }

    /// Request a fresh identity from the backend, falling back to a local
    /// UUID when the request fails. The result replaces the stored record.
    pub async fn create_session(&mut self) -> Session {
        let session = match self.backend.create_session().await {
            Ok(record) => {
                info!(user_id = %record.user_id, "created new session");
                Session {
                    user_id: record.user_id,
                    created_at: record.created_at,
                    origin: SessionOrigin::Server,
                }
            }
            Err(err) => {
                warn!("session creation failed, minting local fallback: {err}");
                Session {
                    user_id: Uuid::new_v4().to_string(),
                    created_at: Utc::now(),
                    origin: SessionOrigin::Fallback,
                }
            }
        };

        if let Err(err) = self.store.save(&session) {
            warn!("failed to persist session: {err}");
        }
        self.current = Some(session.clone());
        session
    }

    /// Ask the backend to forget this user's conversations. Requires an
    /// active session; every failure surfaces to the caller.
    pub async fn reset_user_conversations(&self) -> Result<ResetOutcome, AgoraError> {
        let session = self.current.as_ref().ok_or(AgoraError::NoActiveSession)?;
        let outcome = self.backend.reset_memory(&session.user_id).await?;
        info!(user_id = %session.user_id, "conversation memory reset");
        Ok(outcome)
    }

    /// Drop the session from memory and disk
    pub fn clear_session(&mut self) {
        self.current = None;
        if let Err(err) = self.store.clear() {
            warn!("failed to remove stored session: {err}");
        }
        info!("session cleared");
    }

    /// The session currently held in memory
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }
}
