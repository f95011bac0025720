use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::warn;

use super::backend::ChatBackend;
use super::types::{ChatRequest, ResetOutcome};
use crate::philosophers::Philosopher;
use crate::session::{Session, SessionManager};
use crate::utils::AgoraError;

/// Front door for conversation traffic. Bundles the session manager and the
/// backend behind the two contracts the dialogue layer builds on:
/// `send_message` never fails, `reset_memory` never hides a failure.
pub struct ConversationGateway {
    backend: Arc<dyn ChatBackend>,
    sessions: Mutex<SessionManager>,
}

impl ConversationGateway {
    pub fn new(backend: Arc<dyn ChatBackend>, sessions: SessionManager) -> Self {
        Self {
            backend,
            sessions: Mutex::new(sessions),
        }
    }

    /// One conversation turn. Characters with a canonical reply answer
    /// immediately without a network round trip; any downstream failure
    /// degrades to the apology line instead of an error.
    pub async fn send_message(&self, philosopher: &Philosopher, message: &str) -> String {
        if let Some(reply) = &philosopher.canonical_reply {
            return reply.clone();
        }

        match self.try_send(philosopher, message).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(philosopher = %philosopher.id, "chat turn failed, serving fallback reply: {err}");
                fallback_reply(philosopher)
            }
        }
    }

    async fn try_send(&self, philosopher: &Philosopher, message: &str) -> Result<String, AgoraError> {
        let session = self.sessions.lock().await.ensure_session().await;
        let request = ChatRequest {
            message: message.to_string(),
            philosopher_id: philosopher.id.clone(),
            user_id: session.user_id,
        };
        self.backend.send_chat(&request).await
    }

    /// Ask the backend to forget everything it knows about this user.
    /// Unlike `send_message`, every failure propagates to the caller.
    pub async fn reset_memory(&self) -> Result<ResetOutcome, AgoraError> {
        self.sessions.lock().await.reset_user_conversations().await
    }

    /// The current session, created on first use
    pub async fn ensure_session(&self) -> Session {
        self.sessions.lock().await.ensure_session().await
    }

    /// Drop the local identity; the next turn starts a fresh session
    pub async fn clear_session(&self) {
        self.sessions.lock().await.clear_session();
    }
}

/// Apology line served whenever a philosopher cannot be reached
fn fallback_reply(philosopher: &Philosopher) -> String {
    let name = if philosopher.display_name.is_empty() {
        "the philosopher"
    } else {
        philosopher.display_name.as_str()
    };
    format!("I'm sorry, {name} is unavailable at the moment. Please try again later.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockChatBackend, SessionRecord};
    use crate::session::SessionStore;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn gateway_with(mock: MockChatBackend) -> (ConversationGateway, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        let backend: Arc<dyn ChatBackend> = Arc::new(mock);
        let sessions = SessionManager::new(backend.clone(), store);
        (ConversationGateway::new(backend, sessions), dir)
    }

    fn server_record(user_id: &str) -> SessionRecord {
        SessionRecord {
            user_id: user_id.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn canonical_reply_bypasses_the_network() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session().times(0);
        mock.expect_send_chat().times(0);
        let (gateway, _dir) = gateway_with(mock);

        let busy = Philosopher::new("miguel", "Miguel").with_canonical_reply("Busy writing!");
        let reply = gateway.send_message(&busy, "got a minute?").await;
        assert_eq!(reply, "Busy writing!");
    }

    #[tokio::test]
    async fn send_message_returns_the_backend_reply() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session()
            .times(1)
            .returning(|| Ok(server_record("u-7")));
        mock.expect_send_chat()
            .withf(|request| {
                request.philosopher_id == "socrates"
                    && request.user_id == "u-7"
                    && request.message == "What is virtue?"
            })
            .times(1)
            .returning(|_| Ok("Virtue is knowledge.".to_string()));
        let (gateway, _dir) = gateway_with(mock);

        let socrates = Philosopher::new("socrates", "Socrates");
        let reply = gateway.send_message(&socrates, "What is virtue?").await;
        assert_eq!(reply, "Virtue is knowledge.");
    }

    #[tokio::test]
    async fn backend_failure_degrades_to_the_apology_line() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session()
            .returning(|| Ok(server_record("u-7")));
        mock.expect_send_chat().returning(|_| {
            Err(AgoraError::ApiError {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })
        });
        let (gateway, _dir) = gateway_with(mock);

        let plato = Philosopher::new("plato", "Plato");
        let reply = gateway.send_message(&plato, "hello").await;
        assert_eq!(
            reply,
            "I'm sorry, Plato is unavailable at the moment. Please try again later."
        );
    }

    #[tokio::test]
    async fn malformed_reply_body_degrades_to_the_apology_line() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session()
            .returning(|| Ok(server_record("u-7")));
        mock.expect_send_chat()
            .returning(|_| Err(AgoraError::MalformedResponse("response")));
        let (gateway, _dir) = gateway_with(mock);

        let plato = Philosopher::new("plato", "Plato");
        let reply = gateway.send_message(&plato, "hello").await;
        assert_eq!(
            reply,
            "I'm sorry, Plato is unavailable at the moment. Please try again later."
        );
    }

    #[tokio::test]
    async fn unnamed_philosopher_gets_the_generic_apology() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session()
            .returning(|| Ok(server_record("u-7")));
        mock.expect_send_chat().returning(|_| {
            Err(AgoraError::ApiError {
                status: 502,
                status_text: "Bad Gateway".to_string(),
            })
        });
        let (gateway, _dir) = gateway_with(mock);

        let anonymous = Philosopher::new("stranger", "");
        let reply = gateway.send_message(&anonymous, "hello").await;
        assert_eq!(
            reply,
            "I'm sorry, the philosopher is unavailable at the moment. Please try again later."
        );
    }

    #[tokio::test]
    async fn session_failure_still_produces_a_reply() {
        // Session creation falls back to a local identity, so the chat
        // request itself is still attempted with the fallback user id.
        let mut mock = MockChatBackend::new();
        mock.expect_create_session().returning(|| {
            Err(AgoraError::ApiError {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })
        });
        mock.expect_send_chat()
            .withf(|request| !request.user_id.is_empty())
            .times(1)
            .returning(|_| Ok("Still here.".to_string()));
        let (gateway, _dir) = gateway_with(mock);

        let turing = Philosopher::new("turing", "Turing");
        let reply = gateway.send_message(&turing, "hello").await;
        assert_eq!(reply, "Still here.");
    }

    #[tokio::test]
    async fn reset_memory_surfaces_failures() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session()
            .returning(|| Ok(server_record("u-9")));
        mock.expect_reset_memory()
            .withf(|user_id| user_id == "u-9")
            .times(1)
            .returning(|_| {
                Err(AgoraError::ApiError {
                    status: 503,
                    status_text: "Service Unavailable".to_string(),
                })
            });
        let (gateway, _dir) = gateway_with(mock);

        gateway.ensure_session().await;
        let err = gateway.reset_memory().await.unwrap_err();
        assert!(matches!(err, AgoraError::ApiError { status: 503, .. }));
    }

    #[tokio::test]
    async fn reset_memory_without_a_session_never_calls_out() {
        let mut mock = MockChatBackend::new();
        mock.expect_reset_memory().times(0);
        let (gateway, _dir) = gateway_with(mock);

        let err = gateway.reset_memory().await.unwrap_err();
        assert!(matches!(err, AgoraError::NoActiveSession));
    }
}
