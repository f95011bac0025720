use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::api::ConversationGateway;
use crate::dialogue::{DialogueController, TextSurface};
use crate::philosophers::{Philosopher, ROSTER};
use crate::session::Session;

/// Application state
pub struct App {
    /// Conversation gateway shared with the dialogue controller
    pub gateway: Arc<ConversationGateway>,
    /// State machine driving the dialogue box
    pub controller: DialogueController,
    /// Concrete handle on the dialogue surface, for rendering
    pub surface: Arc<Mutex<TextSurface>>,
    /// Index of the highlighted philosopher in the roster
    pub selected: usize,
    /// Is the app running?
    pub running: bool,
    /// Short session label for the header
    pub session_label: String,
    /// Status message
    pub status_message: Option<String>,
    /// Session being ensured in the background, until it resolves
    session_task: Option<JoinHandle<Session>>,
}

impl App {
    /// Create a new app instance
    pub fn new(
        gateway: Arc<ConversationGateway>,
        controller: DialogueController,
        surface: Arc<Mutex<TextSurface>>,
    ) -> Self {
        Self {
            gateway,
            controller,
            surface,
            selected: 0,
            running: true,
            session_label: String::new(),
            status_message: None,
            session_task: None,
        }
    }

    /// Kick off session creation without holding up the first frame; the
    /// header shows a placeholder until the identity resolves
    pub fn begin_session(&mut self) {
        self.session_label = "connecting...".to_string();
        let gateway = Arc::clone(&self.gateway);
        self.session_task = Some(tokio::spawn(async move { gateway.ensure_session().await }));
    }

    /// Pick up the ensured session once the background task has finished
    pub async fn poll_session(&mut self) {
        if self.session_task.as_ref().is_some_and(|task| task.is_finished()) {
            if let Some(task) = self.session_task.take() {
                if let Ok(session) = task.await {
                    self.session_label = format!(
                        "{} ({})",
                        session.user_id.chars().take(8).collect::<String>(),
                        session.origin.as_str()
                    );
                }
            }
        }
    }

    /// Everyone standing in the agora
    pub fn roster(&self) -> &'static [Philosopher] {
        ROSTER.as_slice()
    }

    /// The philosopher the selection currently rests on
    pub fn selected_philosopher(&self) -> &'static Philosopher {
        &ROSTER[self.selected]
    }

    /// Move the selection down, wrapping at the end
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % ROSTER.len();
    }

    /// Move the selection up, wrapping at the start
    pub fn select_previous(&mut self) {
        self.selected = if self.selected == 0 {
            ROSTER.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ChatBackend, MockChatBackend, SessionRecord};
    use crate::dialogue::{DialogueTiming, SharedSurface};
    use crate::session::{SessionManager, SessionStore};
    use crate::utils::AgoraError;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn app_with(mock: MockChatBackend) -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open_in(dir.path()).unwrap();
        let backend: Arc<dyn ChatBackend> = Arc::new(mock);
        let sessions = SessionManager::new(backend.clone(), store);
        let gateway = Arc::new(ConversationGateway::new(backend, sessions));

        let surface = Arc::new(Mutex::new(TextSurface::new()));
        let shared: SharedSurface = surface.clone();
        let controller =
            DialogueController::new(gateway.clone(), shared, DialogueTiming::default());
        (App::new(gateway, controller, surface), dir)
    }

    async fn poll_until_resolved(app: &mut App) {
        for _ in 0..100 {
            app.poll_session().await;
            if app.session_label != "connecting..." {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn begin_session_labels_the_header_before_the_network_answers() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session().returning(|| {
            Ok(SessionRecord {
                user_id: "u-12345678".to_string(),
                created_at: Utc::now(),
            })
        });
        let (mut app, _dir) = app_with(mock);

        app.begin_session();
        assert_eq!(app.session_label, "connecting...");

        poll_until_resolved(&mut app).await;
        assert_eq!(app.session_label, "u-123456 (server)");
    }

    #[tokio::test]
    async fn unreachable_backend_resolves_to_a_fallback_label() {
        let mut mock = MockChatBackend::new();
        mock.expect_create_session().returning(|| {
            Err(AgoraError::ApiError {
                status: 500,
                status_text: "Internal Server Error".to_string(),
            })
        });
        let (mut app, _dir) = app_with(mock);

        app.begin_session();
        poll_until_resolved(&mut app).await;
        assert!(app.session_label.ends_with("(fallback)"));
    }
}
