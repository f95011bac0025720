pub mod api;
pub mod app;
pub mod cli;
pub mod constants;
pub mod dialogue;
pub mod philosophers;
pub mod session;
pub mod tui;
pub mod utils;

pub use api::{ChatBackend, ConversationGateway, HttpBackend};
pub use app::{load_config, Config};
pub use dialogue::{DialogueController, DialoguePhase, DialogueSurface, DialogueTiming, KeyInput};
pub use philosophers::Philosopher;
pub use session::{Session, SessionManager, SessionStore};
pub use tui::run_ui;
pub use utils::AgoraError;
