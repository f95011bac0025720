// Gateway module for the chat backend - follows the Train Station Pattern
// All external access must go through this gateway

// Private submodules - not directly accessible from outside
mod backend;
mod gateway;
mod types;

// Public re-exports - the ONLY way to access backend functionality
pub use backend::{ChatBackend, HttpBackend};
pub use gateway::ConversationGateway;
pub use types::{ChatReply, ChatRequest, ResetOutcome, SessionRecord};

#[cfg(test)]
pub use backend::MockChatBackend;
