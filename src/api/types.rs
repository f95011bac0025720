use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub philosopher_id: String,
    pub user_id: String,
}

/// Successful `POST /chat` response
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

/// Identity minted by `POST /session`. The backend attaches a human-readable
/// `message` as well; only these two fields matter to the game.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// `POST /reset-memory` result. The payload shape is backend-defined, so
/// both fields are optional on this side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResetOutcome {
    pub status: Option<String>,
    pub message: Option<String>,
}
