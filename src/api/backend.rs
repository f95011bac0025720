use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{json, Value};

use super::types::{ChatReply, ChatRequest, ResetOutcome, SessionRecord};
use crate::constants::{CHAT_ENDPOINT, RESET_MEMORY_ENDPOINT, SESSION_ENDPOINT};
use crate::utils::AgoraError;

/// The three operations the game needs from its conversational backend.
/// Session and gateway code depend on this seam, never on reqwest directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// POST /session - mint a new anonymous identity
    async fn create_session(&self) -> Result<SessionRecord, AgoraError>;

    /// POST /chat - one conversation turn, returns the reply text
    async fn send_chat(&self, request: &ChatRequest) -> Result<String, AgoraError>;

    /// POST /reset-memory - forget everything stored for this user
    async fn reset_memory(&self, user_id: &str) -> Result<ResetOutcome, AgoraError>;
}

/// HTTP implementation speaking to the game's REST backend
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AgoraError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send one request and parse the JSON body. Non-2xx statuses become
    /// `ApiError`; connection and decode failures surface as `NetworkError`.
    /// Nothing is swallowed at this level.
    async fn request(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<Value>,
    ) -> Result<Value, AgoraError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.client.request(method, &url);
        if let Some(body) = &payload {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AgoraError::ApiError {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn create_session(&self) -> Result<SessionRecord, AgoraError> {
        let body = self.request(SESSION_ENDPOINT, Method::POST, None).await?;
        serde_json::from_value(body).map_err(|_| AgoraError::MalformedResponse("user_id/created_at"))
    }

    async fn send_chat(&self, request: &ChatRequest) -> Result<String, AgoraError> {
        let payload = serde_json::to_value(request)?;
        let body = self.request(CHAT_ENDPOINT, Method::POST, Some(payload)).await?;
        let reply: ChatReply =
            serde_json::from_value(body).map_err(|_| AgoraError::MalformedResponse("response"))?;
        Ok(reply.response)
    }

    async fn reset_memory(&self, user_id: &str) -> Result<ResetOutcome, AgoraError> {
        let payload = json!({ "user_id": user_id });
        let body = self
            .request(RESET_MEMORY_ENDPOINT, Method::POST, Some(payload))
            .await?;
        serde_json::from_value(body).map_err(|_| AgoraError::MalformedResponse("reset outcome"))
    }
}
