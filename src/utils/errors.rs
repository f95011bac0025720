use thiserror::Error;

/// Main error type for Agora
#[derive(Error, Debug)]
pub enum AgoraError {
    #[error("API error: {status} {status_text}")]
    ApiError { status: u16, status_text: String },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("No active session")]
    NoActiveSession,

    #[error("Malformed response: missing {0}")]
    MalformedResponse(&'static str),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
