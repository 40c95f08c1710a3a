use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors raised while serving the bot
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing X-Line-Signature header")]
    MissingSignature,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Form error: {0}")]
    Form(#[from] ot_form::FormError),

    #[error("Reply rejected with status {status}: {body}")]
    ReplyRejected { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for bot operations
pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    pub fn status(&self) -> StatusCode {
        match self {
            BotError::MissingSignature | BotError::InvalidSignature | BotError::InvalidPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            BotError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = status.canonical_reason().unwrap_or("Error");
        (status, body).into_response()
    }
}
