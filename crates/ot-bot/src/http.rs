use crate::handler::handle_event;
use crate::line::{verify_signature, WebhookBody, SIGNATURE_HEADER};
use crate::state::AppState;
use crate::{BotError, Result};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/pdf/{filename}", get(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// LINE webhook endpoint
///
/// The signature is checked against the raw body before anything is parsed.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(BotError::MissingSignature)?;

    if !verify_signature(&state.channel_secret, &body, signature) {
        return Err(BotError::InvalidSignature);
    }

    let webhook: WebhookBody = serde_json::from_slice(&body)?;
    for event in webhook.events {
        handle_event(&state, event).await?;
    }

    Ok("OK")
}

/// Serve a generated form as a download
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let path = state
        .output
        .open(&filename)
        .ok_or_else(|| BotError::NotFound(filename.clone()))?;

    let bytes = tokio::fs::read(&path).await?;
    let content_type = mime_guess::from_path(&path).first_or_octet_stream();

    Ok((
        [
            (CONTENT_TYPE, content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
