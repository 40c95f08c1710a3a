//! What the bot does with a single webhook event

use crate::line::{Event, Message, MessageEvent};
use crate::state::AppState;
use crate::Result;
use ot_form::{parse_command, CommandError, CONFIRMATION_MESSAGE, USAGE_MESSAGE};
use std::path::PathBuf;
use tracing::{debug, error, info};

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Not a text message, or not an OT command
    Ignored,
    /// The command was malformed; usage instructions were sent
    UsageSent,
    /// A form was written to this path and the sender was notified
    Rendered(PathBuf),
}

pub async fn handle_event(state: &AppState, event: Event) -> Result<Outcome> {
    let MessageEvent {
        reply_token,
        message,
    } = match event {
        Event::Message(message_event) => message_event,
        Event::Other => return Ok(Outcome::Ignored),
    };

    let Message::Text { id, text } = message else {
        return Ok(Outcome::Ignored);
    };

    let request = match parse_command(&text) {
        Ok(request) => request,
        Err(CommandError::NotACommand) => return Ok(Outcome::Ignored),
        Err(CommandError::Format { found }) => {
            info!(message_id = %id, found, "malformed OT command");
            reply(state, reply_token.as_deref(), USAGE_MESSAGE).await?;
            return Ok(Outcome::UsageSent);
        }
    };

    if !is_plain_id(&id) {
        error!(message_id = %id, "refusing message id as a file name");
        return Ok(Outcome::Ignored);
    }

    let renderer = state.renderer.clone();
    let output_path = state.output.path_for(&id);
    let path =
        tokio::task::spawn_blocking(move || renderer.render(&request, output_path)).await??;
    info!(message_id = %id, path = %path.display(), "rendered OT form");

    reply(state, reply_token.as_deref(), CONFIRMATION_MESSAGE).await?;
    Ok(Outcome::Rendered(path))
}

async fn reply(state: &AppState, reply_token: Option<&str>, text: &str) -> Result<()> {
    match reply_token {
        Some(token) => state.messenger.reply_text(token, text).await,
        None => {
            debug!("event has no reply token");
            Ok(())
        }
    }
}

/// Message ids end up in file names
fn is_plain_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
