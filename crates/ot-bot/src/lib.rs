//! OT Bot - LINE front end for overtime request forms
//!
//! Receives LINE webhooks, turns `OT ...` text messages into PDFs with
//! [`ot_form`], replies in the chat, and serves the generated files.
//!
//! - `POST /callback` - signed LINE webhook
//! - `GET /pdf/{filename}` - download a generated form

mod error;
pub mod handler;
pub mod http;
pub mod line;
pub mod settings;
pub mod state;

pub use error::{BotError, Result};
pub use handler::{handle_event, Outcome};
pub use http::router;
pub use line::{LineClient, Messenger};
pub use settings::Settings;
pub use state::AppState;
