use crate::line::Messenger;
use ot_form::{FormRenderer, OutputDir};
use std::sync::Arc;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<str>,
    pub renderer: FormRenderer,
    pub output: OutputDir,
    pub messenger: Arc<dyn Messenger>,
}

impl AppState {
    pub fn new(
        channel_secret: &str,
        renderer: FormRenderer,
        output: OutputDir,
        messenger: Arc<dyn Messenger>,
    ) -> Self {
        Self {
            channel_secret: Arc::from(channel_secret),
            renderer,
            output,
            messenger,
        }
    }
}
