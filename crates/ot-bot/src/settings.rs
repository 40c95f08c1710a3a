use crate::Result;
use config::{Config, Environment, Map};
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Runtime settings, read from the process environment
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// LINE channel access token used for replies
    pub line_channel_access_token: String,

    /// LINE channel secret used to verify webhook signatures
    pub line_channel_secret: String,

    /// TrueType font with Thai and Japanese glyphs
    pub font_ttf_path: PathBuf,

    /// Directory generated PDFs are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Address the HTTP server listens on
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the LINE Messaging API
    #[serde(default = "default_line_api_base")]
    pub line_api_base: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_line_api_base() -> String {
    "https://api.line.me".to_string()
}

impl Settings {
    /// Load settings from environment variables
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_source(None)
    }

    fn from_source(source: Option<Map<String, String>>) -> Result<Self> {
        let settings = Config::builder()
            .add_source(Environment::default().source(source))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("line_channel_access_token", &"<redacted>")
            .field("line_channel_secret", &"<redacted>")
            .field("font_ttf_path", &self.font_ttf_path)
            .field("output_dir", &self.output_dir)
            .field("bind_addr", &self.bind_addr)
            .field("line_api_base", &self.line_api_base)
            .finish()
    }
}
