//! OT Form - Overtime request forms
//!
//! This crate turns a chat command into a one-page bilingual (Thai and
//! Japanese) overtime request PDF:
//! - Parsing `OT name|department|...` commands into an [`OvertimeRequest`]
//! - Planning the fixed form layout as a list of [`DrawOp`]s
//! - Rendering the plan with an embedded TrueType font
//! - Naming and resolving generated files in an [`OutputDir`]
//!
//! # Example
//!
//! ```ignore
//! use ot_form::{parse_command, FormRenderer, OutputDir};
//!
//! let renderer = FormRenderer::from_font_path("fonts/NotoSansThaiJP.ttf")?;
//! let output = OutputDir::create("output")?;
//!
//! let request = parse_command("OT John Doe|Engineering|Project X|2024-05-01|09:00-12:00|3|Deadline")?;
//! renderer.render(&request, &output.path_for("U1234"))?;
//! ```

mod command;
mod layout;
mod renderer;
mod request;
mod store;

pub use command::{
    parse_command, CommandError, COMMAND_PREFIX, CONFIRMATION_MESSAGE, FIELD_COUNT,
    FIELD_DELIMITER, USAGE_MESSAGE,
};
pub use layout::{DrawOp, FieldRow, FormLayout, FIELD_ROWS, TITLE};
pub use renderer::{FormRenderer, FONT_NAME};
pub use request::{Field, OvertimeRequest, ISSUE_DATE_TODAY};
pub use store::OutputDir;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or rendering a form
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Font unavailable at {path}: {reason}")]
    FontUnavailable { path: PathBuf, reason: String },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Failed to persist {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for form operations
pub type Result<T> = std::result::Result<T, FormError>;
