//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Building new PDF documents page by page
//! - Embedding subsets of TrueType fonts (Thai and CJK via Identity-H)
//! - Inserting text at specific coordinates
//! - Drawing straight lines (rules, signature lines)
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, FontData, LineStyle, PageSize, PdfDocument};
//! use std::sync::Arc;
//!
//! let font = Arc::new(FontData::from_file("jpth", "fonts/NotoSansThaiJP.ttf")?);
//! let mut doc = PdfDocument::new();
//! let page = doc.add_page(PageSize::A4);
//! doc.add_font("jpth", font)?;
//! doc.set_font("jpth", 12.0)?;
//! doc.insert_text("สวัสดี / こんにちは", page, 100.0, 100.0, Align::Left)?;
//! doc.draw_line(page, 100.0, 120.0, 260.0, 120.0, LineStyle::default())?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod text;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

pub use document::{Color, PageSize, PdfDocument};
pub use font::{FontData, FontObjects, FontSubset};
pub use graphics::{generate_line_operators, LineStyle};
pub use text::{generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Font subset error: {0}")]
    FontSubsetError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Length conversions to PDF points
pub mod units {
    /// Points per millimetre (72 pt per inch, 25.4 mm per inch)
    pub const MM: f64 = 72.0 / 25.4;

    /// Convert millimetres to points
    pub fn mm(value: f64) -> f64 {
        value * MM
    }
}
