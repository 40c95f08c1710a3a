//! Rendering of planned forms into PDF files

use crate::layout::{DrawOp, FormLayout, BODY_SIZE};
use crate::request::OvertimeRequest;
use crate::{FormError, Result};
use pdf_core::{Align, FontData, LineStyle, PageSize, PdfDocument};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use tempfile::NamedTempFile;

/// Name the form font is registered under in every document
pub const FONT_NAME: &str = "jpth";

static SHARED: OnceLock<FormRenderer> = OnceLock::new();

/// Renders overtime requests with one Thai/Japanese TrueType font
///
/// The font is parsed once and shared between renders; cloning the renderer
/// only clones the handle.
#[derive(Debug, Clone)]
pub struct FormRenderer {
    font: Arc<FontData>,
}

impl FormRenderer {
    /// Create a renderer from an already loaded font
    pub fn from_font(font: Arc<FontData>) -> Self {
        Self { font }
    }

    /// Read and parse the font at `path`
    pub fn from_font_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let font = FontData::from_file(FONT_NAME, path).map_err(|e| FormError::FontUnavailable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_font(Arc::new(font)))
    }

    /// Process-wide renderer, loaded from `path` on first use
    ///
    /// Later calls return the renderer from the first successful call and
    /// ignore `path`. A failed load is not cached.
    pub fn shared<P: AsRef<Path>>(path: P) -> Result<&'static FormRenderer> {
        if let Some(renderer) = SHARED.get() {
            return Ok(renderer);
        }
        let renderer = Self::from_font_path(path)?;
        Ok(SHARED.get_or_init(|| renderer))
    }

    /// Render a request to PDF bytes
    pub fn render_bytes(&self, request: &OvertimeRequest) -> Result<Vec<u8>> {
        let mut doc = PdfDocument::new();
        let page = doc.add_page(PageSize::A4);
        doc.add_font(FONT_NAME, Arc::clone(&self.font))?;
        doc.set_font(FONT_NAME, BODY_SIZE)?;

        for op in FormLayout::plan(request) {
            match op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    size,
                    color,
                } => {
                    doc.set_font_size(size)?;
                    doc.set_text_color(color);
                    doc.insert_text(&text, page, x, y, Align::Left)?;
                }
                DrawOp::Line { x1, y1, x2, y2 } => {
                    doc.draw_line(page, x1, y1, x2, y2, LineStyle::default())?;
                }
            }
        }

        Ok(doc.to_bytes()?)
    }

    /// Render a request and write it to `output_path`
    ///
    /// The PDF is written to a temporary file next to the destination and
    /// then renamed over it, so readers never see a partial file.
    pub fn render<P: AsRef<Path>>(
        &self,
        request: &OvertimeRequest,
        output_path: P,
    ) -> Result<PathBuf> {
        let output_path = output_path.as_ref();
        let bytes = self.render_bytes(request)?;

        let dir = match output_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.persist(output_path)
            .map_err(|e| FormError::Persist {
                path: output_path.to_path_buf(),
                source: e.error,
            })?;

        tracing::debug!(path = %output_path.display(), bytes = bytes.len(), "wrote OT form");
        Ok(output_path.to_path_buf())
    }
}
