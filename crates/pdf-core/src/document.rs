//! PDF Document builder

use crate::graphics::{generate_line_operators, LineStyle};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::font::FontSubset;
use crate::{Align, FontData, PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::Arc;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Mid grey, used for secondary text
    pub fn grey() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Physical page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 portrait (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

/// A text operation waiting for its font subset
///
/// Glyph ids are only known once every character of the document has been
/// seen, so text is encoded at save time.
#[derive(Debug, Clone)]
struct BufferedTextOp {
    /// The text to render
    text: String,
    /// Font name (e.g., "jpth")
    font_name: String,
    /// Font resource name (e.g., "F1")
    font_resource_name: String,
    /// Left edge in PDF coordinates, alignment already applied
    x: f64,
    /// Baseline in PDF coordinates
    y: f64,
    /// Font size in points
    font_size: f32,
    /// Text color
    color: Color,
}

/// One piece of a page's content stream, in drawing order
#[derive(Debug, Clone)]
enum ContentOp {
    /// Finished operators
    Raw(Vec<u8>),
    /// Text encoded at save time
    Text(BufferedTextOp),
}

/// A page under construction
struct PageState {
    size: PageSize,
    /// Content in drawing order, written as one stream at save time
    content: Vec<ContentOp>,
    /// Font name -> resource name (e.g. "F1")
    font_resources: BTreeMap<String, String>,
}

/// PDF document builder
///
/// Pages are created blank, drawn into, and serialized once by
/// [`PdfDocument::save`] or [`PdfDocument::to_bytes`]. All bookkeeping uses
/// ordered maps so identical drawing calls produce identical output.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Pages in order (page number = index + 1)
    pages: Vec<PageState>,
    /// Registered fonts
    fonts: BTreeMap<String, Arc<FontData>>,
    /// Characters drawn per font (drives widths and ToUnicode)
    used_chars: BTreeMap<String, BTreeSet<char>>,
    /// Current font name
    current_font: Option<String>,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Next font resource number
    next_font_resource: u32,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        Self {
            inner: Document::with_version("1.7"),
            pages: Vec::new(),
            fonts: BTreeMap::new(),
            used_chars: BTreeMap::new(),
            current_font: None,
            current_font_size: 12.0,
            current_text_color: Color::default(),
            next_font_resource: 1,
        }
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_page(&mut self, size: PageSize) -> usize {
        self.pages.push(PageState {
            size,
            content: Vec::new(),
            font_resources: BTreeMap::new(),
        });
        self.pages.len()
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get the size of a page
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        Ok(self.page(page)?.size)
    }

    /// Register a parsed TrueType font under `name`
    pub fn add_font(&mut self, name: &str, font: Arc<FontData>) -> Result<()> {
        if self.fonts.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        self.fonts.insert(name.to_string(), font);
        Ok(())
    }

    /// Set the current font and size
    ///
    /// # Example
    /// ```ignore
    /// doc.add_font("jpth", font)?;
    /// doc.set_font("jpth", 16.0)?;
    /// ```
    pub fn set_font(&mut self, name: &str, size: f32) -> Result<()> {
        if !self.fonts.contains_key(name) {
            return Err(PdfError::FontNotFound(name.to_string()));
        }

        self.current_font = Some(name.to_string());
        self.current_font_size = size;
        Ok(())
    }

    /// Set only the font size (keeps current font)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_font.is_none() {
            return Err(PdfError::FontNotFound("No font set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the text color for subsequent text
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Get current font's text width for a string, in points
    pub fn get_text_width(&self, text: &str) -> Result<f64> {
        let font = self.current_font_data()?;
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Insert text at a specific position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let page_height = self.page(page)?.size.height;

        let font_name = self
            .current_font
            .clone()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))?;

        if text.is_empty() {
            return Ok(());
        }

        let text_width = self
            .current_font_data()?
            .text_width_points(text, self.current_font_size) as f64;

        self.used_chars
            .entry(font_name.clone())
            .or_default()
            .extend(text.chars());

        let font_resource_name = self.get_or_create_font_ref(&font_name, page)?;

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - text_width / 2.0,
            Align::Right => x - text_width,
        };

        // Convert Y coordinate from top-origin to PDF bottom-origin
        let op = BufferedTextOp {
            text: text.to_string(),
            font_name,
            font_resource_name,
            x: start_x,
            y: page_height - y,
            font_size: self.current_font_size,
            color: self.current_text_color,
        };
        self.page_mut(page)?.content.push(ContentOp::Text(op));

        Ok(())
    }

    /// Draw a straight line between two points
    ///
    /// Coordinates are in points with Y measured from the top of the page.
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        style: LineStyle,
    ) -> Result<()> {
        let page_height = self.page(page)?.size.height;
        let operators =
            generate_line_operators(x1, page_height - y1, x2, page_height - y2, style);
        self.page_mut(page)?.content.push(ContentOp::Raw(operators));
        Ok(())
    }

    /// Get or create a font resource name for a page
    ///
    /// Returns the resource name (e.g., "F1", "F2") for use in content streams.
    /// Fonts are embedded at save time once all used characters are known.
    fn get_or_create_font_ref(&mut self, font_name: &str, page: usize) -> Result<String> {
        let next = self.next_font_resource;
        let page_state = self.page_mut(page)?;

        if let Some(resource_name) = page_state.font_resources.get(font_name) {
            return Ok(resource_name.clone());
        }

        let resource_name = format!("F{next}");
        page_state
            .font_resources
            .insert(font_name.to_string(), resource_name.clone());
        self.next_font_resource += 1;

        Ok(resource_name)
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Serialize the document to bytes
    pub fn to_bytes(mut self) -> Result<Vec<u8>> {
        self.build()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(buffer)
    }

    /// Write fonts, pages, the page tree and the catalog into the lopdf document
    fn build(&mut self) -> Result<()> {
        let subsets = self.subset_fonts()?;
        let font_ids = self.embed_fonts(&subsets)?;

        let pages_id = self.inner.new_object_id();
        let mut kids = Vec::with_capacity(self.pages.len());

        for page in &self.pages {
            let mut font_dict = Dictionary::new();
            for (font_name, resource_name) in &page.font_resources {
                let font_id = font_ids
                    .get(font_name)
                    .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*font_id));
            }

            let operators = encode_content(&page.content, &subsets)?;
            let mut content = Stream::new(Dictionary::new(), operators);
            // Compression is best-effort; an uncompressed stream is still valid
            let _ = content.compress();
            let contents_id = self.inner.add_object(content);

            let page_id = self.inner.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    Object::Real(page.size.width as f32),
                    Object::Real(page.size.height as f32),
                ],
                "Resources" => dictionary! { "Font" => font_dict },
                "Contents" => contents_id,
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        self.inner.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        self.inner.trailer.set("Root", catalog_id);

        Ok(())
    }

    /// Cut every font that was drawn with down to its used glyphs
    fn subset_fonts(&self) -> Result<BTreeMap<String, FontSubset>> {
        let mut subsets = BTreeMap::new();

        for (font_name, used_chars) in &self.used_chars {
            let font = self
                .fonts
                .get(font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
            subsets.insert(font_name.clone(), font.create_subset(used_chars)?);
        }

        Ok(subsets)
    }

    /// Embed every font that was drawn with
    ///
    /// # Returns
    /// Font name -> Type0 font object ID
    fn embed_fonts(
        &mut self,
        subsets: &BTreeMap<String, FontSubset>,
    ) -> Result<BTreeMap<String, ObjectId>> {
        let mut font_ids = BTreeMap::new();

        for (font_name, subset) in subsets {
            let font = self
                .fonts
                .get(font_name)
                .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
            let font_objects = font.to_pdf_objects(subset)?;

            let mut font_file_stream = font_objects.font_file_stream;
            let _ = font_file_stream.compress();
            let font_file_id = self.inner.add_object(font_file_stream);

            let mut font_descriptor = font_objects.font_descriptor;
            font_descriptor.set("FontFile2", Object::Reference(font_file_id));
            let font_descriptor_id = self.inner.add_object(font_descriptor);

            let mut cid_font = font_objects.cid_font;
            cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
            let cid_font_id = self.inner.add_object(cid_font);

            let tounicode_id = self.inner.add_object(font_objects.tounicode_stream);

            let mut type0_font = font_objects.type0_font;
            type0_font.set(
                "DescendantFonts",
                Object::Array(vec![Object::Reference(cid_font_id)]),
            );
            type0_font.set("ToUnicode", Object::Reference(tounicode_id));
            let type0_font_id = self.inner.add_object(type0_font);

            font_ids.insert(font_name.clone(), type0_font_id);
        }

        Ok(font_ids)
    }

    fn current_font_data(&self) -> Result<&FontData> {
        let name = self
            .current_font
            .as_ref()
            .ok_or_else(|| PdfError::FontNotFound("No font set".to_string()))?;
        self.fonts
            .get(name)
            .map(Arc::as_ref)
            .ok_or_else(|| PdfError::FontNotFound(name.clone()))
    }

    fn page(&self, page: usize) -> Result<&PageState> {
        let count = self.pages.len();
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .ok_or(PdfError::InvalidPage(page, count))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageState> {
        let count = self.pages.len();
        page.checked_sub(1)
            .and_then(|index| self.pages.get_mut(index))
            .ok_or(PdfError::InvalidPage(page, count))
    }
}

/// Join a page's content into one operator stream, encoding text with the
/// subset glyph ids
fn encode_content(
    content: &[ContentOp],
    subsets: &BTreeMap<String, FontSubset>,
) -> Result<Vec<u8>> {
    let mut operators = Vec::new();

    for op in content {
        match op {
            ContentOp::Raw(bytes) => operators.extend_from_slice(bytes),
            ContentOp::Text(text_op) => {
                let subset = subsets
                    .get(&text_op.font_name)
                    .ok_or_else(|| PdfError::FontNotFound(text_op.font_name.clone()))?;

                // Position is final, so alignment no longer needs the width
                let ctx = TextRenderContext {
                    font_name: text_op.font_resource_name.clone(),
                    font_size: text_op.font_size,
                    text_width: 0.0,
                    color: text_op.color,
                };
                let text_hex = subset.encode_text_hex(&text_op.text);
                operators.extend(generate_text_operators(
                    &text_hex,
                    text_op.x,
                    text_op.y,
                    Align::Left,
                    &ctx,
                ));
            }
        }
    }

    Ok(operators)
}
