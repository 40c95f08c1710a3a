//! Font handling for PDF documents

use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use subsetter::GlyphRemapper;

/// A parsed TrueType font, shared read-only between documents
///
/// Which characters a document actually uses is tracked by the document,
/// so one `FontData` can back any number of renders.
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Raw TTF data, also borrowed by `face`
    ttf_data: &'static [u8],
    /// Parsed font face
    face: Option<ttf_parser::Face<'static>>,
}

/// The glyphs one document draws with, renumbered for the embedded subset
#[derive(Debug, Clone)]
pub struct FontSubset {
    /// Subset font program
    pub data: Vec<u8>,
    /// Character to glyph id inside `data`
    glyphs: BTreeMap<char, u16>,
    /// Advance width of each subset glyph, in font units
    advances: BTreeMap<u16, u16>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (subset TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        // The face borrows its bytes for 'static, so the one copy is leaked.
        // Fonts are loaded once per process and live until exit.
        let data: &'static [u8] = Box::leak(ttf_data.to_vec().into_boxed_slice());

        let face = ttf_parser::Face::parse(data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data: data,
            face: Some(face),
        })
    }

    /// Read and parse a TTF file from disk
    pub fn from_file<P: AsRef<Path>>(name: &str, path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_ttf(name, &data)
    }

    /// Get glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        self.glyph_id(c).map(|id| id != 0).unwrap_or(false)
    }

    /// Get glyph advance width
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        self.face.as_ref().and_then(|face| {
            let glyph_id = face.glyph_index(c)?;
            face.glyph_hor_advance(glyph_id)
        })
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        self.face
            .as_ref()
            .map(|face| face.units_per_em())
            .unwrap_or(1000)
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.ascender())
            .unwrap_or(800)
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.descender())
            .unwrap_or(-200)
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph_advance(c))
            .map(|w| w as u32)
            .sum()
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Cut the font down to the glyphs `used_chars` need
    ///
    /// Glyph ids are renumbered in ascending order of the original ids,
    /// starting at 1. `.notdef` stays at 0.
    pub fn create_subset(&self, used_chars: &BTreeSet<char>) -> Result<FontSubset> {
        let original: BTreeSet<u16> = used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c))
            .filter(|&gid| gid != 0)
            .collect();

        let mut remapper = GlyphRemapper::new();
        let mut new_ids = BTreeMap::new();
        for gid in original {
            new_ids.insert(gid, remapper.remap(gid));
        }

        let data = subsetter::subset(self.ttf_data, 0, &remapper)
            .map_err(|e| PdfError::FontSubsetError(format!("{e:?}")))?;

        let glyphs = used_chars
            .iter()
            .filter_map(|&c| {
                let gid = self.glyph_id(c)?;
                new_ids.get(&gid).map(|&new_gid| (c, new_gid))
            })
            .collect();

        let advances = new_ids
            .iter()
            .filter_map(|(&old, &new)| {
                let face = self.face.as_ref()?;
                let advance = face.glyph_hor_advance(ttf_parser::GlyphId(old))?;
                Some((new, advance))
            })
            .collect();

        Ok(FontSubset {
            data,
            glyphs,
            advances,
        })
    }

    /// Generate all PDF objects needed to embed a subset of this font
    pub fn to_pdf_objects(&self, subset: &FontSubset) -> Result<FontObjects> {
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = Self::generate_tounicode_cmap(subset);
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![("Type", "CMap".into())]),
            tounicode_content.into_bytes(),
        );

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (subset.data.len() as i64).into())]),
            subset.data.clone(),
        );

        let units_per_em = self.units_per_em() as i64;
        let ascender = self.ascender();
        let descender = self.descender();

        // Bounding box from vertical metrics only; viewers tolerate this
        let font_bbox = vec![
            0.into(),
            (descender as i64).into(),
            units_per_em.into(),
            (ascender as i64).into(),
        ];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", (ascender as i64).into()),
            ("Descent", (descender as i64).into()),
            ("CapHeight", (ascender as i64).into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))), // set when embedding
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))), // set when embedding
            ("W", self.generate_widths_array(subset).into()),
            ("DW", 1000.into()),
            ("CIDToGIDMap", "Identity".into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()), // set when embedding
            ("ToUnicode", Object::Reference((0, 0))),                    // set when embedding
        ]);

        Ok(FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Generate /W array for the subset's glyph widths
    ///
    /// Widths are scaled to the 1000-unit glyph space PDF expects.
    fn generate_widths_array(&self, subset: &FontSubset) -> Vec<Object> {
        let scale = 1000.0 / self.units_per_em() as f64;
        let mut widths = Vec::with_capacity(subset.advances.len() * 2);

        // Individual mapping format: [gid1 [width1] gid2 [width2] ...]
        for (&gid, &advance) in &subset.advances {
            let width = (advance as f64 * scale).round() as i64;
            widths.push((gid as i64).into());
            widths.push(vec![width.into()].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(subset: &FontSubset) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");

        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let entries: Vec<(char, u16)> = subset.glyphs.iter().map(|(&c, &gid)| (c, gid)).collect();

        // At most 100 entries per bfchar section
        for chunk in entries.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (c, gid) in chunk {
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

impl FontSubset {
    /// Glyph id inside the subset; 0 for characters it does not cover
    pub fn glyph_id(&self, c: char) -> u16 {
        self.glyphs.get(&c).copied().unwrap_or(0)
    }

    /// Number of glyphs kept, not counting `.notdef`
    pub fn glyph_count(&self) -> usize {
        self.advances.len()
    }

    /// Encode text as hex string for PDF Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() * 4 + 2);
        result.push('<');
        for c in text.chars() {
            result.push_str(&format!("{:04X}", self.glyph_id(c)));
        }
        result.push('>');
        result
    }
}
