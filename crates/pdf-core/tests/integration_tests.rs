//! Integration tests for pdf-core
//!
//! These tests build complete documents and read them back with lopdf.

#[path = "../src/fixtures.rs"]
mod fixtures;

use lopdf::content::Content;
use pdf_core::{Align, Color, FontData, LineStyle, PageSize, PdfDocument, PdfError};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn test_font() -> Arc<FontData> {
    Arc::new(FontData::from_ttf("jpth", &fixtures::synthetic_font()).expect("Failed to parse font"))
}

fn single_page_doc() -> PdfDocument {
    let mut doc = PdfDocument::new();
    doc.add_page(PageSize::A4);
    doc.add_font("jpth", test_font()).expect("Failed to add font");
    doc.set_font("jpth", 12.0).expect("Failed to set font");
    doc
}

/// Decode the operators of page 1
fn page_operators(bytes: &[u8]) -> Vec<lopdf::content::Operation> {
    let doc = lopdf::Document::load_mem(bytes).expect("Failed to reload PDF");
    let page_id = doc.get_pages()[&1];
    let content = doc.get_page_content(page_id).expect("Failed to read content");
    Content::decode(&content)
        .expect("Failed to decode content")
        .operations
}

#[test]
fn test_blank_page_is_a4() {
    let mut doc = PdfDocument::new();
    doc.add_page(PageSize::A4);
    let bytes = doc.to_bytes().expect("Failed to save PDF");

    let reloaded = lopdf::Document::load_mem(&bytes).expect("Failed to reload PDF");
    let pages = reloaded.get_pages();
    assert_eq!(pages.len(), 1);

    let page = reloaded.get_dictionary(pages[&1]).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
    let width = media_box[2].as_float().unwrap();
    let height = media_box[3].as_float().unwrap();
    assert!((width - 595.28).abs() < 0.01);
    assert!((height - 841.89).abs() < 0.01);
}

#[test]
fn test_insert_text_basic() {
    let mut doc = single_page_doc();
    doc.insert_text("Hello", 1, 100.0, 100.0, Align::Left)
        .expect("Failed to insert text");

    let bytes = doc.to_bytes().expect("Failed to save PDF");
    let ops = page_operators(&bytes);

    let tj_count = ops.iter().filter(|op| op.operator == "Tj").count();
    assert_eq!(tj_count, 1);
}

#[test]
fn test_thai_and_japanese_text() {
    let font = test_font();
    let mut doc = single_page_doc();
    doc.insert_text("ชื่อ-นามสกุล: 氏名", 1, 56.0, 100.0, Align::Left)
        .expect("Failed to insert Thai/Japanese text");

    let bytes = doc.to_bytes().expect("Failed to save PDF");
    let ops = page_operators(&bytes);

    let shown = ops
        .iter()
        .find(|op| op.operator == "Tj")
        .and_then(|op| op.operands.first())
        .and_then(|operand| operand.as_str().ok())
        .expect("Missing Tj operand")
        .to_vec();

    // Subset ids follow the order of the original ids, starting at 1
    let text = "ชื่อ-นามสกุล: 氏名";
    let mut original: Vec<u16> = text.chars().map(|c| font.glyph_id(c).unwrap()).collect();
    original.sort_unstable();
    original.dedup();

    let expected: Vec<u8> = text
        .chars()
        .flat_map(|c| {
            let gid = font.glyph_id(c).unwrap();
            let position = original.binary_search(&gid).unwrap();
            (position as u16 + 1).to_be_bytes()
        })
        .collect();
    assert_eq!(shown, expected);
}

/// Follow Type0 -> CIDFont -> FontDescriptor -> FontFile2 on page 1
fn embedded_font_file(bytes: &[u8]) -> lopdf::Stream {
    let doc = lopdf::Document::load_mem(bytes).expect("Failed to reload PDF");
    let page_id = doc.get_pages()[&1];
    let fonts = doc.get_page_fonts(page_id);
    let type0 = fonts.values().next().expect("No font on page");

    let descendants = type0.get(b"DescendantFonts").unwrap().as_array().unwrap();
    let cid_font = doc
        .get_dictionary(descendants[0].as_reference().unwrap())
        .unwrap();
    let descriptor = doc
        .get_dictionary(cid_font.get(b"FontDescriptor").unwrap().as_reference().unwrap())
        .unwrap();
    let file_id = descriptor.get(b"FontFile2").unwrap().as_reference().unwrap();
    doc.get_object(file_id).unwrap().as_stream().unwrap().clone()
}

#[test]
fn test_only_used_glyphs_are_embedded() {
    let source = fixtures::synthetic_font();
    let mut doc = single_page_doc();
    doc.insert_text("OT 残業 ส", 1, 56.0, 100.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let mut font_file = embedded_font_file(&bytes);

    let length1 = font_file.dict.get(b"Length1").unwrap().as_i64().unwrap() as usize;
    assert!(length1 > 0);
    assert!(length1 < source.len());

    font_file.decompress();
    assert_eq!(font_file.content.len(), length1);
}

#[test]
fn test_tounicode_maps_subset_ids() {
    let mut doc = single_page_doc();
    doc.insert_text("BA", 1, 56.0, 100.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reloaded.get_pages()[&1];
    let fonts = reloaded.get_page_fonts(page_id);
    let type0 = fonts.values().next().unwrap();
    let tounicode_id = type0.get(b"ToUnicode").unwrap().as_reference().unwrap();
    let cmap = reloaded.get_object(tounicode_id).unwrap().as_stream().unwrap();
    let cmap = String::from_utf8(cmap.content.clone()).unwrap();

    assert!(cmap.contains("<0001> <0041>"));
    assert!(cmap.contains("<0002> <0042>"));

    let ops = page_operators(&bytes);
    let tj = ops.iter().find(|op| op.operator == "Tj").unwrap();
    assert_eq!(tj.operands[0].as_str().unwrap(), &[0x00, 0x02, 0x00, 0x01]);
}

#[test]
fn test_text_color_is_applied() {
    let mut doc = single_page_doc();
    doc.set_text_color(Color::grey());
    doc.insert_text("部署", 1, 0.0, 50.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let ops = page_operators(&bytes);

    let rg = ops.iter().find(|op| op.operator == "rg").expect("Missing rg");
    let values: Vec<f32> = rg.operands.iter().map(|o| o.as_float().unwrap()).collect();
    assert_eq!(values, vec![0.5, 0.5, 0.5]);
}

#[test]
fn test_draw_line() {
    let mut doc = single_page_doc();
    doc.draw_line(1, 56.0, 400.0, 216.0, 400.0, LineStyle::default())
        .expect("Failed to draw line");

    let bytes = doc.to_bytes().unwrap();
    let ops = page_operators(&bytes);

    let operators: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
    assert_eq!(operators, vec!["q", "RG", "w", "m", "l", "S", "Q"]);
}

#[test]
fn test_font_is_embedded_once() {
    let mut doc = single_page_doc();
    doc.insert_text("OT", 1, 10.0, 10.0, Align::Left).unwrap();
    doc.set_font_size(16.0).unwrap();
    doc.insert_text("残業", 1, 10.0, 40.0, Align::Left).unwrap();

    let bytes = doc.to_bytes().unwrap();
    let reloaded = lopdf::Document::load_mem(&bytes).unwrap();
    let page_id = reloaded.get_pages()[&1];
    let fonts = reloaded.get_page_fonts(page_id);

    assert_eq!(fonts.len(), 1);
    let font = fonts.values().next().unwrap();
    assert_eq!(font.get(b"Subtype").unwrap().as_name_str().unwrap(), "Type0");
}

#[test]
fn test_output_is_deterministic() {
    let render = || {
        let mut doc = single_page_doc();
        doc.insert_text("ใบแจ้งขอทำ OT / 残業申請書", 1, 56.0, 70.0, Align::Left)
            .unwrap();
        doc.draw_line(1, 56.0, 400.0, 216.0, 400.0, LineStyle::default())
            .unwrap();
        doc.to_bytes().unwrap()
    };

    assert_eq!(render(), render());
}

#[test]
fn test_save_to_file() {
    let dir = std::env::temp_dir().join(format!("pdf-core-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("saved.pdf");

    let mut doc = single_page_doc();
    doc.insert_text("file", 1, 10.0, 10.0, Align::Left).unwrap();
    doc.save(&path).expect("Failed to save PDF");

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_invalid_page_number() {
    let mut doc = single_page_doc();

    let result = doc.insert_text("Test", 999, 100.0, 700.0, Align::Left);
    match result {
        Err(PdfError::InvalidPage(page, total)) => {
            assert_eq!(page, 999);
            assert_eq!(total, 1);
        }
        _ => panic!("Expected InvalidPage error"),
    }

    assert!(matches!(
        doc.draw_line(0, 0.0, 0.0, 1.0, 1.0, LineStyle::default()),
        Err(PdfError::InvalidPage(0, 1))
    ));
}

#[test]
fn test_font_not_found() {
    let mut doc = PdfDocument::new();
    doc.add_page(PageSize::A4);

    match doc.set_font("nonexistent", 12.0) {
        Err(PdfError::FontNotFound(name)) => assert_eq!(name, "nonexistent"),
        _ => panic!("Expected FontNotFound error"),
    }
}

#[test]
fn test_no_font_set() {
    let mut doc = PdfDocument::new();
    doc.add_page(PageSize::A4);

    let result = doc.insert_text("Test", 1, 100.0, 700.0, Align::Left);
    assert!(matches!(result, Err(PdfError::FontNotFound(_))));
}

#[test]
fn test_get_text_width() {
    let doc = single_page_doc();
    // Synthetic glyphs are 500 units wide at 1000 upem
    let width = doc.get_text_width("OT").unwrap();
    assert!((width - 12.0).abs() < 1e-6);
}
