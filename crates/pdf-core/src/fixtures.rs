//! Synthetic TrueType font for tests
//!
//! Builds a small but well-formed TrueType sfnt with `cmap`, `glyf`, `head`,
//! `hhea`, `hmtx`, `loca` and `maxp` tables. Every glyph outline is empty;
//! the font only exists so that glyph lookup, metrics, subsetting and
//! embedding can be exercised without shipping a real Thai/Japanese font
//! with the repository.

/// Unicode ranges mapped by the synthetic font: printable ASCII, Thai,
/// CJK punctuation with kana, and the CJK unified ideographs block.
const RANGES: [(u32, u32); 4] = [
    (0x0020, 0x007E),
    (0x0E00, 0x0E7F),
    (0x3000, 0x30FF),
    (0x4E00, 0x9FFF),
];

const UNITS_PER_EM: u16 = 1000;
const ADVANCE: u16 = 500;

/// Build the synthetic font bytes
pub fn synthetic_font() -> Vec<u8> {
    let glyph_count: u32 = 1 + RANGES.iter().map(|(s, e)| e - s + 1).sum::<u32>();

    // Tags must be sorted for the table directory
    let tables: [(&[u8; 4], Vec<u8>); 7] = [
        (b"cmap", cmap_table()),
        (b"glyf", vec![0u8; 4]),
        (b"head", head_table()),
        (b"hhea", hhea_table(glyph_count as u16)),
        (b"hmtx", hmtx_table(glyph_count as u16)),
        (b"loca", loca_table(glyph_count as u16)),
        (b"maxp", maxp_table(glyph_count as u16)),
    ];

    let num_tables = tables.len() as u16;
    let mut out = Vec::new();
    out.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    out.extend_from_slice(&num_tables.to_be_bytes());
    out.extend_from_slice(&64u16.to_be_bytes()); // searchRange
    out.extend_from_slice(&2u16.to_be_bytes()); // entrySelector
    out.extend_from_slice(&(num_tables * 16 - 64).to_be_bytes()); // rangeShift

    let mut offset = 12 + 16 * tables.len() as u32;
    let mut body = Vec::new();
    for (tag, data) in &tables {
        out.extend_from_slice(*tag);
        out.extend_from_slice(&0u32.to_be_bytes()); // checksum, not verified
        out.extend_from_slice(&offset.to_be_bytes());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());

        body.extend_from_slice(data);
        while body.len() % 4 != 0 {
            body.push(0);
        }
        offset = 12 + 16 * tables.len() as u32 + body.len() as u32;
    }
    out.extend_from_slice(&body);
    out
}

/// cmap with a single Unicode full-repertoire (format 12) subtable
fn cmap_table() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0u16.to_be_bytes()); // version
    t.extend_from_slice(&1u16.to_be_bytes()); // numTables
    t.extend_from_slice(&0u16.to_be_bytes()); // platform: Unicode
    t.extend_from_slice(&4u16.to_be_bytes()); // encoding: full repertoire
    t.extend_from_slice(&12u32.to_be_bytes()); // subtable offset

    let groups = RANGES.len() as u32;
    t.extend_from_slice(&12u16.to_be_bytes()); // format
    t.extend_from_slice(&0u16.to_be_bytes()); // reserved
    t.extend_from_slice(&(16 + 12 * groups).to_be_bytes()); // length
    t.extend_from_slice(&0u32.to_be_bytes()); // language
    t.extend_from_slice(&groups.to_be_bytes());

    let mut next_glyph = 1u32;
    for (start, end) in RANGES {
        t.extend_from_slice(&start.to_be_bytes());
        t.extend_from_slice(&end.to_be_bytes());
        t.extend_from_slice(&next_glyph.to_be_bytes());
        next_glyph += end - start + 1;
    }
    t
}

fn head_table() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // fontRevision
    t.extend_from_slice(&0u32.to_be_bytes()); // checksumAdjustment
    t.extend_from_slice(&0x5F0F_3CF5u32.to_be_bytes()); // magicNumber
    t.extend_from_slice(&0u16.to_be_bytes()); // flags
    t.extend_from_slice(&UNITS_PER_EM.to_be_bytes());
    t.extend_from_slice(&0u64.to_be_bytes()); // created
    t.extend_from_slice(&0u64.to_be_bytes()); // modified
    t.extend_from_slice(&0i16.to_be_bytes()); // xMin
    t.extend_from_slice(&(-200i16).to_be_bytes()); // yMin
    t.extend_from_slice(&(ADVANCE as i16).to_be_bytes()); // xMax
    t.extend_from_slice(&800i16.to_be_bytes()); // yMax
    t.extend_from_slice(&0u16.to_be_bytes()); // macStyle
    t.extend_from_slice(&8u16.to_be_bytes()); // lowestRecPPEM
    t.extend_from_slice(&2i16.to_be_bytes()); // fontDirectionHint
    t.extend_from_slice(&0i16.to_be_bytes()); // indexToLocFormat
    t.extend_from_slice(&0i16.to_be_bytes()); // glyphDataFormat
    t
}

fn hhea_table(glyph_count: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // version
    t.extend_from_slice(&800i16.to_be_bytes()); // ascender
    t.extend_from_slice(&(-200i16).to_be_bytes()); // descender
    t.extend_from_slice(&0i16.to_be_bytes()); // lineGap
    t.extend_from_slice(&ADVANCE.to_be_bytes()); // advanceWidthMax
    t.extend_from_slice(&0i16.to_be_bytes()); // minLeftSideBearing
    t.extend_from_slice(&0i16.to_be_bytes()); // minRightSideBearing
    t.extend_from_slice(&(ADVANCE as i16).to_be_bytes()); // xMaxExtent
    t.extend_from_slice(&1i16.to_be_bytes()); // caretSlopeRise
    t.extend_from_slice(&0i16.to_be_bytes()); // caretSlopeRun
    t.extend_from_slice(&0i16.to_be_bytes()); // caretOffset
    t.extend_from_slice(&[0u8; 8]); // reserved
    t.extend_from_slice(&0i16.to_be_bytes()); // metricDataFormat
    t.extend_from_slice(&glyph_count.to_be_bytes()); // numberOfHMetrics
    t
}

fn hmtx_table(glyph_count: u16) -> Vec<u8> {
    let mut t = Vec::with_capacity(glyph_count as usize * 4);
    for _ in 0..glyph_count {
        t.extend_from_slice(&ADVANCE.to_be_bytes());
        t.extend_from_slice(&0i16.to_be_bytes());
    }
    t
}

/// Short-format loca where every glyph is empty
fn loca_table(glyph_count: u16) -> Vec<u8> {
    vec![0u8; (glyph_count as usize + 1) * 2]
}

/// Version 1.0 maxp; outline limits are all zero
fn maxp_table(glyph_count: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    t.extend_from_slice(&glyph_count.to_be_bytes());
    t.extend_from_slice(&[0u8; 26]);
    t
}
