//! Fixed layout of the OT request form
//!
//! Coordinates are in points from the top-left corner of an A4 page; the
//! cursor moves down by a fixed step after every line regardless of what was
//! drawn. Values are never wrapped, so a long value runs past the right edge.

use crate::request::{Field, OvertimeRequest};
use pdf_core::units::mm;
use pdf_core::Color;

/// Title, Thai and Japanese
pub const TITLE: &str = "ใบแจ้งขอทำ OT / 残業申請書";

/// Label in front of the issue date
pub const ISSUE_DATE_LABEL: &str = "วันที่ออกเอกสาร / 発行日";

/// Applicant signature caption
pub const APPLICANT_CAPTION: &str = "ผู้ขอทำ OT / 申請者";

/// Approver signature caption
pub const APPROVER_CAPTION: &str = "ผู้อนุมัติ / 承認者";

pub const TITLE_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 12.0;
pub const THAI_LABEL_SIZE: f32 = 11.0;
pub const JAPANESE_LABEL_SIZE: f32 = 10.0;

/// Horizontal offset of the Japanese label from the Thai label
pub const JAPANESE_LABEL_OFFSET: f64 = 180.0;
/// Horizontal offset of the field value from the Thai label
pub const VALUE_OFFSET: f64 = 240.0;
/// Horizontal offset of the approver column
pub const APPROVER_OFFSET: f64 = 230.0;
/// Length of each signature rule
pub const SIGNATURE_RULE_LENGTH: f64 = 160.0;

/// Left margin
pub fn margin_x() -> f64 {
    mm(20.0)
}

/// Baseline of the title, from the top edge
pub fn top_y() -> f64 {
    mm(25.0)
}

/// One bilingual row of the form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRow {
    pub field: Field,
    pub thai: &'static str,
    pub japanese: &'static str,
    /// Cursor advance after the row, in millimetres
    pub advance_mm: f64,
}

/// Rows in drawing order
pub const FIELD_ROWS: [FieldRow; 7] = [
    FieldRow {
        field: Field::Name,
        thai: "ชื่อ-นามสกุล:",
        japanese: "氏名",
        advance_mm: 10.0,
    },
    FieldRow {
        field: Field::Department,
        thai: "แผนก:",
        japanese: "部署",
        advance_mm: 10.0,
    },
    FieldRow {
        field: Field::ProjectName,
        thai: "ชื่อโครงการ:",
        japanese: "プロジェクト名",
        advance_mm: 10.0,
    },
    FieldRow {
        field: Field::OtDate,
        thai: "วันที่ทำ OT:",
        japanese: "残業日",
        advance_mm: 10.0,
    },
    FieldRow {
        field: Field::OtTime,
        thai: "ช่วงเวลา:",
        japanese: "時間",
        advance_mm: 10.0,
    },
    FieldRow {
        field: Field::Hours,
        thai: "จำนวนชั่วโมง:",
        japanese: "時間数",
        advance_mm: 10.0,
    },
    // Extra space before the signature block
    FieldRow {
        field: Field::Reason,
        thai: "เหตุผลการทำ OT:",
        japanese: "残業理由",
        advance_mm: 18.0,
    },
];

/// A single drawing instruction
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f64,
        y: f64,
        size: f32,
        color: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

impl DrawOp {
    fn text(text: impl Into<String>, x: f64, y: f64, size: f32) -> Self {
        DrawOp::Text {
            text: text.into(),
            x,
            y,
            size,
            color: Color::black(),
        }
    }
}

/// Plans the drawing of one request
pub struct FormLayout;

impl FormLayout {
    /// Turn a request into the ordered list of drawing instructions
    pub fn plan(request: &OvertimeRequest) -> Vec<DrawOp> {
        let x = margin_x();
        let mut y = top_y();
        let mut ops = Vec::with_capacity(3 + FIELD_ROWS.len() * 3 + 4);

        ops.push(DrawOp::text(TITLE, x, y, TITLE_SIZE));
        y += mm(12.0);

        ops.push(DrawOp::text(
            format!("{ISSUE_DATE_LABEL}: {}", request.issue_date),
            x,
            y,
            BODY_SIZE,
        ));
        y += mm(12.0);

        for row in &FIELD_ROWS {
            ops.push(DrawOp::text(row.thai, x, y, THAI_LABEL_SIZE));
            ops.push(DrawOp::Text {
                text: row.japanese.to_string(),
                x: x + JAPANESE_LABEL_OFFSET,
                y,
                size: JAPANESE_LABEL_SIZE,
                color: Color::grey(),
            });
            ops.push(DrawOp::text(
                request.value(row.field),
                x + VALUE_OFFSET,
                y,
                BODY_SIZE,
            ));
            y += mm(row.advance_mm);
        }

        ops.push(DrawOp::text(APPLICANT_CAPTION, x, y, BODY_SIZE));
        ops.push(DrawOp::text(
            APPROVER_CAPTION,
            x + APPROVER_OFFSET,
            y,
            BODY_SIZE,
        ));
        y += mm(25.0);

        for start in [x, x + APPROVER_OFFSET] {
            ops.push(DrawOp::Line {
                x1: start,
                y1: y,
                x2: start + SIGNATURE_RULE_LENGTH,
                y2: y,
            });
        }

        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_command;
    use pretty_assertions::assert_eq;

    fn sample() -> OvertimeRequest {
        parse_command("OT John Doe|Engineering|Project X|2024-05-01|09:00-12:00|3|Deadline")
            .unwrap()
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::Line { .. } => None,
            })
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_rows_follow_field_order() {
        let fields: Vec<Field> = FIELD_ROWS.iter().map(|row| row.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_plan_draws_every_piece_once() {
        let ops = FormLayout::plan(&sample());

        // title + issue date + 7 rows x 3 + 2 captions + 2 rules
        assert_eq!(ops.len(), 2 + 21 + 2 + 2);

        let texts = texts(&ops);
        assert_eq!(texts[0], TITLE);
        assert_eq!(texts[1], "วันที่ออกเอกสาร / 発行日: วันนี้");
        assert_eq!(&texts[2..5], &["ชื่อ-นามสกุล:", "氏名", "John Doe"]);
        assert_eq!(&texts[20..23], &["เหตุผลการทำ OT:", "残業理由", "Deadline"]);
        assert_eq!(&texts[23..], &[APPLICANT_CAPTION, APPROVER_CAPTION]);
    }

    #[test]
    fn test_plan_row_geometry() {
        let ops = FormLayout::plan(&sample());
        let x = margin_x();

        // First row sits two 12 mm steps below the title
        let row_y = top_y() + mm(24.0);
        match (&ops[2], &ops[3], &ops[4]) {
            (
                DrawOp::Text { x: x0, y: y0, size: s0, color: c0, .. },
                DrawOp::Text { x: x1, y: y1, size: s1, color: c1, .. },
                DrawOp::Text { x: x2, y: y2, size: s2, .. },
            ) => {
                assert!(close(*x0, x));
                assert!(close(*x1, x + 180.0));
                assert!(close(*x2, x + 240.0));
                assert!(close(*y0, row_y) && close(*y1, row_y) && close(*y2, row_y));
                assert_eq!((*s0, *s1, *s2), (11.0, 10.0, 12.0));
                assert_eq!(*c0, Color::black());
                assert_eq!(*c1, Color::grey());
            }
            other => panic!("unexpected ops: {other:?}"),
        }
    }

    #[test]
    fn test_plan_rows_step_ten_millimetres() {
        let ops = FormLayout::plan(&sample());
        let row_ys: Vec<f64> = ops[2..23]
            .chunks(3)
            .map(|row| match &row[0] {
                DrawOp::Text { y, .. } => *y,
                DrawOp::Line { .. } => unreachable!(),
            })
            .collect();

        for pair in row_ys.windows(2) {
            assert!(close(pair[1] - pair[0], mm(10.0)));
        }
    }

    #[test]
    fn test_plan_signature_block() {
        let ops = FormLayout::plan(&sample());
        let x = margin_x();
        let captions_y = top_y() + mm(12.0 + 12.0 + 6.0 * 10.0 + 18.0);
        let rules_y = captions_y + mm(25.0);

        match &ops[24] {
            DrawOp::Text { x: cx, y, .. } => {
                assert!(close(*cx, x + 230.0));
                assert!(close(*y, captions_y));
            }
            other => panic!("unexpected op: {other:?}"),
        }

        let rules: Vec<(f64, f64, f64)> = ops[25..]
            .iter()
            .map(|op| match op {
                DrawOp::Line { x1, y1, x2, y2 } => {
                    assert!(close(*y1, *y2));
                    (*x1, *x2, *y1)
                }
                DrawOp::Text { .. } => panic!("expected a rule"),
            })
            .collect();

        assert_eq!(rules.len(), 2);
        assert!(close(rules[0].0, x) && close(rules[0].1, x + 160.0));
        assert!(close(rules[1].0, x + 230.0) && close(rules[1].1, x + 390.0));
        assert!(close(rules[0].2, rules_y));
    }

    #[test]
    fn test_plan_keeps_long_values_on_one_line() {
        let mut request = sample();
        request.reason = "x".repeat(500);
        let ops = FormLayout::plan(&request);
        assert_eq!(ops.len(), 27);
        assert!(texts(&ops).contains(&request.reason.as_str()));
    }
}
