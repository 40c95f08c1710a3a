//! Path drawing utilities

use crate::document::Color;

/// Stroke settings for a line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Line width in points
    pub width: f64,
    /// Stroke color
    pub color: Color,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color::black(),
        }
    }
}

/// Generate PDF operators for a straight line
///
/// # Arguments
/// * `x1`, `y1` - Start point (PDF coordinates, from bottom)
/// * `x2`, `y2` - End point (PDF coordinates, from bottom)
/// * `style` - Stroke width and color
///
/// # Returns
/// PDF content stream operators as bytes
pub fn generate_line_operators(x1: f64, y1: f64, x2: f64, y2: f64, style: LineStyle) -> Vec<u8> {
    // q / RG stroke color / w width / m move / l line / S stroke / Q
    let Color { r, g, b } = style.color;
    format!(
        "q\n{r} {g} {b} RG\n{} w\n{x1} {y1} m\n{x2} {y2} l\nS\nQ\n",
        style.width
    )
    .into_bytes()
}
