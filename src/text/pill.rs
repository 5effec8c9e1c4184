//! Text block layout inside a rounded background pill.
//!
//! All proportions derive from one line height, measured from
//! [`REFERENCE_GLYPHS`](super::face::REFERENCE_GLYPHS) so every line of a
//! block gets the same height whatever its own glyphs:
//!
//! | Quantity | Formula |
//! |---|---|
//! | line spacing | `0.2 × line_height` |
//! | horizontal padding | `0.4 × line_height` |
//! | vertical padding | `0.3 × line_height` |
//! | corner radius | `0.25 × line_height` |
//! | pill width | widest line + 2 × horizontal padding |
//! | pill height | `n × line_height + (n − 1) × spacing` + 2 × vertical padding |
//!
//! Each line is centered horizontally. The first line's ink is centered in
//! its line-height slot, which corrects for text without ascenders or
//! descenders sitting visually high or low; later lines follow at a fixed
//! pitch of `line_height + spacing`.

use super::face::{FontFace, ink_extent, reference_line_height, text_width};
use super::wrap::wrap;
use crate::imaging::TextPosition;
use crate::imaging::calculations::pill_origin;

const SPACING_RATIO: f64 = 0.2;
const PADDING_X_RATIO: f64 = 0.4;
const PADDING_Y_RATIO: f64 = 0.3;
const RADIUS_RATIO: f64 = 0.25;

fn ratio_of(line_height: u32, ratio: f64) -> u32 {
    (line_height as f64 * ratio) as u32
}

/// One line of text positioned inside the pill.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidLine {
    pub text: String,
    /// Left edge of the line's pen start, relative to the pill.
    pub x: u32,
    /// Baseline, relative to the pill's top edge.
    pub baseline: i32,
    pub width: u32,
}

/// Box geometry and per-line origins of a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct PillLayout {
    pub width: u32,
    pub height: u32,
    pub line_height: u32,
    pub line_spacing: u32,
    pub padding_x: u32,
    pub padding_y: u32,
    pub corner_radius: u32,
    pub lines: Vec<LaidLine>,
}

impl PillLayout {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Lay out already-wrapped `lines` with `face`.
pub fn layout_pill(lines: &[String], face: &dyn FontFace) -> PillLayout {
    let line_height = reference_line_height(face);
    let line_spacing = ratio_of(line_height, SPACING_RATIO);
    let padding_x = ratio_of(line_height, PADDING_X_RATIO);
    let padding_y = ratio_of(line_height, PADDING_Y_RATIO);
    let corner_radius = ratio_of(line_height, RADIUS_RATIO);

    let widths: Vec<u32> = lines.iter().map(|line| text_width(face, line)).collect();
    let widest = widths.iter().copied().max().unwrap_or(0);
    let n = lines.len().max(1) as u32;
    let width = widest + 2 * padding_x;
    let height = n * line_height + (n - 1) * line_spacing + 2 * padding_y;

    let first = lines
        .first()
        .map(|line| ink_extent(face, line))
        .filter(|extent| extent.height() > 0)
        .unwrap_or_else(|| ink_extent(face, super::face::REFERENCE_GLYPHS));
    let first_top = padding_y as i32 + (line_height as i32 - first.height() as i32) / 2;
    let first_baseline = first_top + first.above;
    let pitch = (line_height + line_spacing) as i32;

    let lines = lines
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (text, &line_width))| LaidLine {
            text: text.clone(),
            x: (width - line_width) / 2,
            baseline: first_baseline + i as i32 * pitch,
            width: line_width,
        })
        .collect();

    PillLayout {
        width,
        height,
        line_height,
        line_spacing,
        padding_x,
        padding_y,
        corner_radius,
        lines,
    }
}

/// Wrap `text` to `max_width` and lay it out.
pub fn layout_text(text: &str, face: &dyn FontFace, max_width: u32) -> PillLayout {
    layout_pill(&wrap(text, face, max_width), face)
}

/// Top-left corner of a pill of `pill_size` inside `container`.
///
/// See [`pill_origin`] for the margin and clamping rules.
pub fn place_pill(
    container: (u32, u32),
    pill_size: (u32, u32),
    position: TextPosition,
    margin_percent: f64,
) -> (u32, u32) {
    pill_origin(container, pill_size, position, margin_percent)
}
