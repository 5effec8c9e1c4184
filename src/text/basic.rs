//! Built-in 5×7 bitmap face.
//!
//! Used as the last step of the font fallback chain, so a render never fails
//! for lack of a font file, and as a fixed-metrics face in tests. Glyphs are
//! uppercase-only (lowercase input is drawn as uppercase), sit on the
//! baseline with no descenders, and all share one advance width.
//!
//! Each glyph is a 5-wide × 7-tall cell scaled by an integer `unit`
//! derived from the requested pixel size (`px / 8`, at least 1). The
//! advance is 6 units: the cell plus one unit of spacing.

use super::face::{FontFace, GlyphMetrics};

const CELL_W: u32 = 5;
const CELL_H: u32 = 7;
const ADVANCE_UNITS: u32 = 6;

/// Rows top to bottom; bit 4 is the leftmost column.
type Bitmap = [u8; CELL_H as usize];

/// Drawn for characters the table does not cover.
const MISSING: Bitmap = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

fn bitmap(ch: char) -> Option<Bitmap> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ',' => [0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b00100, 0b01000],
        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        '?' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
        '\'' => [0b00100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000],
        '"' => [0b01010, 0b01010, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '+' => [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '/' => [0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        '&' => [0b01100, 0b10010, 0b10100, 0b01000, 0b10101, 0b10010, 0b01101],
        '%' => [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011],
        '#' => [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
        '$' => [0b00100, 0b01111, 0b10100, 0b01110, 0b00101, 0b11110, 0b00100],
        _ => return None,
    };
    Some(rows)
}

/// The built-in bitmap face at a given pixel size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicFace {
    px: f32,
    unit: u32,
}

impl BasicFace {
    pub fn new(px: f32) -> Self {
        let unit = (px / 8.0).round().max(1.0) as u32;
        Self { px, unit }
    }

    /// Pixel size of one bitmap cell.
    pub fn unit(&self) -> u32 {
        self.unit
    }

    fn advance(&self) -> f32 {
        (ADVANCE_UNITS * self.unit) as f32
    }
}

impl FontFace for BasicFace {
    fn size(&self) -> f32 {
        self.px
    }

    fn metrics(&self, ch: char) -> GlyphMetrics {
        if ch.is_whitespace() {
            return GlyphMetrics {
                advance: self.advance(),
                ..GlyphMetrics::default()
            };
        }
        GlyphMetrics {
            xmin: 0,
            ymin: 0,
            width: CELL_W * self.unit,
            height: CELL_H * self.unit,
            advance: self.advance(),
        }
    }

    fn rasterize(&self, ch: char) -> (GlyphMetrics, Vec<u8>) {
        let metrics = self.metrics(ch);
        if metrics.width == 0 {
            return (metrics, Vec::new());
        }
        let rows = bitmap(ch).unwrap_or(MISSING);
        let (w, h) = (metrics.width as usize, metrics.height as usize);
        let unit = self.unit as usize;
        let mut coverage = vec![0u8; w * h];
        for y in 0..h {
            let row = rows[y / unit];
            for x in 0..w {
                let column = x / unit;
                if row & (1 << (CELL_W as usize - 1 - column)) != 0 {
                    coverage[y * w + x] = 255;
                }
            }
        }
        (metrics, coverage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_scales_with_size() {
        assert_eq!(BasicFace::new(4.0).unit(), 1);
        assert_eq!(BasicFace::new(8.0).unit(), 1);
        assert_eq!(BasicFace::new(70.0).unit(), 9);
        assert_eq!(BasicFace::new(124.0).unit(), 16);
    }

    #[test]
    fn space_has_advance_but_no_ink() {
        let face = BasicFace::new(16.0);
        let (m, bitmap) = face.rasterize(' ');
        assert_eq!(m.advance, 12.0);
        assert_eq!((m.width, m.height), (0, 0));
        assert!(bitmap.is_empty());
    }

    #[test]
    fn lowercase_draws_as_uppercase() {
        let face = BasicFace::new(16.0);
        assert_eq!(face.rasterize('g').1, face.rasterize('G').1);
    }

    #[test]
    fn rasterized_cell_is_scaled_by_unit() {
        let face = BasicFace::new(16.0);
        let (m, bitmap) = face.rasterize('I');
        assert_eq!((m.width, m.height), (10, 14));
        assert_eq!(bitmap.len(), 140);
        // Top bar of 'I' covers columns 1..4 of the cell, i.e. pixels 2..8.
        assert_eq!(&bitmap[0..10], &[0, 0, 255, 255, 255, 255, 255, 255, 0, 0]);
    }

    #[test]
    fn unknown_character_draws_a_box() {
        let face = BasicFace::new(8.0);
        let (_, bitmap) = face.rasterize('€');
        assert_eq!(&bitmap[0..5], &[255; 5]);
        assert_eq!(bitmap[5], 255);
        assert_eq!(bitmap[6], 0);
    }
}
