//! Font faces: the metrics handle the layout engine measures with.
//!
//! A [`FontFace`] is a font at one pixel size. The layout code never looks
//! at font files or family names; it only asks a face for glyph metrics and
//! coverage bitmaps. Two faces ship with the crate:
//!
//! - [`OutlineFace`]: a TrueType/OpenType font rasterized with `fontdue`.
//! - [`BasicFace`](super::basic::BasicFace): a built-in bitmap face with
//!   fixed metrics, used when no font file resolves (and in tests).
//!
//! Glyph metrics follow the `fontdue` convention: `ymin` is the offset of
//! the bitmap's bottom edge from the baseline, positive upward.

use std::sync::Arc;

/// Placement and size of one rasterized glyph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphMetrics {
    /// Left edge of the bitmap relative to the pen position.
    pub xmin: i32,
    /// Bottom edge of the bitmap relative to the baseline (positive up).
    pub ymin: i32,
    pub width: u32,
    pub height: u32,
    /// Horizontal pen advance in pixels.
    pub advance: f32,
}

impl GlyphMetrics {
    fn has_ink(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// A font at a fixed pixel size.
pub trait FontFace: Send + Sync {
    /// Nominal pixel size of the face.
    fn size(&self) -> f32;

    /// Metrics for a single character, without rasterizing it.
    fn metrics(&self, ch: char) -> GlyphMetrics;

    /// Coverage bitmap (row-major, one byte per pixel) for a single character.
    fn rasterize(&self, ch: char) -> (GlyphMetrics, Vec<u8>);
}

/// Vertical ink extent of a string relative to its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InkExtent {
    /// Pixels of ink above the baseline.
    pub above: i32,
    /// Pixels of ink below the baseline.
    pub below: i32,
}

impl InkExtent {
    pub fn height(&self) -> u32 {
        (self.above + self.below).max(0) as u32
    }
}

/// Advance width of `text` in whole pixels (rounded up).
pub fn text_width(face: &dyn FontFace, text: &str) -> u32 {
    let width: f32 = text.chars().map(|ch| face.metrics(ch).advance).sum();
    width.ceil().max(0.0) as u32
}

/// Ink extent of `text`: the tallest ascent and deepest descent of its glyphs.
///
/// Strings without visible ink (empty or all spaces) have a zero extent.
pub fn ink_extent(face: &dyn FontFace, text: &str) -> InkExtent {
    let mut extent: Option<InkExtent> = None;
    for ch in text.chars() {
        let m = face.metrics(ch);
        if !m.has_ink() {
            continue;
        }
        let above = m.ymin + m.height as i32;
        let below = -m.ymin;
        extent = Some(match extent {
            Some(e) => InkExtent {
                above: e.above.max(above),
                below: e.below.max(below),
            },
            None => InkExtent { above, below },
        });
    }
    extent.unwrap_or_default()
}

/// Glyph pair with both an ascender and a descender, used for line height.
pub const REFERENCE_GLYPHS: &str = "Ag";

/// Line height of a face: the ink height of [`REFERENCE_GLYPHS`].
///
/// Every line of a block uses this height regardless of its own content,
/// so lines without descenders do not collapse.
pub fn reference_line_height(face: &dyn FontFace) -> u32 {
    ink_extent(face, REFERENCE_GLYPHS).height().max(1)
}

/// A TrueType/OpenType font rasterized with `fontdue`.
///
/// The parsed font is shared; faces at different sizes are cheap.
#[derive(Clone)]
pub struct OutlineFace {
    font: Arc<fontdue::Font>,
    px: f32,
}

impl OutlineFace {
    pub fn new(font: Arc<fontdue::Font>, px: f32) -> Self {
        Self { font, px }
    }

    /// Parse font bytes into a shareable `fontdue` font.
    pub fn parse(bytes: &[u8]) -> Result<Arc<fontdue::Font>, String> {
        fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map(Arc::new)
            .map_err(str::to_string)
    }
}

impl std::fmt::Debug for OutlineFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFace")
            .field("name", &self.font.name())
            .field("px", &self.px)
            .finish()
    }
}

fn convert(m: fontdue::Metrics) -> GlyphMetrics {
    GlyphMetrics {
        xmin: m.xmin,
        ymin: m.ymin,
        width: m.width as u32,
        height: m.height as u32,
        advance: m.advance_width,
    }
}

impl FontFace for OutlineFace {
    fn size(&self) -> f32 {
        self.px
    }

    fn metrics(&self, ch: char) -> GlyphMetrics {
        convert(self.font.metrics(ch, self.px))
    }

    fn rasterize(&self, ch: char) -> (GlyphMetrics, Vec<u8>) {
        let (m, bitmap) = self.font.rasterize(ch, self.px);
        (convert(m), bitmap)
    }
}
