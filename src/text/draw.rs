//! Rasterising a laid-out pill onto an RGBA canvas.

use super::face::FontFace;
use super::pill::PillLayout;
use crate::imaging::{Rgb, fill_rounded_rect};
use image::{Pixel, Rgba, RgbaImage};

/// Blend one glyph's coverage bitmap in `color` with its top-left at `(left, top)`.
fn blend_coverage(
    canvas: &mut RgbaImage,
    left: i64,
    top: i64,
    (width, height): (u32, u32),
    coverage: &[u8],
    color: Rgb,
) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    for gy in 0..height as i64 {
        let y = top + gy;
        if y < 0 || y >= ch {
            continue;
        }
        for gx in 0..width as i64 {
            let x = left + gx;
            if x < 0 || x >= cw {
                continue;
            }
            let alpha = coverage[(gy * width as i64 + gx) as usize];
            if alpha == 0 {
                continue;
            }
            canvas
                .get_pixel_mut(x as u32, y as u32)
                .blend(&color.with_alpha(alpha));
        }
    }
}

/// Draw `text` with its pen start at `x` and baseline at `baseline`.
pub fn draw_line(
    canvas: &mut RgbaImage,
    face: &dyn FontFace,
    text: &str,
    x: i64,
    baseline: i64,
    color: Rgb,
) {
    let mut pen = x as f32;
    for ch in text.chars() {
        let (m, coverage) = face.rasterize(ch);
        if m.width > 0 && m.height > 0 {
            let left = pen.round() as i64 + m.xmin as i64;
            let top = baseline - (m.height as i64 + m.ymin as i64);
            blend_coverage(canvas, left, top, (m.width, m.height), &coverage, color);
        }
        pen += m.advance;
    }
}

/// Draw the pill background, then every line of text on top of it.
pub fn draw_pill(
    canvas: &mut RgbaImage,
    layout: &PillLayout,
    origin: (u32, u32),
    face: &dyn FontFace,
    background: Rgba<u8>,
    text_color: Rgb,
) {
    fill_rounded_rect(
        canvas,
        origin,
        layout.size(),
        layout.corner_radius,
        background,
    );
    for line in &layout.lines {
        draw_line(
            canvas,
            face,
            &line.text,
            origin.0 as i64 + line.x as i64,
            origin.1 as i64 + line.baseline as i64,
            text_color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::solid;
    use crate::text::basic::BasicFace;
    use crate::text::pill::layout_text;

    #[test]
    fn glyph_ink_sits_on_baseline() {
        let mut canvas = solid(40, 20, [0, 0, 0, 255]);
        draw_line(&mut canvas, &BasicFace::new(8.0), "I", 10, 15, Rgb::WHITE);
        // 'I' top bar spans cell columns 1..4 on the glyph's top row (y = 15 - 7).
        assert_eq!(canvas.get_pixel(11, 8).0, [255, 255, 255, 255]);
        assert_eq!(canvas.get_pixel(10, 8).0, [0, 0, 0, 255]);
        // Nothing drawn below the baseline.
        for x in 0..40 {
            assert_eq!(canvas.get_pixel(x, 15).0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn glyphs_off_canvas_are_clipped() {
        let mut canvas = solid(4, 4, [0, 0, 0, 255]);
        draw_line(&mut canvas, &BasicFace::new(8.0), "WIDE", -3, 2, Rgb::WHITE);
        draw_line(&mut canvas, &BasicFace::new(8.0), "WIDE", 100, 100, Rgb::WHITE);
    }

    #[test]
    fn pill_blends_background_with_opacity() {
        let face = BasicFace::new(8.0);
        let layout = layout_text("GO", &face, 1000);
        let mut canvas = solid(60, 40, [200, 200, 200, 255]);
        draw_pill(&mut canvas, &layout, (10, 10), &face, Rgb::BLACK.with_alpha(128), Rgb::WHITE);

        // Left padding column, clear of glyph ink and the rounded corners.
        let p = canvas.get_pixel(11, 10 + layout.height / 2).0;
        assert!(p[0] > 90 && p[0] < 110, "blended channel was {}", p[0]);
        // Outside the pill is untouched.
        assert_eq!(canvas.get_pixel(5, 5).0, [200, 200, 200, 255]);
    }

    #[test]
    fn pill_text_is_drawn_opaque() {
        let face = BasicFace::new(8.0);
        let layout = layout_text("I", &face, 1000);
        let mut canvas = solid(40, 40, [0, 0, 0, 255]);
        draw_pill(&mut canvas, &layout, (0, 0), &face, Rgb::BLACK.with_alpha(191), Rgb([255, 0, 255]));
        let line = &layout.lines[0];
        let top = (line.baseline - 7) as u32;
        assert_eq!(canvas.get_pixel(line.x + 1, top).0, [255, 0, 255, 255]);
    }
}
