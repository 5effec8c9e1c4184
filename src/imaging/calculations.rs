//! Pure calculation functions for placement geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! Sizes are `(width, height)` tuples, positions are top-left `(x, y)`.
//! Fractional results are truncated toward zero, matching integer pixel
//! placement everywhere else in the pipeline.

use super::params::{Anchor, Corner, Focus, HAlign, TextPosition, VAlign};

/// Fraction of the container height kept free below bottom-anchored overlays.
const BOTTOM_OFFSET: f64 = 0.08;
/// Fraction of the container width kept free beside side-anchored overlays.
const SIDE_OFFSET: f64 = 0.10;

/// Estimated product bottom edge as a fraction of image height.
pub const PRODUCT_BOTTOM_ESTIMATE: f64 = 0.70;
/// Gap between the product and the CTA button, as a fraction of image height.
pub const CTA_SPACING: f64 = 0.03;
/// The CTA button never renders below this fraction of the height from the bottom.
pub const CTA_BOTTOM_MARGIN: f64 = 0.05;

/// `length * fraction`, truncated.
pub fn fraction_of(length: u32, fraction: f64) -> u32 {
    (length as f64 * fraction) as u32
}

/// `length * percent / 100`, truncated.
pub fn percent_of(length: u32, percent: f64) -> u32 {
    (length as f64 * percent / 100.0) as u32
}

/// Calculate dimensions that completely cover a target area.
///
/// The source is scaled uniformly: a relatively wider source matches the
/// target height (and overflows horizontally), otherwise it matches the
/// target width (and overflows vertically). The result is never smaller than
/// the target on either axis, so the crop that follows is always in bounds.
///
/// # Examples
/// ```
/// # use adcraft::imaging::calculations::cover_dimensions;
/// // 1792x1024 landscape into a 1080x1080 square: height matches
/// assert_eq!(cover_dimensions((1792, 1024), (1080, 1080)), (1890, 1080));
/// ```
pub fn cover_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = (source.0.max(1) as u64, source.1.max(1) as u64);
    let (tgt_w, tgt_h) = (target.0 as u64, target.1 as u64);

    if src_w * tgt_h > tgt_w * src_h {
        // Source is wider: height matches, width overflows
        let w = (src_w * tgt_h / src_h).max(tgt_w);
        (w as u32, target.1)
    } else {
        // Source is taller (or equal): width matches, height overflows
        let h = (src_h * tgt_w / src_w).max(tgt_h);
        (target.0, h as u32)
    }
}

/// Top-left corner of the crop window inside a cover-scaled image.
///
/// Horizontal offset is always centered; vertical offset follows `focus`.
pub fn crop_origin(scaled: (u32, u32), target: (u32, u32), focus: Focus) -> (u32, u32) {
    let extra_w = scaled.0.saturating_sub(target.0);
    let extra_h = scaled.1.saturating_sub(target.1);
    let y = match focus {
        Focus::Top => 0,
        Focus::Bottom => extra_h,
        Focus::Center => extra_h / 2,
    };
    (extra_w / 2, y)
}

/// Size of an overlay scaled to a fraction of the container width, capped by
/// a fraction of the container height.
///
/// The width-derived size is tried first; when its height exceeds the cap the
/// size is re-derived from the height cap instead. Aspect ratio is preserved
/// in both cases. Both dimensions are at least one pixel.
pub fn scaled_overlay_size(
    container: (u32, u32),
    overlay: (u32, u32),
    width_fraction: f64,
    max_height_fraction: f64,
) -> (u32, u32) {
    let (ow, oh) = (overlay.0.max(1) as f64, overlay.1.max(1) as f64);

    let mut width = fraction_of(container.0, width_fraction);
    let mut height = (oh * (width as f64 / ow)) as u32;

    let max_height = fraction_of(container.1, max_height_fraction);
    if height > max_height {
        height = max_height;
        width = (ow * (max_height as f64 / oh)) as u32;
    }

    (width.max(1), height.max(1))
}

/// Downscale `size` so its width does not exceed `max_width`.
///
/// Images already narrow enough are returned unchanged; this never upscales.
pub fn fit_width(size: (u32, u32), max_width: u32) -> (u32, u32) {
    let (w, h) = size;
    if w <= max_width || w == 0 {
        return size;
    }
    let scale = max_width as f64 / w as f64;
    (max_width.max(1), ((h as f64 * scale) as u32).max(1))
}

/// Clamp a position along one axis into `[0, extent - size]`.
fn clamp_inside(pos: i64, size: u32, extent: u32) -> u32 {
    let hi = (extent as i64 - size as i64).max(0);
    pos.clamp(0, hi) as u32
}

/// Clamp a position along one axis so the box keeps `margin` from both edges.
///
/// When the box plus both margins does not fit, the leading margin wins.
fn clamp_between_margins(pos: i64, size: u32, extent: u32, margin: u32) -> u32 {
    let lo = margin as i64;
    let hi = extent as i64 - size as i64 - margin as i64;
    pos.min(hi).max(lo) as u32
}

/// Position of an overlay of `size` placed at `anchor` inside `container`.
///
/// The result always keeps the overlay inside the container when the overlay
/// fits; see [`Anchor`] for the per-anchor formulas.
pub fn anchor_position(container: (u32, u32), size: (u32, u32), anchor: Anchor) -> (u32, u32) {
    let (cw, ch) = (container.0 as i64, container.1 as i64);
    let (w, h) = (size.0 as i64, size.1 as i64);
    let bottom_y = ch - h - fraction_of(container.1, BOTTOM_OFFSET) as i64;
    let side = fraction_of(container.0, SIDE_OFFSET) as i64;
    let centered_x = (cw - w).div_euclid(2);

    let (x, y) = match anchor {
        Anchor::Center => (centered_x, (ch - h).div_euclid(2)),
        Anchor::CenterBottom => (centered_x, bottom_y),
        Anchor::Left => (side, bottom_y),
        Anchor::Right => (cw - w - side, bottom_y),
    };

    (
        clamp_inside(x, size.0, container.0),
        clamp_inside(y, size.1, container.1),
    )
}

/// Position of the text pill inside the safe-margin frame.
///
/// Margins are `margin_percent` of the container width (x) and height (y).
/// The result is clamped so the pill never crosses a margin line; a pill too
/// large for the frame is pinned to the leading margin.
pub fn pill_origin(
    container: (u32, u32),
    pill: (u32, u32),
    position: TextPosition,
    margin_percent: f64,
) -> (u32, u32) {
    let (cw, ch) = (container.0 as i64, container.1 as i64);
    let (w, h) = (pill.0 as i64, pill.1 as i64);
    let mx = percent_of(container.0, margin_percent);
    let my = percent_of(container.1, margin_percent);

    let x = match position.horizontal {
        HAlign::Left => mx as i64,
        HAlign::Right => cw - w - mx as i64,
        HAlign::Center => (cw - w).div_euclid(2),
    };
    let y = match position.vertical {
        VAlign::Top => my as i64,
        VAlign::Bottom => ch - h - my as i64,
        VAlign::Center => (ch - h).div_euclid(2),
    };

    (
        clamp_between_margins(x, pill.0, container.0, mx),
        clamp_between_margins(y, pill.1, container.1, my),
    )
}

/// Position of a logo of `size` in `corner`, inset by `margin_percent`.
pub fn corner_position(
    container: (u32, u32),
    size: (u32, u32),
    corner: Corner,
    margin_percent: f64,
) -> (u32, u32) {
    let mx = percent_of(container.0, margin_percent);
    let my = percent_of(container.1, margin_percent);

    let x = if corner.is_left() {
        mx
    } else {
        container.0.saturating_sub(size.0).saturating_sub(mx)
    };
    let y = if corner.is_top() {
        my
    } else {
        container.1.saturating_sub(size.1).saturating_sub(my)
    };
    (x, y)
}

/// Estimated y of the composited product's bottom edge.
pub fn estimated_product_bottom(height: u32) -> u32 {
    fraction_of(height, PRODUCT_BOTTOM_ESTIMATE)
}

/// Position of the CTA button: horizontally centered, just below
/// `product_bottom`, but never lower than the bottom margin allows.
pub fn cta_position(container: (u32, u32), button: (u32, u32), product_bottom: u32) -> (u32, u32) {
    let (cw, ch) = container;
    let x = cw.saturating_sub(button.0) / 2;
    let y = product_bottom + fraction_of(ch, CTA_SPACING);
    let max_y = ch
        .saturating_sub(fraction_of(ch, CTA_BOTTOM_MARGIN))
        .saturating_sub(button.1);
    (x, y.min(max_y))
}
