//! Brand overlay: headline pill, CTA button and logo.
//!
//! Layers are drawn in a fixed order, each on top of the previous:
//!
//! 1. **Headline**: the campaign message, uppercased, in a translucent
//!    rounded pill. Font size is `6.5%` of the shorter image side; lines
//!    wrap at `text.max_width_percent` of the image width.
//! 2. **CTA button**: centered horizontally just below where the product
//!    is estimated to end (`70%` of the height, plus `3%` spacing), kept
//!    above a `5%` bottom margin. Width capped per aspect ratio.
//! 3. **Logo**: in the configured corner, inset by the safe margin. Width
//!    capped at the smaller of the per-ratio cap and the brand's
//!    `logo_max_width_percent`.
//!
//! The button and logo are only ever scaled down. A missing or unreadable
//! button or logo is skipped with a warning; the image is still produced.

use crate::brief::OverlayStyle;
use crate::fonts::ResolvedFont;
use crate::formats::{cta_width_percent, logo_width_percent};
use crate::imaging::calculations::{
    corner_position, cta_position, estimated_product_bottom, fit_width, fraction_of, percent_of,
};
use crate::imaging::params::opacity_to_alpha;
use crate::imaging::{ImagingError, load_rgba, paste, resize_exact};
use crate::text::{draw_pill, layout_text, place_pill};
use image::RgbaImage;
use std::path::Path;

/// Headline font size as a fraction of the shorter image side.
pub const FONT_SIZE_FRACTION: f64 = 0.065;

/// Everything needed to brand an image, loaded once per run.
pub struct Overlay {
    style: OverlayStyle,
    font: ResolvedFont,
    text_max_width_percent: f64,
    cta_button: Option<RgbaImage>,
    logo: Option<RgbaImage>,
}

/// Load an optional image, warning instead of failing when it is unusable.
fn load_optional(path: Option<&Path>, what: &str) -> Option<RgbaImage> {
    let path = path?;
    if !path.exists() {
        tracing::warn!(path = %path.display(), "{what} not found, skipping");
        return None;
    }
    match load_rgba(path) {
        Ok(image) if image.width() > 0 && image.height() > 0 => Some(image),
        Ok(_) => {
            tracing::warn!(path = %path.display(), "{what} is empty, skipping");
            None
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "{what} unreadable, skipping: {err}");
            None
        }
    }
}

impl Overlay {
    /// Build an overlay, loading the CTA button and logo named by `style`.
    pub fn load(style: OverlayStyle, font: ResolvedFont, text_max_width_percent: f64) -> Self {
        let cta_button = load_optional(style.cta_button.as_deref(), "CTA button");
        let logo = load_optional(style.logo.as_deref(), "logo");
        Self::with_images(style, font, text_max_width_percent, cta_button, logo)
    }

    /// Build an overlay from already-decoded images.
    pub fn with_images(
        style: OverlayStyle,
        font: ResolvedFont,
        text_max_width_percent: f64,
        cta_button: Option<RgbaImage>,
        logo: Option<RgbaImage>,
    ) -> Self {
        Self {
            style,
            font,
            text_max_width_percent,
            cta_button,
            logo,
        }
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    pub fn font(&self) -> &ResolvedFont {
        &self.font
    }

    pub fn has_cta_button(&self) -> bool {
        self.cta_button.is_some()
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Brand `image` in place for the aspect ratio called `ratio`.
    pub fn apply(&self, image: &mut RgbaImage, message: &str, ratio: &str) -> Result<(), ImagingError> {
        self.draw_headline(image, message);
        if let Some(button) = &self.cta_button {
            self.draw_cta(image, button, ratio)?;
        }
        if let Some(logo) = &self.logo {
            self.draw_logo(image, logo, ratio)?;
        }
        Ok(())
    }

    fn draw_headline(&self, image: &mut RgbaImage, message: &str) {
        let text = message.trim().to_uppercase();
        if text.is_empty() {
            return;
        }
        let (w, h) = image.dimensions();
        let px = fraction_of(w.min(h), FONT_SIZE_FRACTION).max(1) as f32;
        let face = self.font.face(px);
        let max_width = percent_of(w, self.text_max_width_percent);
        let layout = layout_text(&text, face.as_ref(), max_width);
        let origin = place_pill(
            (w, h),
            layout.size(),
            self.style.text_position,
            self.style.safe_margin_percent,
        );
        let background = self
            .style
            .pill_color
            .with_alpha(opacity_to_alpha(self.style.pill_opacity));
        draw_pill(image, &layout, origin, face.as_ref(), background, self.style.text_color);
    }

    fn draw_cta(&self, image: &mut RgbaImage, button: &RgbaImage, ratio: &str) -> Result<(), ImagingError> {
        let (w, h) = image.dimensions();
        let max_width = percent_of(w, cta_width_percent(ratio));
        let size = fit_width(button.dimensions(), max_width);
        let scaled = resize_exact(button, size.0, size.1)?;
        let (x, y) = cta_position((w, h), size, estimated_product_bottom(h));
        paste(image, &scaled, x, y);
        Ok(())
    }

    fn draw_logo(&self, image: &mut RgbaImage, logo: &RgbaImage, ratio: &str) -> Result<(), ImagingError> {
        let (w, h) = image.dimensions();
        let cap = logo_width_percent(ratio).min(self.style.logo_max_width_percent);
        let size = fit_width(logo.dimensions(), percent_of(w, cap));
        let scaled = resize_exact(logo, size.0, size.1)?;
        let (x, y) = corner_position(
            (w, h),
            size,
            self.style.logo_position,
            self.style.safe_margin_percent,
        );
        paste(image, &scaled, x, y);
        Ok(())
    }
}
