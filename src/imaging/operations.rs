//! Pixel-level image operations.
//!
//! These functions combine the pure [`calculations`](super::calculations)
//! with the `image` crate. Every operation takes its inputs by reference and
//! returns new buffers or draws into a canvas passed as `&mut`; nothing here
//! touches global state.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode | `image::ImageReader` (PNG, JPEG, WebP) |
//! | Resize | `image::imageops::resize` with `Lanczos3` |
//! | Crop | `image::imageops::crop_imm` |
//! | Alpha composite | `image::imageops::overlay` (source-over per pixel) |
//! | Rounded rectangle | 4×4 supersampled coverage, blended per pixel |
//! | Flatten | `DynamicImage::into_rgb8` |

use super::calculations::{anchor_position, cover_dimensions, crop_origin, scaled_overlay_size};
use super::params::{Anchor, Focus};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Pixel, Rgba, RgbaImage, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to encode {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Zero-sized geometry: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, ImagingError>;

fn ensure_non_empty(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ImagingError::EmptyImage { width, height });
    }
    Ok(())
}

/// Load and decode an image from disk as RGBA.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let decoded = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()
        .map_err(|source| ImagingError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(decoded.into_rgba8())
}

/// Encode an opaque image as PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| ImagingError::Encode {
            path: path.to_path_buf(),
            source,
        })
}

/// Resize to exact dimensions with Lanczos3.
pub fn resize_exact(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    ensure_non_empty(image.width(), image.height())?;
    ensure_non_empty(width, height)?;
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }
    Ok(imageops::resize(image, width, height, FilterType::Lanczos3))
}

/// Scale `image` to cover `width × height`, then crop the overflow.
///
/// The output is always exactly the requested size. Horizontal crops are
/// centered; vertical crops follow `focus`.
pub fn cover_crop(image: &RgbaImage, width: u32, height: u32, focus: Focus) -> Result<RgbaImage> {
    ensure_non_empty(image.width(), image.height())?;
    ensure_non_empty(width, height)?;

    let (scaled_w, scaled_h) = cover_dimensions(image.dimensions(), (width, height));
    let scaled = resize_exact(image, scaled_w, scaled_h)?;
    let (x, y) = crop_origin((scaled_w, scaled_h), (width, height), focus);
    Ok(imageops::crop_imm(&scaled, x, y, width, height).to_image())
}

/// A scaled overlay together with where it goes in its container.
#[derive(Debug, Clone)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub image: RgbaImage,
}

/// Scale `overlay` relative to `container` and position it at `anchor`.
///
/// See [`scaled_overlay_size`] for the width/height-cap rule and
/// [`anchor_position`] for the per-anchor formulas.
pub fn place_scaled(
    container: (u32, u32),
    overlay: &RgbaImage,
    width_fraction: f64,
    max_height_fraction: f64,
    anchor: Anchor,
) -> Result<Placement> {
    ensure_non_empty(container.0, container.1)?;
    let size = scaled_overlay_size(
        container,
        overlay.dimensions(),
        width_fraction,
        max_height_fraction,
    );
    let image = resize_exact(overlay, size.0, size.1)?;
    let (x, y) = anchor_position(container, size, anchor);
    Ok(Placement { x, y, image })
}

/// Alpha-composite `top` onto `canvas` with its top-left corner at `(x, y)`.
pub fn paste(canvas: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    imageops::overlay(canvas, top, x as i64, y as i64);
}

/// Fraction of a pixel covered by a rounded rectangle, sampled on a 4×4 grid.
///
/// `(px, py)` is the pixel's top-left corner relative to the rectangle origin.
fn rounded_rect_coverage(px: u32, py: u32, width: f32, height: f32, radius: f32) -> f32 {
    const GRID: u32 = 4;
    let mut inside = 0u32;
    for sy in 0..GRID {
        for sx in 0..GRID {
            let x = px as f32 + (sx as f32 + 0.5) / GRID as f32;
            let y = py as f32 + (sy as f32 + 0.5) / GRID as f32;
            let cx = x.clamp(radius, width - radius);
            let cy = y.clamp(radius, height - radius);
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                inside += 1;
            }
        }
    }
    inside as f32 / (GRID * GRID) as f32
}

/// Fill a rounded rectangle, blending `color` (including its alpha) over the canvas.
///
/// Pixels outside the canvas are skipped. The radius is limited to half the
/// shorter side.
pub fn fill_rounded_rect(
    canvas: &mut RgbaImage,
    origin: (u32, u32),
    size: (u32, u32),
    radius: u32,
    color: Rgba<u8>,
) {
    let (w, h) = size;
    if w == 0 || h == 0 || color.0[3] == 0 {
        return;
    }
    let radius = radius.min(w / 2).min(h / 2);
    let (wf, hf, rf) = (w as f32, h as f32, radius as f32);

    for py in 0..h {
        let cy = origin.1 + py;
        if cy >= canvas.height() {
            break;
        }
        let in_corner_rows = py < radius || py + radius >= h;
        for px in 0..w {
            let cx = origin.0 + px;
            if cx >= canvas.width() {
                break;
            }
            let in_corner = in_corner_rows && (px < radius || px + radius >= w);
            let coverage = if in_corner {
                rounded_rect_coverage(px, py, wf, hf, rf)
            } else {
                1.0
            };
            if coverage <= 0.0 {
                continue;
            }
            let alpha = (color.0[3] as f32 * coverage).round() as u8;
            let mut src = color;
            src.0[3] = alpha;
            canvas.get_pixel_mut(cx, cy).blend(&src);
        }
    }
}

/// Drop the alpha channel for persistence as an opaque image.
pub fn flatten(image: RgbaImage) -> RgbImage {
    DynamicImage::ImageRgba8(image).into_rgb8()
}
