//! Image geometry and pixel operations, pure Rust via the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Cover crop** | `imageops::resize` (Lanczos3) + `crop_imm` |
//! | **Scaled placement** | `imageops::resize` + `imageops::overlay` |
//! | **Rounded pill** | supersampled coverage + `Pixel::blend` |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for placement math (unit testable)
//! - **Parameters**: Value types describing anchors, corners, focus and colors
//! - **Operations**: Pixel work combining calculations with the `image` crate

pub mod calculations;
pub mod operations;
pub mod params;

pub use operations::{
    ImagingError, Placement, cover_crop, fill_rounded_rect, flatten, load_rgba, paste,
    place_scaled, resize_exact, save_png,
};
pub use params::{Anchor, Corner, Focus, HAlign, Rgb, TextPosition, VAlign};
