//! Output formats: the fixed set of aspect ratios every product is rendered at.
//!
//! | Name | Size | Use case | Product (width, max height) | Logo cap | CTA cap |
//! |---|---|---|---|---|---|
//! | `1x1` | 1080×1080 | Instagram Feed, Facebook | 55%, 50% | 20% | 45% |
//! | `9x16` | 1080×1920 | Instagram Stories, TikTok, Reels | 75%, 40% | 20% | 55% |
//! | `16x9` | 1920×1080 | YouTube, Web Banners | 50%, 65% | 15% | 40% |
//!
//! Lookups by name accept any string; unknown names get the documented
//! defaults rather than an error.

use serde::Serialize;

/// A named target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AspectRatio {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
    pub use_case: &'static str,
}

impl AspectRatio {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Output file name for this ratio, e.g. `9x16.png`.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name)
    }
}

/// Every render produces these, in this order.
pub const ASPECT_RATIOS: [AspectRatio; 3] = [
    AspectRatio {
        name: "1x1",
        width: 1080,
        height: 1080,
        use_case: "Instagram Feed, Facebook",
    },
    AspectRatio {
        name: "9x16",
        width: 1080,
        height: 1920,
        use_case: "Instagram Stories, TikTok, Reels",
    },
    AspectRatio {
        name: "16x9",
        width: 1920,
        height: 1080,
        use_case: "YouTube, Web Banners",
    },
];

/// Product sizing within a canvas, as fractions of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductPlacement {
    /// Target product width as a fraction of canvas width.
    pub width_fraction: f64,
    /// Product height cap as a fraction of canvas height.
    pub max_height_fraction: f64,
}

pub fn product_placement(name: &str) -> ProductPlacement {
    let (width_fraction, max_height_fraction) = match name {
        "1x1" => (0.55, 0.50),
        "9x16" => (0.75, 0.40),
        "16x9" => (0.50, 0.65),
        _ => (0.40, 0.50),
    };
    ProductPlacement {
        width_fraction,
        max_height_fraction,
    }
}

/// Logo width cap for a ratio, in percent of canvas width.
pub fn logo_width_percent(name: &str) -> f64 {
    match name {
        "1x1" | "9x16" => 20.0,
        "16x9" => 15.0,
        _ => 20.0,
    }
}

/// CTA button width cap for a ratio, in percent of canvas width.
pub fn cta_width_percent(name: &str) -> f64 {
    match name {
        "9x16" => 55.0,
        "16x9" => 40.0,
        _ => 45.0,
    }
}
