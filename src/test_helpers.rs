//! Shared test utilities for the adcraft test suite.
//!
//! Provides image builders, brief/brand fixtures written to temp
//! directories, and a recording background provider.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let brief = sample_brief(&["tent", "boots"], "us_rockies");
//! write_product_images(tmp.path(), &brief);
//!
//! let provider = RecordingProvider::new();
//! // ... render ...
//! assert_eq!(provider.requests(), vec!["us_rockies", "us_rockies"]);
//! ```

use std::path::Path;
use std::sync::Mutex;

use image::{Rgba, RgbaImage};

use crate::background::{BackgroundProvider, ProviderError, Region, RegionCatalog, synthesize};
use crate::brief::{CampaignBrief, OverlayStyle, Product};
use crate::imaging::{Corner, Rgb, TextPosition};

// =========================================================================
// Image builders
// =========================================================================

/// A single-color RGBA image.
pub fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// A black/white checkerboard with square cells of `cell` pixels.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
}

/// A product cut-out: an opaque colored block on a transparent canvas.
pub fn product_cutout(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= width / 4 && x < width * 3 / 4 && y >= height / 8;
        if inside {
            Rgba([180, 60, 20, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

// =========================================================================
// Brief / brand fixtures
// =========================================================================

/// A brief named "Test Campaign" with one product per id, each pointing at
/// `products/{id}.png`.
pub fn sample_brief(ids: &[&str], region: &str) -> CampaignBrief {
    CampaignBrief {
        campaign_name: "Test Campaign".to_string(),
        products: ids
            .iter()
            .map(|id| Product {
                id: id.to_string(),
                name: format!("Product {id}"),
                description: String::new(),
                image_path: format!("products/{id}.png"),
            })
            .collect(),
        target_region: region.to_string(),
        target_audience: "Testers".to_string(),
        campaign_message: "Conquer Every Trail".to_string(),
    }
}

/// Write a product cut-out PNG for every product of `brief` under `root`.
pub fn write_product_images(root: &Path, brief: &CampaignBrief) {
    for product in &brief.products {
        let path = root.join(&product.image_path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        product_cutout(120, 200).save(&path).unwrap();
    }
}

/// Overlay style matching the brand defaults: white text on a 75% black
/// pill at the top-left, no logo, no CTA button.
pub fn overlay_style() -> OverlayStyle {
    OverlayStyle {
        text_color: Rgb::WHITE,
        pill_color: Rgb::BLACK,
        pill_opacity: 0.75,
        headline_font: "Arial".to_string(),
        text_position: TextPosition::default(),
        safe_margin_percent: 5.0,
        logo: None,
        logo_position: Corner::BottomRight,
        logo_max_width_percent: 15.0,
        cta_button: None,
    }
}

// =========================================================================
// Recording provider
// =========================================================================

/// A provider that records requested keys and serves small synthetic
/// backgrounds, or fails every fetch.
pub struct RecordingProvider {
    catalog: RegionCatalog,
    requests: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self {
            catalog: RegionCatalog::default(),
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Keys passed to [`BackgroundProvider::fetch`], in call order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl BackgroundProvider for RecordingProvider {
    fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    fn fetch_region(&self, region: &Region) -> Result<RgbaImage, ProviderError> {
        if self.fail {
            return Err(ProviderError::NotFound {
                region: region.key.clone(),
                dir: "recording".into(),
            });
        }
        Ok(synthesize(&region.key, (179, 102)))
    }

    fn fetch(&self, key: &str) -> Result<RgbaImage, ProviderError> {
        self.requests.lock().unwrap().push(key.to_string());
        let region = self.catalog.resolve(key)?;
        self.fetch_region(region)
    }
}
