//! Background sources.
//!
//! The renderer asks a [`BackgroundProvider`] for one landscape image per
//! product. Providers own a [`RegionCatalog`]: the ordered set of region
//! keys they know how to serve. Unknown keys resolve to the catalog's first
//! region with a warning instead of failing.
//!
//! | Provider | Source |
//! |---|---|
//! | [`DirectoryProvider`] | `{dir}/{region}.{png,jpg,jpeg,webp}` |
//! | [`SyntheticProvider`] | Deterministic landscape gradient seeded from the region key |
//!
//! Tests substitute their own providers through the same trait.

use crate::imaging::{ImagingError, load_rgba};
use crate::naming::region_slug;
use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("No background for region '{region}' in {dir}")]
    NotFound { region: String, dir: PathBuf },
    #[error("Background image error: {0}")]
    Image(#[from] ImagingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Region catalog is empty")]
    EmptyCatalog,
}

/// A region a provider can serve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    /// Lookup key, as used in briefs (`us_rockies`).
    pub key: String,
    /// Display name.
    pub label: String,
    /// Scene descriptor: what a background for this region shows.
    pub scene: String,
}

const BUILTIN_REGIONS: &[(&str, &str, &str)] = &[
    (
        "us_pacific_northwest",
        "US Pacific Northwest",
        "misty forest trail, moss-covered trees and ferns, soft diffused light",
    ),
    (
        "us_southwest",
        "US Southwest",
        "desert trail, red rock formations and sandstone cliffs, golden hour",
    ),
    (
        "us_northeast",
        "US Northeast",
        "autumn hardwood forest trail, red and orange foliage, warm afternoon sun",
    ),
    (
        "us_rockies",
        "US Rockies",
        "alpine meadow with wildflowers below dramatic peaks, crisp mountain light",
    ),
    (
        "us_midwest",
        "US Midwest",
        "rolling prairie and oak woodland, gentle hills under a wide open sky",
    ),
    (
        "alps_europe",
        "European Alps",
        "high alpine peaks above green valleys, rocky paths, high-altitude light",
    ),
    (
        "scandinavia",
        "Scandinavia",
        "pine forest and rocky fjord landscape, cool soft daylight",
    ),
    (
        "patagonia",
        "Patagonia",
        "windswept plains, jagged peaks and glacial valleys, moody light",
    ),
    (
        "new_zealand",
        "New Zealand",
        "lush green mountains and rolling hills, clean daylight",
    ),
    (
        "japan_alps",
        "Japan Alps",
        "forested mountain slopes and rocky paths, misty morning light",
    ),
];

/// Ordered region table. The first entry is the fallback for unknown keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCatalog {
    regions: Vec<Region>,
}

impl Default for RegionCatalog {
    fn default() -> Self {
        Self::new(
            BUILTIN_REGIONS
                .iter()
                .map(|(key, label, scene)| Region {
                    key: key.to_string(),
                    label: label.to_string(),
                    scene: scene.to_string(),
                })
                .collect(),
        )
    }
}

impl RegionCatalog {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Exact lookup. Keys are compared after slugging (`"Japan Alps"` finds `japan_alps`).
    pub fn get(&self, key: &str) -> Option<&Region> {
        let wanted = region_slug(key);
        self.regions.iter().find(|r| r.key == wanted)
    }

    /// Look up `key`, falling back to the first region when it is unknown.
    pub fn resolve(&self, key: &str) -> Result<&Region, ProviderError> {
        if let Some(region) = self.get(key) {
            return Ok(region);
        }
        let fallback = self.regions.first().ok_or(ProviderError::EmptyCatalog)?;
        tracing::warn!(
            requested = key,
            fallback = %fallback.key,
            "unknown region, using fallback"
        );
        Ok(fallback)
    }
}

/// Supplies one background image per request.
pub trait BackgroundProvider: Sync {
    /// Regions this provider serves.
    fn catalog(&self) -> &RegionCatalog;

    /// Produce a background for an already-resolved region.
    fn fetch_region(&self, region: &Region) -> Result<RgbaImage, ProviderError>;

    /// Resolve `key` against the catalog (with fallback) and fetch it.
    fn fetch(&self, key: &str) -> Result<RgbaImage, ProviderError> {
        let region = self.catalog().resolve(key)?;
        self.fetch_region(region)
    }
}

/// Serves pre-made images from a directory, one file per region key.
#[derive(Debug, Clone)]
pub struct DirectoryProvider {
    dir: PathBuf,
    catalog: RegionCatalog,
}

const BACKGROUND_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp"];

impl DirectoryProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_catalog(dir, RegionCatalog::default())
    }

    pub fn with_catalog(dir: impl Into<PathBuf>, catalog: RegionCatalog) -> Self {
        Self {
            dir: dir.into(),
            catalog,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn find_file(&self, key: &str) -> Option<PathBuf> {
        BACKGROUND_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{key}.{ext}")))
            .find(|p| p.is_file())
    }
}

impl BackgroundProvider for DirectoryProvider {
    fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    fn fetch_region(&self, region: &Region) -> Result<RgbaImage, ProviderError> {
        let path = self
            .find_file(&region.key)
            .ok_or_else(|| ProviderError::NotFound {
                region: region.key.clone(),
                dir: self.dir.clone(),
            })?;
        tracing::debug!(region = %region.key, path = %path.display(), "loading background");
        Ok(load_rgba(&path)?)
    }
}

/// Size of synthesised backgrounds (a wide landscape, like generated ones).
pub const SYNTHETIC_SIZE: (u32, u32) = (1792, 1024);

/// Generates a deterministic landscape per region: a sky gradient above a
/// ridge line above a ground gradient, with colors and ridge shape derived
/// from the SHA-256 of the region key.
#[derive(Debug, Clone)]
pub struct SyntheticProvider {
    catalog: RegionCatalog,
    size: (u32, u32),
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self::new(RegionCatalog::default(), SYNTHETIC_SIZE)
    }
}

impl SyntheticProvider {
    pub fn new(catalog: RegionCatalog, size: (u32, u32)) -> Self {
        Self { catalog, size }
    }
}

impl BackgroundProvider for SyntheticProvider {
    fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    fn fetch_region(&self, region: &Region) -> Result<RgbaImage, ProviderError> {
        let (w, h) = self.size;
        if w == 0 || h == 0 {
            return Err(ImagingError::EmptyImage {
                width: w,
                height: h,
            }
            .into());
        }
        tracing::debug!(region = %region.key, "synthesising background");
        Ok(synthesize(&region.key, self.size))
    }
}

fn lerp(a: [f32; 3], b: [f32; 3], t: f32) -> Rgba<u8> {
    let t = t.clamp(0.0, 1.0);
    let channel = |i: usize| (a[i] + (b[i] - a[i]) * t).round().clamp(0.0, 255.0) as u8;
    Rgba([channel(0), channel(1), channel(2), 255])
}

/// Render the synthetic landscape for `key`.
pub fn synthesize(key: &str, (width, height): (u32, u32)) -> RgbaImage {
    let digest = Sha256::digest(key.as_bytes());
    let b = |i: usize| digest[i] as f32 / 255.0;

    let sky_top = [30.0 + 60.0 * b(0), 80.0 + 70.0 * b(1), 150.0 + 90.0 * b(2)];
    let sky_low = [190.0 + 50.0 * b(3), 190.0 + 50.0 * b(4), 200.0 + 50.0 * b(5)];
    let ridge = [40.0 + 70.0 * b(6), 60.0 + 80.0 * b(7), 50.0 + 60.0 * b(8)];
    let ground = [20.0 + 50.0 * b(9), 40.0 + 60.0 * b(10), 20.0 + 40.0 * b(11)];

    let h = height as f32;
    let horizon = h * (0.45 + 0.15 * b(12));
    let amplitude = h * (0.08 + 0.12 * b(13));
    let (f1, f2) = (1.0 + 3.0 * b(14), 4.0 + 6.0 * b(15));
    let (p1, p2) = (b(16) * TAU, b(17) * TAU);

    let ridge_line: Vec<f32> = (0..width)
        .map(|x| {
            let u = x as f32 / width as f32;
            let swell = 0.6 * (u * f1 * TAU + p1).sin().abs() + 0.4 * (u * f2 * TAU + p2).sin().abs();
            horizon - amplitude * swell
        })
        .collect();

    RgbaImage::from_fn(width, height, |x, y| {
        let top = ridge_line[x as usize];
        let y = y as f32;
        if y < top {
            lerp(sky_top, sky_low, y / top.max(1.0))
        } else {
            lerp(ridge, ground, (y - top) / (h - top).max(1.0))
        }
    })
}
