//! Campaign rendering: the per-product, per-aspect-ratio pipeline.
//!
//! For every product in the brief:
//!
//! ```text
//! load product image ─► fetch background ─┬─► 1x1:  cover crop ─► product ─► overlay ─► PNG
//!                                         ├─► 9x16: ...
//!                                         └─► 16x9: ...
//! ```
//!
//! then, once every product has succeeded, the generation log is written.
//!
//! ## Output Structure
//!
//! ```text
//! output/
//! └── trail-season-2026_us_rockies/
//!     ├── generation_log.json
//!     └── trail-pack/
//!         ├── 1x1.png
//!         ├── 9x16.png
//!         └── 16x9.png
//! ```
//!
//! ## Progress
//!
//! Each background fetch and each saved image is one step, so a run has
//! `products × (1 + ratios)` steps. Events are sent on an optional
//! channel with a strictly increasing step counter ending at the total.
//!
//! ## Parallel Processing
//!
//! Products are independent and render in parallel using
//! [rayon](https://docs.rs/rayon). Results and the log keep brief order.
//! The first failure aborts the run and no log is written.

use crate::background::{BackgroundProvider, ProviderError};
use crate::brief::{CampaignBrief, ConfigError, Product};
use crate::config::AssetsConfig;
use crate::formats::{ASPECT_RATIOS, AspectRatio, product_placement};
use crate::imaging::{
    Anchor, Focus, ImagingError, cover_crop, flatten, load_rgba, paste, place_scaled, save_png,
};
use crate::manifest::{GenerationLog, ManifestError};
use crate::naming::campaign_dir_name;
use crate::overlay::Overlay;
use chrono::Utc;
use image::{RgbImage, RgbaImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid brief: {0}")]
    Config(#[from] ConfigError),
    #[error("Background provider error: {0}")]
    Provider(#[from] ProviderError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] ImagingError),
    #[error("Product image for '{product}' not found: {path}")]
    ResourceNotFound { product: String, path: PathBuf },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Generation log error: {0}")]
    Manifest(#[from] ManifestError),
    #[error("Render cancelled")]
    Cancelled,
}

/// One completed step of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// 1-based step number.
    pub step: usize,
    pub total: usize,
    pub message: String,
}

impl ProgressEvent {
    /// Completed fraction in `(0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.step as f64 / self.total as f64
        }
    }
}

/// Number of progress steps for `product_count` products.
pub fn total_steps(product_count: usize) -> usize {
    product_count * (1 + ASPECT_RATIOS.len())
}

/// Serialises step counting and sending so events leave in step order even
/// when products render on several threads.
struct Progress {
    total: usize,
    state: Mutex<(usize, Option<Sender<ProgressEvent>>)>,
}

impl Progress {
    fn new(total: usize, sender: Option<Sender<ProgressEvent>>) -> Self {
        Self {
            total,
            state: Mutex::new((0, sender)),
        }
    }

    fn advance(&self, message: String) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.0 = (state.0 + 1).min(self.total);
        let event = ProgressEvent {
            step: state.0,
            total: self.total,
            message,
        };
        if let Some(tx) = &state.1 {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }
}

/// Run-level settings that are not part of the brief or brand.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Parent of the campaign directory.
    pub output_dir: PathBuf,
    /// Resolves relative product image paths.
    pub assets: AssetsConfig,
    /// Vertical focus for background crops.
    pub focus: Focus,
    /// Checked between steps; setting it stops the run with [`RenderError::Cancelled`].
    pub cancel: Option<Arc<AtomicBool>>,
}

impl RenderOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            assets: AssetsConfig::default(),
            focus: Focus::default(),
            cancel: None,
        }
    }

    fn check_cancelled(&self) -> Result<(), RenderError> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(RenderError::Cancelled),
            _ => Ok(()),
        }
    }
}

/// Files written for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutput {
    pub id: String,
    /// One per aspect ratio, in [`ASPECT_RATIOS`] order.
    pub files: Vec<PathBuf>,
}

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub campaign_dir: PathBuf,
    pub manifest_path: PathBuf,
    /// In brief order.
    pub products: Vec<ProductOutput>,
    pub log: GenerationLog,
}

impl RenderResult {
    pub fn files_for(&self, product_id: &str) -> Option<&[PathBuf]> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .map(|p| p.files.as_slice())
    }

    pub fn file_count(&self) -> usize {
        self.products.iter().map(|p| p.files.len()).sum()
    }
}

/// Composite one creative: crop the background, place the product, brand it.
pub fn compose(
    background: &RgbaImage,
    product: &RgbaImage,
    overlay: &Overlay,
    message: &str,
    ratio: &AspectRatio,
    focus: Focus,
) -> Result<RgbImage, ImagingError> {
    let mut canvas = cover_crop(background, ratio.width, ratio.height, focus)?;
    let placement = product_placement(ratio.name);
    let placed = place_scaled(
        ratio.size(),
        product,
        placement.width_fraction,
        placement.max_height_fraction,
        Anchor::Center,
    )?;
    paste(&mut canvas, &placed.image, placed.x, placed.y);
    overlay.apply(&mut canvas, message, ratio.name)?;
    Ok(flatten(canvas))
}

fn load_product_image(product: &Product, assets: &AssetsConfig) -> Result<RgbaImage, RenderError> {
    let path = assets.resolve(&product.image_path);
    if !path.is_file() {
        return Err(RenderError::ResourceNotFound {
            product: product.id.clone(),
            path,
        });
    }
    Ok(load_rgba(&path)?)
}

fn render_product(
    product: &Product,
    brief: &CampaignBrief,
    overlay: &Overlay,
    provider: &dyn BackgroundProvider,
    options: &RenderOptions,
    campaign_dir: &Path,
    progress: &Progress,
) -> Result<ProductOutput, RenderError> {
    options.check_cancelled()?;
    // Loaded ahead of the fetch so a missing product file fails before any
    // background work is spent on it.
    let product_image = load_product_image(product, &options.assets)?;
    let background = provider.fetch(&brief.target_region)?;
    progress.advance(format!(
        "Fetched {} background for {}",
        brief.target_region, product.name
    ));

    let product_dir = campaign_dir.join(&product.id);
    std::fs::create_dir_all(&product_dir)?;

    let mut files = Vec::with_capacity(ASPECT_RATIOS.len());
    for ratio in &ASPECT_RATIOS {
        options.check_cancelled()?;
        let image = compose(
            &background,
            &product_image,
            overlay,
            &brief.campaign_message,
            ratio,
            options.focus,
        )?;
        let path = product_dir.join(ratio.file_name());
        save_png(&image, &path)?;
        tracing::debug!(product = %product.id, ratio = ratio.name, path = %path.display(), "saved creative");
        progress.advance(format!(
            "Rendered {} {} ({}x{})",
            product.name, ratio.name, ratio.width, ratio.height
        ));
        files.push(path);
    }

    Ok(ProductOutput {
        id: product.id.clone(),
        files,
    })
}

/// Render every product of `brief` at every aspect ratio and write the log.
///
/// Fails on the first product that cannot be rendered; no log is written
/// in that case.
pub fn render_campaign(
    brief: &CampaignBrief,
    overlay: &Overlay,
    provider: &dyn BackgroundProvider,
    options: &RenderOptions,
    progress: Option<Sender<ProgressEvent>>,
) -> Result<RenderResult, RenderError> {
    brief.validate()?;
    options.check_cancelled()?;

    let campaign_dir = options
        .output_dir
        .join(campaign_dir_name(&brief.campaign_name, &brief.target_region));
    std::fs::create_dir_all(&campaign_dir)?;
    tracing::info!(
        campaign = %brief.campaign_name,
        region = %brief.target_region,
        products = brief.products.len(),
        dir = %campaign_dir.display(),
        "rendering campaign"
    );

    let progress = Progress::new(total_steps(brief.products.len()), progress);
    let products = brief
        .products
        .par_iter()
        .map(|product| {
            render_product(
                product,
                brief,
                overlay,
                provider,
                options,
                &campaign_dir,
                &progress,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let files: Vec<(String, Vec<PathBuf>)> = products
        .iter()
        .map(|p| (p.id.clone(), p.files.clone()))
        .collect();
    let mut log = GenerationLog::new(
        &brief.campaign_name,
        &brief.target_region,
        Utc::now(),
        &files,
    );
    log.compute_checksums()?;
    let manifest_path = log.write(&campaign_dir)?;
    tracing::info!(path = %manifest_path.display(), files = log.file_count(), "wrote generation log");

    Ok(RenderResult {
        campaign_dir,
        manifest_path,
        products,
        log,
    })
}
