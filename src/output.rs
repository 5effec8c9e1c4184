//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Render
//!
//! Progress lines stream while products render, then a summary:
//!
//! ```text
//! [1/4]  25% Fetched us_rockies background for Trail Pack
//! [2/4]  50% Rendered Trail Pack 1x1 (1080x1080)
//! ...
//! Trail Season 2026 → output/trail-season-2026_us_rockies
//! 001 trail-pack
//!     1x1: output/trail-season-2026_us_rockies/trail-pack/1x1.png
//!     9x16: output/trail-season-2026_us_rockies/trail-pack/9x16.png
//!     16x9: output/trail-season-2026_us_rockies/trail-pack/16x9.png
//! Generated 3 creatives for 1 product
//!     Log: output/trail-season-2026_us_rockies/generation_log.json
//! ```
//!
//! ## Check
//!
//! ```text
//! Brief: Trail Season 2026
//!     Region: us_rockies (US Rockies)
//!     Message: Conquer Every Trail
//! 001 trail-pack Trail Pack 30L
//!     Image: assets/products/trail-pack.png
//! Brand: Summit Gear
//!     Font: Montserrat-Bold (/Library/Fonts/Montserrat-Bold.ttf)
//!     Logo: assets/logo.png
//!     CTA button: assets/cta-button.png (unusable, will be skipped)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure; the `check` formatter takes file existence as input
//! rather than probing the filesystem.

use crate::background::RegionCatalog;
use crate::brief::{BrandConfig, CampaignBrief};
use crate::formats::ASPECT_RATIOS;
use crate::render::{ProgressEvent, RenderResult};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Path with an optional `(missing...)` marker.
fn path_status(path: &Path, exists: bool, missing_note: &str) -> String {
    if exists {
        path.display().to_string()
    } else {
        format!("{} ({missing_note})", path.display())
    }
}

// ============================================================================
// Render
// ============================================================================

/// One progress line: step counter, whole percent (rounded down), message.
pub fn format_progress_event(event: &ProgressEvent) -> Vec<String> {
    let percent = if event.total == 0 {
        100
    } else {
        event.step * 100 / event.total
    };
    vec![format!(
        "[{}/{}] {:>3}% {}",
        event.step, event.total, percent, event.message
    )]
}

pub fn format_render_summary(campaign_name: &str, result: &RenderResult) -> Vec<String> {
    let mut lines = vec![format!(
        "{} → {}",
        campaign_name,
        result.campaign_dir.display()
    )];
    for (i, product) in result.products.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), product.id));
        for (ratio, path) in ASPECT_RATIOS.iter().zip(&product.files) {
            lines.push(format!("{}{}: {}", indent(1), ratio.name, path.display()));
        }
    }
    lines.push(format!(
        "Generated {} for {}",
        plural(result.file_count(), "creative"),
        plural(result.products.len(), "product")
    ));
    lines.push(format!("{}Log: {}", indent(1), result.manifest_path.display()));
    lines
}

pub fn print_render_summary(campaign_name: &str, result: &RenderResult) {
    for line in format_render_summary(campaign_name, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Resolved inputs shown by the `check` command.
pub struct CheckReport<'a> {
    pub brief: &'a CampaignBrief,
    pub brand: &'a BrandConfig,
    pub catalog: &'a RegionCatalog,
    /// Resolved product image paths with existence, in brief order.
    pub product_images: Vec<(&'a Path, bool)>,
    pub font: String,
    /// Configured logo and whether it loaded.
    pub logo: Option<(&'a Path, bool)>,
    /// Configured CTA button and whether it loaded.
    pub cta_button: Option<(&'a Path, bool)>,
}

pub fn format_check(report: &CheckReport<'_>) -> Vec<String> {
    let brief = report.brief;
    let mut lines = vec![format!("Brief: {}", brief.campaign_name)];

    let region = match report.catalog.get(&brief.target_region) {
        Some(region) => format!("{} ({})", brief.target_region, region.label),
        None => match report.catalog.regions().first() {
            Some(fallback) => format!(
                "{} (unknown, falls back to {})",
                brief.target_region, fallback.key
            ),
            None => format!("{} (unknown)", brief.target_region),
        },
    };
    lines.push(format!("{}Region: {}", indent(1), region));
    lines.push(format!("{}Message: {}", indent(1), brief.campaign_message));

    for (i, product) in brief.products.iter().enumerate() {
        lines.push(format!("{} {} {}", format_index(i + 1), product.id, product.name));
        if let Some((path, exists)) = report.product_images.get(i) {
            lines.push(format!(
                "{}Image: {}",
                indent(1),
                path_status(path, *exists, "missing")
            ));
        }
    }

    lines.push(format!("Brand: {}", report.brand.brand_name));
    lines.push(format!("{}Font: {}", indent(1), report.font));
    let optional = |label: &str, entry: Option<(&Path, bool)>| match entry {
        Some((path, exists)) => format!(
            "{}{}: {}",
            indent(1),
            label,
            path_status(path, exists, "unusable, will be skipped")
        ),
        None => format!("{}{}: none", indent(1), label),
    };
    lines.push(optional("Logo", report.logo));
    lines.push(optional("CTA button", report.cta_button));
    lines
}

pub fn print_check(report: &CheckReport<'_>) {
    for line in format_check(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Regions / formats
// ============================================================================

/// One line per region; the first is marked as the fallback.
pub fn format_regions(catalog: &RegionCatalog) -> Vec<String> {
    let width = catalog
        .regions()
        .iter()
        .map(|r| r.key.len())
        .max()
        .unwrap_or(0);
    catalog
        .regions()
        .iter()
        .enumerate()
        .flat_map(|(i, region)| {
            let marker = if i == 0 { " (default)" } else { "" };
            [
                format!("{:<width$}  {}{}", region.key, region.label, marker),
                format!("{}{}", indent(1), region.scene),
            ]
        })
        .collect()
}

pub fn print_regions(catalog: &RegionCatalog) {
    for line in format_regions(catalog) {
        println!("{}", line);
    }
}

pub fn format_formats() -> Vec<String> {
    ASPECT_RATIOS
        .iter()
        .map(|r| {
            format!(
                "{:<5} {:>4}x{:<4} {}",
                r.name, r.width, r.height, r.use_case
            )
        })
        .collect()
}

pub fn print_formats() {
    for line in format_formats() {
        println!("{}", line);
    }
}
