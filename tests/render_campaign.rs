//! End-to-end campaign runs through the public API.

use adcraft::background::{DirectoryProvider, SyntheticProvider};
use adcraft::brief::{BrandConfig, CampaignBrief};
use adcraft::config::AssetsConfig;
use adcraft::fonts::ResolvedFont;
use adcraft::manifest::{GenerationLog, MANIFEST_FILE_NAME};
use adcraft::overlay::Overlay;
use adcraft::render::{ProgressEvent, RenderOptions, render_campaign};
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tempfile::TempDir;

fn brief(ids: &[&str], region: &str) -> CampaignBrief {
    let products: Vec<_> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("Product {id}"),
                "description": "Trail-tested",
                "product_image": format!("products/{id}.png"),
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({
        "campaign_name": "Fall Trails",
        "products": products,
        "target_region": region,
        "target_audience": "Weekend hikers",
        "campaign_message": "Conquer Every Trail",
    }))
    .unwrap()
}

fn brand() -> BrandConfig {
    serde_json::from_value(serde_json::json!({
        "brand_name": "Summit Gear",
        "colors": { "text_light": "#FFFFFF", "secondary": "#1A1A1A" },
        "typography": {},
        "logos": {},
    }))
    .unwrap()
}

fn assets(root: &Path) -> AssetsConfig {
    AssetsConfig {
        root: root.display().to_string(),
        cta_button: String::new(),
    }
}

/// Write a transparent cut-out with an opaque block for every product.
fn write_products(root: &Path, brief: &CampaignBrief) {
    for product in &brief.products {
        let path = root.join(&product.image_path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        let image = RgbaImage::from_fn(150, 240, |x, y| {
            if (30..120).contains(&x) && y >= 20 {
                Rgba([200, 90, 30, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        image.save(&path).unwrap();
    }
}

fn overlay(root: &Path) -> Overlay {
    let style = brand().overlay_style(&assets(root));
    Overlay::load(style, ResolvedFont::Basic, 70.0)
}

fn options(root: &Path) -> RenderOptions {
    let mut options = RenderOptions::new(root.join("output"));
    options.assets = assets(root);
    options
}

#[test]
fn single_product_renders_three_sized_files_and_lists_them() {
    let tmp = TempDir::new().unwrap();
    let brief = brief(&["trail-pack"], "us_rockies");
    write_products(tmp.path(), &brief);
    let provider = SyntheticProvider::default();

    let result = render_campaign(&brief, &overlay(tmp.path()), &provider, &options(tmp.path()), None)
        .unwrap();

    let files = result.files_for("trail-pack").unwrap();
    let expected = [
        ("1x1.png", (1080, 1080)),
        ("9x16.png", (1080, 1920)),
        ("16x9.png", (1920, 1080)),
    ];
    assert_eq!(files.len(), 3);
    for (path, (name, dims)) in files.iter().zip(expected) {
        assert_eq!(path.file_name().unwrap(), name);
        assert_eq!(image::image_dimensions(path).unwrap(), dims, "{name}");
    }

    let log = GenerationLog::load(&result.campaign_dir.join(MANIFEST_FILE_NAME)).unwrap();
    assert_eq!(log.products, vec!["trail-pack"]);
    assert_eq!(log.files.len(), 1);
    assert_eq!(log.files["trail-pack"], files.to_vec());
    assert_eq!(log.region, "us_rockies");
    assert_eq!(log.checksums.len(), 3);
}

#[test]
fn unknown_region_falls_back_to_first_catalog_entry() {
    let tmp = TempDir::new().unwrap();
    let backgrounds = tmp.path().join("backgrounds");
    std::fs::create_dir_all(&backgrounds).unwrap();
    RgbaImage::from_pixel(320, 180, Rgba([40, 110, 60, 255]))
        .save(backgrounds.join("us_pacific_northwest.png"))
        .unwrap();

    let brief = brief(&["boots"], "mars_valley");
    write_products(tmp.path(), &brief);
    let provider = DirectoryProvider::new(&backgrounds);

    let result = render_campaign(&brief, &overlay(tmp.path()), &provider, &options(tmp.path()), None)
        .unwrap();

    assert_eq!(result.file_count(), 3);
    assert!(result.campaign_dir.ends_with("fall-trails_mars_valley"));
    // The fallback background shows in the corner below the headline.
    let square = image::open(&result.files_for("boots").unwrap()[0])
        .unwrap()
        .to_rgb8();
    assert_eq!(square.get_pixel(5, 1075).0, [40, 110, 60]);
}

#[test]
fn progress_for_two_products_is_eight_increasing_steps() {
    let tmp = TempDir::new().unwrap();
    let brief = brief(&["tent", "stove"], "patagonia");
    write_products(tmp.path(), &brief);
    let (tx, rx) = mpsc::channel();

    render_campaign(
        &brief,
        &overlay(tmp.path()),
        &SyntheticProvider::default(),
        &options(tmp.path()),
        Some(tx),
    )
    .unwrap();

    let events: Vec<ProgressEvent> = rx.iter().collect();
    assert_eq!(events.len(), 8);
    let fractions: Vec<f64> = events.iter().map(ProgressEvent::fraction).collect();
    assert!(fractions.windows(2).all(|w| w[1] > w[0]), "{fractions:?}");
    assert!(fractions.iter().all(|f| *f <= 1.0));
    assert_eq!(*fractions.last().unwrap(), 1.0);
}

#[test]
fn missing_product_image_writes_no_log() {
    let tmp = TempDir::new().unwrap();
    let brief = brief(&["ghost"], "us_rockies");

    let err = render_campaign(
        &brief,
        &overlay(tmp.path()),
        &SyntheticProvider::default(),
        &options(tmp.path()),
        None,
    );

    assert!(err.is_err());
    let log: PathBuf = tmp
        .path()
        .join("output/fall-trails_us_rockies")
        .join(MANIFEST_FILE_NAME);
    assert!(!log.exists());
}
