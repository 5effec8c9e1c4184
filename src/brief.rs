//! Campaign brief and brand configuration.
//!
//! Both are JSON documents supplied per run. Keys are snake_case; the
//! camelCase spellings are accepted as aliases.
//!
//! ## Campaign brief
//!
//! ```json
//! {
//!   "campaign_name": "Trail Season 2026",
//!   "target_region": "us_rockies",
//!   "target_audience": "Weekend hikers, 25-45",
//!   "campaign_message": "Conquer Every Trail",
//!   "products": [
//!     { "id": "trail-pack", "name": "Trail Pack 30L",
//!       "description": "Lightweight daypack", "product_image": "assets/products/trail-pack.png" }
//!   ]
//! }
//! ```
//!
//! ## Brand config
//!
//! ```json
//! {
//!   "brand_name": "Summit Gear",
//!   "colors": { "primary": "#2D5016", "secondary": "#1A1A1A", "text_light": "#FFFFFF" },
//!   "typography": { "headline_font": "Montserrat-Bold" },
//!   "logos": { "primary": "assets/logo.png" },
//!   "layout_rules": { "logo_position": "bottom-right", "text_position": "top-left" }
//! }
//! ```
//!
//! Every field is required except `layout_rules` and its members, which
//! fall back to [`LayoutRules::default`]. Everything is validated at load time. After that the overlay only ever
//! sees the resolved [`OverlayStyle`]; no string-keyed lookups happen
//! during rendering.

use crate::config::AssetsConfig;
use crate::imaging::{Corner, Rgb, TextPosition};
use crate::naming::is_safe_component;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// A product featured in the campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique within the brief; also the product's output directory name.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Product image (RGBA PNG with transparency).
    #[serde(alias = "product_image", alias = "imagePath", alias = "productImage")]
    pub image_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignBrief {
    #[serde(alias = "campaignName")]
    pub campaign_name: String,
    pub products: Vec<Product>,
    #[serde(alias = "targetRegion")]
    pub target_region: String,
    #[serde(alias = "targetAudience")]
    pub target_audience: String,
    #[serde(alias = "campaignMessage")]
    pub campaign_message: String,
}

impl CampaignBrief {
    /// Check the brief is renderable: names present, products non-empty,
    /// ids unique and usable as directory names.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.campaign_name.trim().is_empty() {
            return Err(invalid("campaign_name must not be empty"));
        }
        if self.target_region.trim().is_empty() {
            return Err(invalid("target_region must not be empty"));
        }
        if self.products.is_empty() {
            return Err(invalid("products must not be empty"));
        }
        let mut seen = HashSet::new();
        for product in &self.products {
            if !is_safe_component(&product.id) {
                return Err(invalid(format!(
                    "product id '{}' must be non-empty and usable as a directory name",
                    product.id
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(invalid(format!("duplicate product id '{}'", product.id)));
            }
            if product.image_path.trim().is_empty() {
                return Err(invalid(format!(
                    "product '{}' has no image path",
                    product.id
                )));
            }
        }
        Ok(())
    }
}

/// Placement rules for brand elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutRules {
    #[serde(alias = "logoPosition")]
    pub logo_position: Corner,
    #[serde(alias = "logoMaxWidthPercent")]
    pub logo_max_width_percent: f64,
    #[serde(alias = "textPosition")]
    pub text_position: TextPosition,
    #[serde(alias = "safeMarginPercent")]
    pub safe_margin_percent: f64,
    #[serde(alias = "textBackgroundOpacity")]
    pub text_background_opacity: f32,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            logo_position: Corner::BottomRight,
            logo_max_width_percent: 15.0,
            text_position: TextPosition::default(),
            safe_margin_percent: 5.0,
            text_background_opacity: 0.75,
        }
    }
}

impl LayoutRules {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let logo = self.logo_max_width_percent;
        if !(logo > 0.0 && logo <= 100.0) {
            return Err(invalid("layout_rules.logo_max_width_percent must be in (0, 100]"));
        }
        let margin = self.safe_margin_percent;
        if !(0.0..50.0).contains(&margin) {
            return Err(invalid("layout_rules.safe_margin_percent must be in [0, 50)"));
        }
        if !(0.0..=1.0).contains(&self.text_background_opacity) {
            return Err(invalid("layout_rules.text_background_opacity must be in [0, 1]"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConfig {
    #[serde(alias = "brandName")]
    pub brand_name: String,
    /// Role name → `#RRGGBB`.
    pub colors: BTreeMap<String, String>,
    /// Role name → font family.
    pub typography: BTreeMap<String, String>,
    /// Logo name → image path.
    pub logos: BTreeMap<String, String>,
    #[serde(default, alias = "layoutRules")]
    pub layout_rules: LayoutRules,
}

pub const TEXT_COLOR_KEY: &str = "text_light";
pub const PILL_COLOR_KEY: &str = "secondary";
pub const HEADLINE_FONT_KEY: &str = "headline_font";
pub const PRIMARY_LOGO_KEY: &str = "primary";
pub const DEFAULT_HEADLINE_FONT: &str = "Arial";

impl BrandConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.brand_name.trim().is_empty() {
            return Err(invalid("brand_name must not be empty"));
        }
        for (role, hex) in &self.colors {
            if Rgb::from_hex(hex).is_none() {
                return Err(invalid(format!(
                    "colors.{role} = '{hex}' is not a #RRGGBB color"
                )));
            }
        }
        self.layout_rules.validate()
    }

    fn color(&self, key: &str, default: Rgb) -> Rgb {
        self.colors
            .get(key)
            .and_then(|hex| Rgb::from_hex(hex))
            .unwrap_or(default)
    }

    /// Resolve everything the overlay needs, with relative logo paths joined
    /// onto the asset root.
    pub fn overlay_style(&self, assets: &AssetsConfig) -> OverlayStyle {
        let rules = &self.layout_rules;
        OverlayStyle {
            text_color: self.color(TEXT_COLOR_KEY, Rgb::WHITE),
            pill_color: self.color(PILL_COLOR_KEY, Rgb::BLACK),
            pill_opacity: rules.text_background_opacity,
            headline_font: self
                .typography
                .get(HEADLINE_FONT_KEY)
                .cloned()
                .unwrap_or_else(|| DEFAULT_HEADLINE_FONT.to_string()),
            text_position: rules.text_position,
            safe_margin_percent: rules.safe_margin_percent,
            logo: self
                .logos
                .get(PRIMARY_LOGO_KEY)
                .filter(|p| !p.trim().is_empty())
                .map(|p| assets.resolve(p)),
            logo_position: rules.logo_position,
            logo_max_width_percent: rules.logo_max_width_percent,
            cta_button: assets.cta_button_path(),
        }
    }
}

/// Brand styling resolved to concrete values.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub text_color: Rgb,
    pub pill_color: Rgb,
    pub pill_opacity: f32,
    pub headline_font: String,
    pub text_position: TextPosition,
    pub safe_margin_percent: f64,
    pub logo: Option<PathBuf>,
    pub logo_position: Corner,
    pub logo_max_width_percent: f64,
    pub cta_button: Option<PathBuf>,
}

/// Load and validate a campaign brief.
pub fn load_brief(path: &Path) -> Result<CampaignBrief, ConfigError> {
    let content = fs::read_to_string(path)?;
    let brief: CampaignBrief = serde_json::from_str(&content)?;
    brief.validate()?;
    Ok(brief)
}

/// Load and validate a brand config.
pub fn load_brand(path: &Path) -> Result<BrandConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let brand: BrandConfig = serde_json::from_str(&content)?;
    brand.validate()?;
    Ok(brand)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{HAlign, VAlign};
    use tempfile::TempDir;

    const BRIEF_JSON: &str = r#"{
        "campaign_name": "Trail Season 2026",
        "target_region": "us_rockies",
        "target_audience": "Weekend hikers",
        "campaign_message": "Conquer Every Trail",
        "products": [
            {"id": "trail-pack", "name": "Trail Pack", "description": "Daypack",
             "product_image": "assets/products/trail-pack.png"},
            {"id": "boots", "name": "Boots", "description": "Waterproof",
             "product_image": "assets/products/boots.png"}
        ]
    }"#;

    const BRAND_JSON: &str = r##"{
        "brand_name": "Summit Gear",
        "colors": {"primary": "#2D5016", "secondary": "#1A1A1A", "text_light": "#F5F5F5"},
        "typography": {"headline_font": "Montserrat-Bold"},
        "logos": {"primary": "assets/logo.png"},
        "layout_rules": {"logo_position": "top-right", "text_position": "bottom-center",
                         "text_background_opacity": 0.6}
    }"##;

    const MINIMAL_BRAND_JSON: &str =
        r#"{"brand_name": "B", "colors": {}, "typography": {}, "logos": {}}"#;

    /// Write `json` with `key` removed (top level, or from the first product).
    fn write_without(dir: &Path, json: &str, key: &str) -> PathBuf {
        let mut value: serde_json::Value = serde_json::from_str(json).unwrap();
        let object = value.as_object_mut().unwrap();
        if object.remove(key).is_none() {
            object["products"][0].as_object_mut().unwrap().remove(key).unwrap();
        }
        let path = dir.join(format!("without-{key}.json"));
        fs::write(&path, value.to_string()).unwrap();
        path
    }

    fn brief() -> CampaignBrief {
        serde_json::from_str(BRIEF_JSON).unwrap()
    }

    // =========================================================================
    // Brief
    // =========================================================================

    #[test]
    fn parses_snake_case_brief() {
        let brief = brief();
        assert_eq!(brief.campaign_name, "Trail Season 2026");
        let ids: Vec<_> = brief.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["trail-pack", "boots"]);
        assert_eq!(brief.products[0].image_path, "assets/products/trail-pack.png");
        assert!(brief.validate().is_ok());
    }

    #[test]
    fn parses_camel_case_brief() {
        let json = r#"{
            "campaignName": "Fall", "targetRegion": "japan_alps",
            "targetAudience": "Climbers", "campaignMessage": "Go",
            "products": [{"id": "a", "name": "A", "description": "", "imagePath": "a.png"}]
        }"#;
        let brief: CampaignBrief = serde_json::from_str(json).unwrap();
        assert_eq!(brief.target_region, "japan_alps");
        assert_eq!(brief.target_audience, "Climbers");
        assert_eq!(brief.products[0].image_path, "a.png");
    }

    #[test]
    fn missing_required_field_is_parse_error() {
        let json = r#"{"campaign_name": "X", "products": []}"#;
        assert!(serde_json::from_str::<CampaignBrief>(json).is_err());
    }

    #[test]
    fn load_brief_rejects_each_missing_field() {
        let tmp = TempDir::new().unwrap();
        for key in [
            "campaign_name",
            "products",
            "target_region",
            "target_audience",
            "campaign_message",
            "id",
            "name",
            "description",
            "product_image",
        ] {
            let path = write_without(tmp.path(), BRIEF_JSON, key);
            assert!(
                matches!(load_brief(&path), Err(ConfigError::Json(_))),
                "brief without {key} loaded"
            );
        }
    }

    #[test]
    fn empty_products_rejected() {
        let mut brief = brief();
        brief.products.clear();
        assert!(matches!(brief.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut brief = brief();
        brief.products[1].id = "trail-pack".into();
        let err = brief.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate product id"), "{err}");
    }

    #[test]
    fn unsafe_ids_rejected() {
        let mut brief = brief();
        brief.products[0].id = "../escape".into();
        assert!(brief.validate().is_err());
    }

    #[test]
    fn load_brief_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brief.json");
        fs::write(&path, BRIEF_JSON).unwrap();
        assert_eq!(load_brief(&path).unwrap(), brief());
    }

    #[test]
    fn load_brief_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_brief(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    // =========================================================================
    // Brand
    // =========================================================================

    #[test]
    fn layout_rules_default_when_absent() {
        let brand: BrandConfig = serde_json::from_str(MINIMAL_BRAND_JSON).unwrap();
        assert_eq!(brand.layout_rules, LayoutRules::default());
        assert_eq!(brand.layout_rules.logo_position, Corner::BottomRight);
        assert_eq!(brand.layout_rules.text_background_opacity, 0.75);
    }

    #[test]
    fn partial_layout_rules_keep_defaults() {
        let brand: BrandConfig = serde_json::from_str(BRAND_JSON).unwrap();
        let rules = &brand.layout_rules;
        assert_eq!(rules.logo_position, Corner::TopRight);
        assert_eq!(rules.text_position, TextPosition::new(VAlign::Bottom, HAlign::Center));
        assert_eq!(rules.logo_max_width_percent, 15.0);
        assert_eq!(rules.safe_margin_percent, 5.0);
    }

    #[test]
    fn load_brand_rejects_each_missing_field() {
        let tmp = TempDir::new().unwrap();
        for key in ["brand_name", "colors", "typography", "logos"] {
            let path = write_without(tmp.path(), BRAND_JSON, key);
            assert!(
                matches!(load_brand(&path), Err(ConfigError::Json(_))),
                "brand without {key} loaded"
            );
        }
    }

    #[test]
    fn load_brand_without_layout_rules_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_without(tmp.path(), BRAND_JSON, "layout_rules");
        assert_eq!(load_brand(&path).unwrap().layout_rules, LayoutRules::default());
    }

    #[test]
    fn unknown_layout_keys_rejected() {
        let json = r#"{"brand_name": "B", "colors": {}, "typography": {}, "logos": {},
                      "layout_rules": {"logo_pos": "top-left"}}"#;
        assert!(serde_json::from_str::<BrandConfig>(json).is_err());
    }

    #[test]
    fn invalid_hex_rejected() {
        let mut brand: BrandConfig = serde_json::from_str(BRAND_JSON).unwrap();
        brand.colors.insert("accent".into(), "orange".into());
        assert!(brand.validate().is_err());
    }

    #[test]
    fn out_of_range_rules_rejected() {
        let mut rules = LayoutRules {
            text_background_opacity: 1.5,
            ..LayoutRules::default()
        };
        assert!(rules.validate().is_err());
        rules.text_background_opacity = 0.5;
        rules.safe_margin_percent = 50.0;
        assert!(rules.validate().is_err());
        rules.safe_margin_percent = 0.0;
        rules.logo_max_width_percent = 0.0;
        assert!(rules.validate().is_err());
    }

    #[test]
    fn overlay_style_resolves_roles() {
        let brand: BrandConfig = serde_json::from_str(BRAND_JSON).unwrap();
        let assets = AssetsConfig {
            root: "/work".into(),
            cta_button: "assets/cta.png".into(),
        };
        let style = brand.overlay_style(&assets);
        assert_eq!(style.text_color, Rgb([0xF5, 0xF5, 0xF5]));
        assert_eq!(style.pill_color, Rgb([0x1A, 0x1A, 0x1A]));
        assert_eq!(style.pill_opacity, 0.6);
        assert_eq!(style.headline_font, "Montserrat-Bold");
        assert_eq!(style.logo, Some(PathBuf::from("/work/assets/logo.png")));
        assert_eq!(style.cta_button, Some(PathBuf::from("/work/assets/cta.png")));
    }

    #[test]
    fn overlay_style_defaults() {
        let brand: BrandConfig = serde_json::from_str(MINIMAL_BRAND_JSON).unwrap();
        let style = brand.overlay_style(&AssetsConfig::default());
        assert_eq!(style.text_color, Rgb::WHITE);
        assert_eq!(style.pill_color, Rgb::BLACK);
        assert_eq!(style.headline_font, DEFAULT_HEADLINE_FONT);
        assert_eq!(style.logo, None);
    }
}
