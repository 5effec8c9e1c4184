//! Render settings.
//!
//! Handles loading, validating, and merging `adcraft.toml`. Settings cover
//! everything about *how* a campaign is rendered that is not part of the
//! brief or the brand: where files live, which background source to use,
//! where to look for fonts, and how many workers to run.
//!
//! Brand and campaign inputs are JSON and live in [`crate::brief`].
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! dir = "output"                      # Campaign folders are created here
//!
//! [assets]
//! root = "."                          # Relative asset paths resolve against this
//! cta_button = "assets/cta-button.png"
//!
//! [backgrounds]
//! # dir = "backgrounds"               # {dir}/{region}.png; omit for synthetic
//! focus = "center"                    # Vertical crop focus: top, center, bottom
//!
//! [fonts]
//! search_dirs = ["/System/Library/Fonts", "/Library/Fonts", "~/.fonts", "fonts"]
//! fallback_families = ["Impact", "Arial Bold", "Helvetica Bold"]
//!
//! [text]
//! max_width_percent = 70.0            # Headline wrap width, % of image width
//!
//! [processing]
//! max_processes = 4                   # Max parallel workers (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse; override just the values you want:
//!
//! ```toml
//! [backgrounds]
//! dir = "stock/regions"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Focus;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "adcraft.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Render settings loaded from `adcraft.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Where campaign folders are written.
    pub output: OutputConfig,
    /// Asset root and the shared CTA button image.
    pub assets: AssetsConfig,
    /// Background source and crop focus.
    pub backgrounds: BackgroundsConfig,
    /// Font search locations and the family fallback chain.
    pub fonts: FontsConfig,
    /// Headline layout settings.
    pub text: TextConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl RenderConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".into(),
            ));
        }
        let pct = self.text.max_width_percent;
        if !(pct > 0.0 && pct <= 100.0) {
            return Err(ConfigError::Validation(
                "text.max_width_percent must be in (0, 100]".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "output".to_string(),
        }
    }
}

/// Asset locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Relative product, logo and button paths resolve against this directory.
    pub root: String,
    /// CTA button image. An empty string disables the button.
    pub cta_button: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            cta_button: "assets/cta-button.png".to_string(),
        }
    }
}

impl AssetsConfig {
    /// Resolve an asset path: absolute paths pass through, relative ones
    /// are joined onto [`root`](Self::root).
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.root).join(path)
        }
    }

    /// The CTA button path, or `None` when disabled.
    pub fn cta_button_path(&self) -> Option<PathBuf> {
        let trimmed = self.cta_button.trim();
        (!trimmed.is_empty()).then(|| self.resolve(trimmed))
    }
}

/// Background source settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundsConfig {
    /// Directory of `{region}.{png,jpg,jpeg,webp}` files.
    /// When absent, backgrounds are synthesised.
    pub dir: Option<String>,
    /// Vertical focus of the cover crop.
    pub focus: Focus,
}

/// Font resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontsConfig {
    /// Directories searched (recursively, a few levels deep) for `.ttf`/`.otf`
    /// files. A leading `~` expands to the home directory.
    pub search_dirs: Vec<String>,
    /// Families tried, in order, after the brand's headline font.
    pub fallback_families: Vec<String>,
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            search_dirs: [
                "/System/Library/Fonts",
                "/System/Library/Fonts/Supplemental",
                "/Library/Fonts",
                "~/.fonts",
                "~/.local/share/fonts",
                "/usr/share/fonts",
                "fonts",
            ]
            .map(String::from)
            .to_vec(),
            fallback_families: [
                "Impact",
                "Arial Bold",
                "Helvetica Bold",
                "Arial Black",
                "Futura Bold",
                "Helvetica Neue Bold",
                "Oswald Bold",
                "Oswald",
                "DejaVu Sans Bold",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl FontsConfig {
    /// Search directories with `~` expanded.
    pub fn expanded_search_dirs(&self) -> Vec<PathBuf> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        self.search_dirs
            .iter()
            .filter_map(|dir| match (dir.strip_prefix("~/"), &home) {
                (Some(rest), Some(home)) => Some(home.join(rest)),
                (Some(_), None) => None,
                (None, _) => Some(PathBuf::from(dir)),
            })
            .collect()
    }
}

/// Headline layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// Maximum wrapped line width as a percentage of the image width.
    pub max_width_percent: f64,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            max_width_percent: 70.0,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of products rendered in parallel.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(RenderConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a settings file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<RenderConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: RenderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load settings from `path`, falling back to stock defaults when the file
/// does not exist.
pub fn load_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    resolve_config(stock_defaults_value()?, overlay)
}

/// Load settings from a path the user named explicitly; a missing file is an error.
pub fn load_required_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    match load_raw_config(path)? {
        Some(overlay) => resolve_config(stock_defaults_value()?, Some(overlay)),
        None => Err(ConfigError::Validation(format!(
            "config file not found: {}",
            path.display()
        ))),
    }
}

/// Returns a fully-commented stock `adcraft.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# adcraft Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Campaign folders ({campaign}_{region}/{product}/{ratio}.png) go here.
dir = "output"

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Relative product, logo and button paths resolve against this directory.
root = "."
# Call-to-action button image. Skipped with a warning if the file is missing.
# Set to "" to disable the button entirely.
cta_button = "assets/cta-button.png"

# ---------------------------------------------------------------------------
# Backgrounds
# ---------------------------------------------------------------------------
[backgrounds]
# Directory holding one landscape image per region: {dir}/{region}.png
# (.jpg, .jpeg and .webp also work). Omit to synthesise backgrounds.
# dir = "backgrounds"
# Which part of a tall background survives cropping: top, center, bottom.
focus = "center"

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[fonts]
# Directories searched for .ttf/.otf files. "~" expands to $HOME.
search_dirs = [
    "/System/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
    "/Library/Fonts",
    "~/.fonts",
    "~/.local/share/fonts",
    "/usr/share/fonts",
    "fonts",
]
# Tried in order after the brand's headline font. When none resolves,
# a built-in bitmap face is used.
fallback_families = [
    "Impact",
    "Arial Bold",
    "Helvetica Bold",
    "Arial Black",
    "Futura Bold",
    "Helvetica Neue Bold",
    "Oswald Bold",
    "Oswald",
    "DejaVu Sans Bold",
]

# ---------------------------------------------------------------------------
# Headline text
# ---------------------------------------------------------------------------
[text]
# Lines wrap before exceeding this percentage of the image width.
max_width_percent = 70.0

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum products rendered in parallel.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
