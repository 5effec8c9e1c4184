//! Font resolution.
//!
//! Turns a brand's headline family name into a font the layout engine can
//! measure with. The search is a fallback chain:
//!
//! 1. the brand family as given (`Montserrat-Bold`)
//! 2. the same name with hyphens as spaces (`Montserrat Bold`)
//! 3. each configured fallback family (`Impact`, `Arial Bold`, ...)
//! 4. the built-in [`BasicFace`]
//!
//! Candidate names are matched against font file stems found under the
//! configured search directories. Matching ignores case, spaces, hyphens and
//! underscores, so `Arial Bold` finds `Arial Bold.ttf`, `Arial-Bold.otf`
//! and `arialbold.ttf` alike.
//!
//! Resolution happens once per run; the result hands out faces at any
//! pixel size.

use crate::config::FontsConfig;
use crate::text::{BasicFace, FontFace, OutlineFace};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];
const SEARCH_DEPTH: usize = 4;

/// Normalise a family or file stem for matching.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Ordered, de-duplicated list of family names to try for `headline`.
pub fn candidate_families(headline: &str, fallbacks: &[String]) -> Vec<String> {
    let mut seen = Vec::new();
    let mut out = Vec::new();
    let primary = [headline.to_string(), headline.replace('-', " ")];
    for name in primary.into_iter().chain(fallbacks.iter().cloned()) {
        let key = normalize(&name);
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(name);
    }
    out
}

/// Index of font files found under a set of directories.
#[derive(Debug, Default)]
pub struct FontLocator {
    by_stem: HashMap<String, PathBuf>,
}

impl FontLocator {
    /// Walk `dirs` and index every font file by its normalised stem.
    ///
    /// Missing directories are skipped. When two files share a stem the one
    /// found first (earlier directory, then walk order) wins.
    pub fn scan(dirs: &[PathBuf]) -> Self {
        let mut by_stem = HashMap::new();
        for dir in dirs.iter().filter(|d| d.is_dir()) {
            let walker = WalkDir::new(dir)
                .max_depth(SEARCH_DEPTH)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok());
            for entry in walker {
                let path = entry.path();
                if !entry.file_type().is_file() || !is_font_file(path) {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    by_stem
                        .entry(normalize(stem))
                        .or_insert_with(|| path.to_path_buf());
                }
            }
        }
        Self { by_stem }
    }

    /// Path of the font file whose stem matches `family`, if any.
    pub fn locate(&self, family: &str) -> Option<&Path> {
        self.by_stem.get(&normalize(family)).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.by_stem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_stem.is_empty()
    }
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// The outcome of font resolution: an outline font or the built-in face.
#[derive(Clone)]
pub enum ResolvedFont {
    Outline {
        family: String,
        path: PathBuf,
        font: Arc<fontdue::Font>,
    },
    Basic,
}

impl ResolvedFont {
    /// A face of this font at `px` pixels.
    pub fn face(&self, px: f32) -> Box<dyn FontFace> {
        match self {
            ResolvedFont::Outline { font, .. } => Box::new(OutlineFace::new(Arc::clone(font), px)),
            ResolvedFont::Basic => Box::new(BasicFace::new(px)),
        }
    }

    /// Human-readable description for logs and summaries.
    pub fn describe(&self) -> String {
        match self {
            ResolvedFont::Outline { family, path, .. } => {
                format!("{family} ({})", path.display())
            }
            ResolvedFont::Basic => "built-in bitmap face".to_string(),
        }
    }
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Resolve `headline` through the fallback chain.
///
/// Files that exist but fail to parse are logged and skipped. Never fails:
/// the built-in face terminates the chain.
pub fn resolve_font(headline: &str, config: &FontsConfig) -> ResolvedFont {
    let locator = FontLocator::scan(&config.expanded_search_dirs());
    resolve_with(&locator, headline, &config.fallback_families)
}

/// [`resolve_font`] against an existing index.
pub fn resolve_with(locator: &FontLocator, headline: &str, fallbacks: &[String]) -> ResolvedFont {
    for family in candidate_families(headline, fallbacks) {
        let Some(path) = locator.locate(&family) else {
            continue;
        };
        let parsed = std::fs::read(path)
            .map_err(|e| e.to_string())
            .and_then(|bytes| OutlineFace::parse(&bytes));
        match parsed {
            Ok(font) => {
                tracing::info!(family = %family, path = %path.display(), "resolved headline font");
                return ResolvedFont::Outline {
                    family,
                    path: path.to_path_buf(),
                    font,
                };
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "skipping unreadable font: {err}");
            }
        }
    }
    tracing::warn!(
        headline,
        "no font found for headline or fallbacks, using built-in bitmap face"
    );
    ResolvedFont::Basic
}
