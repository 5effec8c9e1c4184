//! Generation log: the JSON record written next to a finished campaign.
//!
//! ```json
//! {
//!   "campaign_name": "Trail Season 2026",
//!   "region": "us_rockies",
//!   "generated_at": "2026-03-01T09:30:00Z",
//!   "products": ["trail-pack"],
//!   "aspect_ratios": ["1x1", "9x16", "16x9"],
//!   "files": { "trail-pack": ["output/.../trail-pack/1x1.png", "..."] },
//!   "checksums": { "output/.../trail-pack/1x1.png": "9f86d0..." }
//! }
//! ```
//!
//! The log is written only after every image has been saved, so its
//! presence means the run completed.

use crate::formats::ASPECT_RATIOS;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MANIFEST_FILE_NAME: &str = "generation_log.json";

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationLog {
    pub campaign_name: String,
    pub region: String,
    /// RFC 3339 / ISO-8601, UTC.
    pub generated_at: String,
    /// Product ids in brief order.
    pub products: Vec<String>,
    pub aspect_ratios: Vec<String>,
    /// Product id → output files, in aspect-ratio order.
    pub files: BTreeMap<String, Vec<PathBuf>>,
    /// Output file → lowercase hex SHA-256 of its contents.
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl GenerationLog {
    /// Build a log for `files` (product id → paths, in brief order).
    pub fn new(
        campaign_name: &str,
        region: &str,
        generated_at: DateTime<Utc>,
        files: &[(String, Vec<PathBuf>)],
    ) -> Self {
        Self {
            campaign_name: campaign_name.to_string(),
            region: region.to_string(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            products: files.iter().map(|(id, _)| id.clone()).collect(),
            aspect_ratios: ASPECT_RATIOS.iter().map(|r| r.name.to_string()).collect(),
            files: files.iter().cloned().collect(),
            checksums: BTreeMap::new(),
        }
    }

    /// Hash every listed file.
    pub fn compute_checksums(&mut self) -> Result<(), ManifestError> {
        let mut checksums = BTreeMap::new();
        for path in self.files.values().flatten() {
            checksums.insert(path.display().to_string(), sha256_file(path)?);
        }
        self.checksums = checksums;
        Ok(())
    }

    /// Total number of files listed.
    pub fn file_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Write as pretty JSON to `{dir}/generation_log.json`.
    pub fn write(&self, dir: &Path) -> Result<PathBuf, ManifestError> {
        let path = dir.join(MANIFEST_FILE_NAME);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Lowercase hex SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> Result<String, std::io::Error> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(digest.iter().map(|b| format!("{b:02x}")).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn new_records_products_in_order_and_all_ratios() {
        let files = vec![
            ("tent".to_string(), vec![PathBuf::from("t/1x1.png")]),
            ("boots".to_string(), vec![PathBuf::from("b/1x1.png")]),
        ];
        let log = GenerationLog::new("Fall", "us_rockies", timestamp(), &files);
        assert_eq!(log.products, vec!["tent", "boots"]);
        assert_eq!(log.aspect_ratios, vec!["1x1", "9x16", "16x9"]);
        assert_eq!(log.generated_at, "2026-03-01T09:30:00Z");
        assert_eq!(log.file_count(), 2);
    }

    #[test]
    fn checksums_cover_every_file() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.png");
        fs::write(&a, b"test").unwrap();
        let files = vec![("p".to_string(), vec![a.clone()])];
        let mut log = GenerationLog::new("C", "r", timestamp(), &files);
        log.compute_checksums().unwrap();
        assert_eq!(
            log.checksums[&a.display().to_string()],
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn checksum_of_missing_file_is_error() {
        let files = vec![("p".to_string(), vec![PathBuf::from("/no/such/file.png")])];
        let mut log = GenerationLog::new("C", "r", timestamp(), &files);
        assert!(matches!(log.compute_checksums(), Err(ManifestError::Io(_))));
    }

    #[test]
    fn write_then_load() {
        let tmp = TempDir::new().unwrap();
        let files = vec![("p".to_string(), vec![PathBuf::from("x/1x1.png")])];
        let log = GenerationLog::new("C", "r", timestamp(), &files);
        let path = log.write(tmp.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), MANIFEST_FILE_NAME);
        assert_eq!(GenerationLog::load(&path).unwrap(), log);
    }

    #[test]
    fn json_uses_snake_case_keys() {
        let log = GenerationLog::new("C", "r", timestamp(), &[]);
        let json = serde_json::to_value(&log).unwrap();
        for key in ["campaign_name", "region", "generated_at", "products", "aspect_ratios", "files"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
