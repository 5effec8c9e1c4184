//! Output directory naming.
//!
//! A run writes into `{campaign}_{region}/`, where the campaign name is
//! lowercased with spaces turned into hyphens and the region is lowercased
//! with spaces turned into underscores:
//!
//! - `"Summer Adventure 2025"` + `"us_pacific_northwest"` → `summer-adventure-2025_us_pacific_northwest`
//! - `"Trail Blazers"` + `"Japan Alps"` → `trail-blazers_japan_alps`
//!
//! Path separators and other characters unsafe in a single path component
//! are dropped, so a slug can never escape the output directory.

fn is_path_safe(c: char) -> bool {
    !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') && !c.is_control()
}

fn slug(name: &str, separator: char) -> String {
    let joined = name
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(&separator.to_string());
    let cleaned: String = joined
        .chars()
        .filter(|&c| is_path_safe(c))
        .flat_map(char::to_lowercase)
        .collect();
    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Campaign name as a directory slug: lowercase, spaces become hyphens.
pub fn campaign_slug(name: &str) -> String {
    slug(name, '-')
}

/// Region key as a directory slug: lowercase, spaces become underscores.
pub fn region_slug(region: &str) -> String {
    slug(region, '_')
}

/// Directory name for one campaign run.
pub fn campaign_dir_name(campaign: &str, region: &str) -> String {
    format!("{}_{}", campaign_slug(campaign), region_slug(region))
}

/// Whether `id` can be used verbatim as a single directory name.
pub fn is_safe_component(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && id.chars().all(is_path_safe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn campaign_slug_lowercases_and_hyphenates() {
        assert_eq!(campaign_slug("Summer Adventure 2025"), "summer-adventure-2025");
        assert_eq!(campaign_slug("  Trail   Blazers "), "trail-blazers");
    }

    #[test]
    fn region_slug_uses_underscores() {
        assert_eq!(region_slug("us_rockies"), "us_rockies");
        assert_eq!(region_slug("Japan Alps"), "japan_alps");
    }

    #[test]
    fn dir_name_joins_both() {
        assert_eq!(
            campaign_dir_name("Fall Gear", "us_rockies"),
            "fall-gear_us_rockies"
        );
    }

    #[test]
    fn unsafe_characters_are_dropped() {
        assert_eq!(campaign_slug("../../etc/passwd"), "etcpasswd");
        assert_eq!(campaign_slug("A/B: C?"), "ab-c");
        assert_eq!(campaign_slug("..."), "untitled");
        assert_eq!(campaign_slug(""), "untitled");
    }

    #[test]
    fn safe_component_check() {
        assert!(is_safe_component("tent-001"));
        assert!(is_safe_component("Hiking Boots"));
        assert!(!is_safe_component(""));
        assert!(!is_safe_component(".."));
        assert!(!is_safe_component("a/b"));
    }
}
