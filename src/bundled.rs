//! Build-time embedded fallback dataset.
//!
//! Used only for the cold-start case: no persisted snapshot exists and
//! no remote fetch has ever succeeded. Parsed once on first use.

use std::sync::OnceLock;

use serde::Deserialize;
use tracing::warn;

use crate::models::Site;

/// Embedded dataset, parsed once on first access
static BUNDLED: OnceLock<Vec<Site>> = OnceLock::new();

static RAW: &str = include_str!("../data/bundled.json");

#[derive(Debug, Deserialize, Default)]
struct BundledFile {
    #[serde(default)]
    version: String,
    #[serde(default, alias = "pages")]
    sites: Vec<Site>,
}

/// The embedded site collection. Empty only if the build shipped a
/// malformed file, which the sync layer reports as data-unavailable.
pub fn sites() -> &'static [Site] {
    BUNDLED.get_or_init(|| match serde_json::from_str::<BundledFile>(RAW) {
        Ok(file) => {
            tracing::debug!(
                version = %file.version,
                count = file.sites.len(),
                "Loaded embedded dataset"
            );
            file.sites
        }
        Err(e) => {
            warn!(error = %e, "Embedded dataset failed to parse");
            Vec::new()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_dataset_parses() {
        let sites = sites();
        assert!(!sites.is_empty());
        // Slugs must be unique across the collection.
        let mut slugs: Vec<_> = sites.iter().map(|s| s.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), sites.len());
        for site in sites {
            assert!((0.0..=10.0).contains(&site.seo.vitebutnottoomuch_score));
        }
    }
}
