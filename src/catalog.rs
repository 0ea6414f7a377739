//! Pure derivations over an already-resolved site collection.
//!
//! Page-level callers run these on whatever `SyncCache` returned;
//! nothing here touches the network or the disk.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Site;

/// Find a site by its URL-safe slug.
pub fn find_by_slug<'a>(sites: &'a [Site], slug: &str) -> Option<&'a Site> {
    sites.iter().find(|site| site.slug == slug)
}

/// All sites whose category list matches `category` by case-insensitive
/// substring, preserving collection order.
pub fn in_category<'a>(sites: &'a [Site], category: &str) -> Vec<&'a Site> {
    let needle = category.to_lowercase();
    sites
        .iter()
        .filter(|site| {
            site.seo
                .categories
                .iter()
                .any(|cat| cat.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The `limit` highest-scored sites, best first.
pub fn top_by_score<'a>(sites: &'a [Site], limit: usize) -> Vec<&'a Site> {
    let mut ranked: Vec<&Site> = sites.iter().collect();
    ranked.sort_by(|a, b| b.score().total_cmp(&a.score()));
    ranked.truncate(limit);
    ranked
}

/// The `limit` most recently enriched sites, newest first. Sites with an
/// unparseable enrichment timestamp sort last.
pub fn recent<'a>(sites: &'a [Site], limit: usize) -> Vec<&'a Site> {
    let mut ranked: Vec<&Site> = sites.iter().collect();
    ranked.sort_by_key(|site| std::cmp::Reverse(enriched_at(site)));
    ranked.truncate(limit);
    ranked
}

fn enriched_at(site: &Site) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&site.enriched_at)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Sites sharing at least one category with `current`, best-scored
/// first, excluding `current` itself.
pub fn similar<'a>(sites: &'a [Site], current: &Site, limit: usize) -> Vec<&'a Site> {
    let mut related: Vec<&Site> = sites
        .iter()
        .filter(|site| site.id != current.id)
        .filter(|site| {
            site.seo
                .categories
                .iter()
                .any(|cat| current.seo.categories.contains(cat))
        })
        .collect();
    related.sort_by(|a, b| b.score().total_cmp(&a.score()));
    related.truncate(limit);
    related
}

/// Sites whose score falls within `[min, max]` inclusive.
pub fn score_between<'a>(sites: &'a [Site], min: f64, max: f64) -> Vec<&'a Site> {
    sites
        .iter()
        .filter(|site| {
            let score = site.score();
            score >= min && score <= max
        })
        .collect()
}

/// Aggregate statistics derived from the collection itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    pub total: usize,
    pub enriched: usize,
    /// Distinct categories, sorted.
    pub categories: Vec<String>,
    /// Average score, rounded to one decimal.
    pub avg_score: f64,
}

pub fn stats(sites: &[Site]) -> CatalogStats {
    let mut categories: Vec<String> = sites
        .iter()
        .flat_map(|site| site.seo.categories.iter().cloned())
        .collect();
    categories.sort_unstable();
    categories.dedup();

    let avg_score = if sites.is_empty() {
        0.0
    } else {
        let sum: f64 = sites.iter().map(|site| site.score()).sum();
        (sum / sites.len() as f64 * 10.0).round() / 10.0
    };

    CatalogStats {
        total: sites.len(),
        enriched: sites.iter().filter(|s| !s.enriched_at.is_empty()).count(),
        categories,
        avg_score,
    }
}
