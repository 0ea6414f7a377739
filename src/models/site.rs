//! Domain model for a cataloged site.
//!
//! Field names follow the backend export's camelCase wire format.

use serde::{Deserialize, Serialize};

/// One cataloged external website with descriptive, technical, and
/// scoring metadata.
///
/// `id` is the stable identity used for equality and dedup; `slug` is
/// the URL-safe identifier, unique across the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub meta_description: String,
    #[serde(default)]
    pub scraped_at: String,
    #[serde(default)]
    pub enriched_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default)]
    pub site_info: SiteInfo,
    #[serde(default)]
    pub content: SiteContent,
    #[serde(default)]
    pub seo: SiteSeo,
}

impl Site {
    /// Catalog score, clamped to the documented [0, 10] range so a bad
    /// export row cannot leak an out-of-range value into sorting or display.
    pub fn score(&self) -> f64 {
        self.seo.vitebutnottoomuch_score.clamp(0.0, 10.0)
    }
}

impl PartialEq for Site {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

/// Technical profile of the site itself (as opposed to the catalog entry).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteInfo {
    #[serde(default)]
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub technologies: Technologies,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<Performance>,
}

/// Detected technology inventory, grouped by category.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technologies {
    #[serde(default)]
    pub cms: Vec<String>,
    #[serde(default)]
    pub frameworks: Frameworks,
    #[serde(default)]
    pub analytics: Vec<String>,
    #[serde(default)]
    pub cdn: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frameworks {
    #[serde(default)]
    pub frontend: Vec<String>,
    #[serde(default)]
    pub backend: Vec<String>,
}

/// Measured performance metrics, in milliseconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    #[serde(default)]
    pub load_time: f64,
    #[serde(default)]
    pub first_paint: f64,
}

/// Editorial body of the catalog entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
    #[serde(default)]
    pub conclusion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentSection {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "body")]
    pub content: String,
}

/// Classification, keywords, and the catalog score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSeo {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Score in [0, 10], one-decimal precision by convention.
    #[serde(default)]
    pub vitebutnottoomuch_score: f64,
    #[serde(default)]
    pub word_count: u32,
    /// Estimated reading time in minutes.
    #[serde(default)]
    pub reading_time: u32,
}
