//! Export payload and snapshot metadata types.

use serde::{Deserialize, Serialize};

use super::Site;

/// Aggregate statistics shipped alongside the dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub enriched: u32,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub avg_vitebutnottoomuch_score: f64,
}

/// The full dataset as delivered by the backend export endpoint.
///
/// `version` is an opaque revision token, a millisecond epoch timestamp
/// by convention but never assumed to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub version: String,
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub sites: Vec<Site>,
    #[serde(default)]
    pub stats: ExportStats,
}

/// Summary written next to the persisted snapshot (`meta.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMeta {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub generated: String,
    #[serde(default)]
    pub last_update: String,
    #[serde(default)]
    pub stats: ExportStats,
}
