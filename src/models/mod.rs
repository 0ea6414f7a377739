//! Data models for the site catalog.
//!
//! This module contains the structures used to represent the synced
//! dataset:
//!
//! - `Site` and its nested pieces: `SiteInfo`, `SiteContent`, `SiteSeo`
//! - `ExportData`, `ExportStats`: the remote export payload
//! - `SnapshotMeta`: summary stored next to the persisted snapshot

pub mod export;
pub mod site;

pub use export::{ExportData, ExportStats, SnapshotMeta};
pub use site::{ContentSection, Frameworks, Performance, Site, SiteContent, SiteInfo, SiteSeo, Technologies};
