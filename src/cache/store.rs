//! Durable fallback storage for the synced dataset.
//!
//! Three artifacts live in the data directory: the site collection
//! (`export.json`), a metadata summary (`meta.json`), and a bare version
//! marker (`version.txt`). They are written only after a successful
//! remote fetch and read as the fallback of last resort. Writes are
//! atomic (write-temp-then-rename) so a reader never observes a partial
//! snapshot.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

use crate::models::{ExportData, SnapshotMeta, Site};

const EXPORT_FILE: &str = "export.json";
const META_FILE: &str = "meta.json";
const VERSION_FILE: &str = "version.txt";

/// Storage seam for the sync layer.
///
/// The filesystem implementation is `FsStore`; build targets without
/// filesystem access inject `NoopStore` instead of conditionally
/// compiling the sync code.
pub trait DurableStore: Send + Sync {
    /// Read the persisted version marker, `None` if never synced.
    fn load_version(&self) -> Result<Option<String>>;

    /// Read the persisted site collection, `None` if never synced.
    fn load_sites(&self) -> Result<Option<Vec<Site>>>;

    /// Read the persisted metadata summary, `None` if never synced.
    fn load_meta(&self) -> Result<Option<SnapshotMeta>>;

    /// Overwrite all three artifacts from a freshly fetched export.
    fn persist(&self, export: &ExportData) -> Result<()>;
}

/// Filesystem-backed snapshot store.
pub struct FsStore {
    data_dir: PathBuf,
}

impl FsStore {
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    fn read_optional(&self, name: &str) -> Result<Option<String>> {
        let path = self.path(name);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read snapshot file: {}", name))?;
        Ok(Some(contents))
    }

    /// Write through a temp file in the same directory, then rename over
    /// the target. Rename within one directory is atomic on the
    /// platforms we care about.
    fn write_atomic(&self, name: &str, contents: &str) -> Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.data_dir)
            .context("Failed to create temp file for snapshot write")?;
        tmp.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write snapshot file: {}", name))?;
        tmp.persist(self.path(name))
            .with_context(|| format!("Failed to replace snapshot file: {}", name))?;
        Ok(())
    }
}

impl DurableStore for FsStore {
    fn load_version(&self) -> Result<Option<String>> {
        Ok(self
            .read_optional(VERSION_FILE)?
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty()))
    }

    fn load_sites(&self) -> Result<Option<Vec<Site>>> {
        match self.read_optional(EXPORT_FILE)? {
            Some(contents) => {
                let sites: Vec<Site> = serde_json::from_str(&contents)
                    .context("Failed to parse persisted snapshot")?;
                Ok(Some(sites))
            }
            None => Ok(None),
        }
    }

    fn load_meta(&self) -> Result<Option<SnapshotMeta>> {
        match self.read_optional(META_FILE)? {
            Some(contents) => {
                let meta: SnapshotMeta = serde_json::from_str(&contents)
                    .context("Failed to parse snapshot metadata")?;
                Ok(Some(meta))
            }
            None => Ok(None),
        }
    }

    fn persist(&self, export: &ExportData) -> Result<()> {
        self.write_atomic(EXPORT_FILE, &serde_json::to_string_pretty(&export.sites)?)?;

        let meta = SnapshotMeta {
            version: export.version.clone(),
            generated: export.generated.clone(),
            last_update: Utc::now().to_rfc3339(),
            stats: export.stats.clone(),
        };
        self.write_atomic(META_FILE, &serde_json::to_string_pretty(&meta)?)?;

        // The bare marker goes last so a crash mid-persist leaves the
        // old version pointing at a readable (if older) snapshot.
        self.write_atomic(VERSION_FILE, &export.version)?;

        debug!(version = %export.version, sites = export.sites.len(), "Snapshot persisted");
        Ok(())
    }
}

/// Store for targets without durable storage: loads find nothing,
/// persists go nowhere.
pub struct NoopStore;

impl DurableStore for NoopStore {
    fn load_version(&self) -> Result<Option<String>> {
        Ok(None)
    }

    fn load_sites(&self) -> Result<Option<Vec<Site>>> {
        Ok(None)
    }

    fn load_meta(&self) -> Result<Option<SnapshotMeta>> {
        Ok(None)
    }

    fn persist(&self, export: &ExportData) -> Result<()> {
        debug!(version = %export.version, "No durable store on this target, skipping persist");
        Ok(())
    }
}
