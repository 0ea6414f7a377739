//! Version-gated synchronization with a tiered fallback chain.
//!
//! `SyncCache` owns the in-memory copy of the site catalog and decides,
//! on each request, whether to serve memory, promote the persisted
//! snapshot, or fetch fresh data from the backend. Callers always get a
//! result; network and disk failures degrade one tier at a time
//! (memory, persisted snapshot, bundled dataset, explicit empty).

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::api::RemoteSource;
use crate::bundled;
use crate::cache::store::DurableStore;
use crate::models::{ExportData, Site, SnapshotMeta};
use crate::version::{self, VersionComparison};

/// Serve the memory cache without any checks while it is younger than this.
const DEFAULT_FRESHNESS_MINUTES: i64 = 30;

/// Minimum spacing between remote version probes, independent of cache
/// freshness. Bounds outbound request volume under load.
const DEFAULT_CHECK_INTERVAL_MINUTES: i64 = 60;

/// Tunable freshness policy for `SyncCache`.
#[derive(Debug, Clone, Copy)]
pub struct SyncPolicy {
    pub freshness_minutes: i64,
    pub check_interval_minutes: i64,
}

impl Default for SyncPolicy {
    fn default() -> Self {
        Self {
            freshness_minutes: DEFAULT_FRESHNESS_MINUTES,
            check_interval_minutes: DEFAULT_CHECK_INTERVAL_MINUTES,
        }
    }
}

/// In-memory snapshot of the dataset plus its version and fetch time.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub sites: Vec<Site>,
    pub version: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(sites: Vec<Site>, version: Option<String>) -> Self {
        Self {
            sites,
            version,
            fetched_at: Utc::now(),
        }
    }

    fn age_minutes(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_minutes()
    }

    fn is_fresh(&self, policy: &SyncPolicy) -> bool {
        self.age_minutes() < policy.freshness_minutes
    }
}

/// Where the data in a `SyncResult` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// In-memory cache.
    Memory,
    /// Fresh fetch from the backend.
    Remote,
    /// Persisted on-disk snapshot.
    Persisted,
    /// Build-time embedded dataset.
    Bundled,
    /// Nothing anywhere; `sites` is empty and the caller should show a
    /// data-unavailable state rather than an empty catalog.
    Unavailable,
}

/// Outcome of one sync pass. Never an error: degradation is encoded in
/// `source`, not in a `Result`.
#[derive(Debug, Clone)]
pub struct SyncResult {
    pub sites: Vec<Site>,
    pub version: Option<String>,
    pub source: DataSource,
    pub from_cache: bool,
}

impl SyncResult {
    fn from_entry(entry: CacheEntry, source: DataSource, from_cache: bool) -> Self {
        Self {
            sites: entry.sites,
            version: entry.version,
            source,
            from_cache,
        }
    }

    /// True only for the total-data-unavailability outcome.
    pub fn is_degraded(&self) -> bool {
        self.source == DataSource::Unavailable
    }
}

/// Local and remote version tokens with their comparison, for status
/// displays and conditional forced syncs.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub local: Option<String>,
    pub remote: Option<String>,
    pub checked_at: DateTime<Utc>,
    pub comparison: VersionComparison,
}

struct ProbeState {
    last_check: Option<DateTime<Utc>>,
}

/// Version-gated cache of the site catalog with injected collaborators.
///
/// Create one at application startup and share it; all methods take
/// `&self`.
pub struct SyncCache {
    remote: Arc<dyn RemoteSource>,
    store: Arc<dyn DurableStore>,
    policy: SyncPolicy,
    bundled: Vec<Site>,
    entry: RwLock<Option<CacheEntry>>,
    // Also the single in-flight latch for the probe/fetch path: stale
    // callers queue here instead of issuing parallel remote calls.
    probe: Mutex<ProbeState>,
}

impl SyncCache {
    pub fn new(remote: Arc<dyn RemoteSource>, store: Arc<dyn DurableStore>) -> Self {
        Self::with_policy(remote, store, SyncPolicy::default())
    }

    pub fn with_policy(
        remote: Arc<dyn RemoteSource>,
        store: Arc<dyn DurableStore>,
        policy: SyncPolicy,
    ) -> Self {
        Self {
            remote,
            store,
            policy,
            bundled: bundled::sites().to_vec(),
            entry: RwLock::new(None),
            probe: Mutex::new(ProbeState { last_check: None }),
        }
    }

    /// Replace the embedded cold-start dataset. Useful for hosts that
    /// ship their own snapshot, and for tests.
    pub fn with_bundled(mut self, sites: Vec<Site>) -> Self {
        self.bundled = sites;
        self
    }

    /// The current site collection, through whatever tier is available.
    pub async fn get_sites(&self) -> Vec<Site> {
        self.sync().await.sites
    }

    /// One full sync pass. Never errors and never blocks on disk writes.
    pub async fn sync(&self) -> SyncResult {
        // Freshest path first: young memory cache, no locks beyond the read.
        if let Some(hit) = self.fresh_memory().await {
            return hit;
        }

        // Single in-flight latch. Whoever held the lock before us may
        // have refreshed the cache, so re-check before probing.
        let mut probe = self.probe.lock().await;
        if let Some(hit) = self.fresh_memory().await {
            return hit;
        }

        let now = Utc::now();
        let recently_checked = probe.last_check.map_or(false, |t| {
            now - t < Duration::minutes(self.policy.check_interval_minutes)
        });
        if recently_checked {
            // Probe frequency is rate-limited independently of cache
            // freshness; a stale entry beats an extra network call.
            if let Some(entry) = self.entry.read().await.clone() {
                debug!(version = ?entry.version, "Probe rate-limited, serving existing cache");
                return SyncResult::from_entry(entry, DataSource::Memory, true);
            }
        } else {
            probe.last_check = Some(now);
        }

        match self.refresh().await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "Sync failed, serving local fallback");
                self.fallback().await
            }
        }
    }

    /// Bypass freshness checks and probe rate limiting: fetch the full
    /// export, update memory, and persist before returning.
    pub async fn force_sync(&self) -> Result<()> {
        let mut probe = self.probe.lock().await;
        let export = self
            .remote
            .fetch_export()
            .await
            .context("Forced sync fetch failed")?;
        probe.last_check = Some(Utc::now());

        *self.entry.write().await = Some(CacheEntry::new(
            export.sites.clone(),
            Some(export.version.clone()),
        ));

        let version = export.version.clone();
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.persist(&export))
            .await
            .context("Snapshot persistence task failed")??;

        info!(version = %version, "Forced sync complete");
        Ok(())
    }

    /// Current local and remote version tokens plus their comparison.
    pub async fn version_info(&self) -> VersionInfo {
        let local = self.store.load_version().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read local version marker");
            None
        });
        let remote = match self.remote.fetch_version().await {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(error = %e, "Version probe failed");
                None
            }
        };
        let comparison = version::compare(local.as_deref(), remote.as_deref());
        VersionInfo {
            local,
            remote,
            checked_at: Utc::now(),
            comparison,
        }
    }

    /// Metadata summary of the persisted snapshot, `None` if never
    /// synced. Read errors degrade to `None` like every other tier.
    pub fn snapshot_meta(&self) -> Option<SnapshotMeta> {
        self.store.load_meta().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read snapshot metadata");
            None
        })
    }

    /// Force a sync only when the comparator says the local copy is
    /// behind. Returns whether a sync was performed.
    pub async fn force_sync_if_needed(&self) -> Result<bool> {
        let info = self.version_info().await;
        if !info.comparison.needs_update {
            debug!(local = ?info.local, "Local dataset already current");
            return Ok(false);
        }
        self.force_sync().await?;
        Ok(true)
    }

    async fn fresh_memory(&self) -> Option<SyncResult> {
        let guard = self.entry.read().await;
        let entry = guard.as_ref()?;
        if entry.is_fresh(&self.policy) {
            debug!(version = ?entry.version, age_minutes = entry.age_minutes(), "Memory cache hit");
            Some(SyncResult::from_entry(
                entry.clone(),
                DataSource::Memory,
                true,
            ))
        } else {
            None
        }
    }

    /// Probe the remote version and either promote the persisted
    /// snapshot or fetch the full export. Errors here mean "backend
    /// unusable" and send the caller to `fallback`.
    async fn refresh(&self) -> Result<SyncResult> {
        let remote_version = self
            .remote
            .fetch_version()
            .await
            .context("Version probe failed")?;
        let local_version = self.store.load_version().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read local version marker");
            None
        });

        let cmp = version::compare(local_version.as_deref(), Some(&remote_version));
        debug!(
            local = ?local_version,
            remote = %remote_version,
            needs_update = cmp.needs_update,
            "Compared dataset versions"
        );

        if !cmp.needs_update {
            if let Some(result) = self.adopt_persisted().await {
                return Ok(result);
            }
            // Marker says current but the snapshot itself is unreadable.
            warn!("Local version current but snapshot missing, fetching full export");
        }

        let export = self
            .remote
            .fetch_export()
            .await
            .context("Full export fetch failed")?;

        // Memory first, synchronously, so subsequent calls see the new
        // data immediately; the disk write happens off the request path.
        *self.entry.write().await = Some(CacheEntry::new(
            export.sites.clone(),
            Some(export.version.clone()),
        ));
        info!(version = %export.version, sites = export.sites.len(), "Synced new dataset version");

        let result = SyncResult {
            sites: export.sites.clone(),
            version: Some(export.version.clone()),
            source: DataSource::Remote,
            from_cache: false,
        };
        self.persist_background(export);
        Ok(result)
    }

    /// Load the persisted snapshot into memory with a refreshed
    /// timestamp. `None` if no usable snapshot exists.
    async fn adopt_persisted(&self) -> Option<SyncResult> {
        match self.store.load_sites() {
            Ok(Some(sites)) => {
                let version = self.store.load_version().unwrap_or_else(|e| {
                    warn!(error = %e, "Failed to read local version marker");
                    None
                });
                debug!(sites = sites.len(), version = ?version, "Serving persisted snapshot");
                *self.entry.write().await =
                    Some(CacheEntry::new(sites.clone(), version.clone()));
                Some(SyncResult {
                    sites,
                    version,
                    source: DataSource::Persisted,
                    from_cache: true,
                })
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted snapshot");
                None
            }
        }
    }

    /// Degrade one tier at a time: stale memory, persisted snapshot,
    /// bundled dataset, then the explicit empty result.
    async fn fallback(&self) -> SyncResult {
        if let Some(entry) = self.entry.read().await.clone() {
            debug!(version = ?entry.version, "Serving stale memory cache");
            return SyncResult::from_entry(entry, DataSource::Memory, true);
        }

        if let Some(result) = self.adopt_persisted().await {
            return result;
        }

        if !self.bundled.is_empty() {
            debug!(sites = self.bundled.len(), "Serving bundled dataset");
            let entry = CacheEntry::new(self.bundled.clone(), None);
            *self.entry.write().await = Some(entry.clone());
            return SyncResult::from_entry(entry, DataSource::Bundled, true);
        }

        warn!("No remote, persisted, or bundled data available");
        SyncResult {
            sites: Vec::new(),
            version: None,
            source: DataSource::Unavailable,
            from_cache: false,
        }
    }

    /// Fire-and-forget snapshot write. Failures are logged and never
    /// touch the memory entry already handed to the caller.
    fn persist_background(&self, export: ExportData) {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            let version = export.version.clone();
            match tokio::task::spawn_blocking(move || store.persist(&export)).await {
                Ok(Ok(())) => debug!(version = %version, "Background persist complete"),
                Ok(Err(e)) => warn!(error = %e, "Background persist failed"),
                Err(e) => warn!(error = %e, "Background persist task panicked"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExportStats;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration as StdDuration;

    use async_trait::async_trait;

    fn site(id: &str, score: f64) -> Site {
        let mut site: Site = serde_json::from_str(&format!(
            r#"{{"id": "{id}", "slug": "{id}-site", "title": "{id}"}}"#
        ))
        .unwrap();
        site.seo.vitebutnottoomuch_score = score;
        site
    }

    fn export(version: &str, sites: Vec<Site>) -> ExportData {
        ExportData {
            version: version.to_string(),
            generated: "2025-01-01T00:00:00Z".to_string(),
            stats: ExportStats {
                total: sites.len() as u32,
                ..Default::default()
            },
            sites,
        }
    }

    /// Backend fake: `None` payloads simulate failure.
    struct FakeRemote {
        export: Option<ExportData>,
        probe_calls: AtomicUsize,
        fetch_calls: AtomicUsize,
        delay: Option<StdDuration>,
    }

    impl FakeRemote {
        fn up(export: ExportData) -> Self {
            Self {
                export: Some(export),
                probe_calls: AtomicUsize::new(0),
                fetch_calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn down() -> Self {
            Self {
                export: None,
                probe_calls: AtomicUsize::new(0),
                fetch_calls: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn with_delay(mut self, delay: StdDuration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl RemoteSource for FakeRemote {
        async fn fetch_version(&self) -> Result<String> {
            self.probe_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.export
                .as_ref()
                .map(|e| e.version.clone())
                .ok_or_else(|| anyhow::anyhow!("backend unreachable"))
        }

        async fn fetch_export(&self) -> Result<ExportData> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.export
                .clone()
                .ok_or_else(|| anyhow::anyhow!("backend unreachable"))
        }
    }

    /// In-memory store fake.
    #[derive(Default)]
    struct MemStore {
        snapshot: std::sync::Mutex<Option<ExportData>>,
    }

    impl MemStore {
        fn seeded(export: ExportData) -> Self {
            Self {
                snapshot: std::sync::Mutex::new(Some(export)),
            }
        }

        fn persisted_version(&self) -> Option<String> {
            self.snapshot
                .lock()
                .unwrap()
                .as_ref()
                .map(|e| e.version.clone())
        }
    }

    impl DurableStore for MemStore {
        fn load_version(&self) -> Result<Option<String>> {
            Ok(self.persisted_version())
        }

        fn load_sites(&self) -> Result<Option<Vec<Site>>> {
            Ok(self
                .snapshot
                .lock()
                .unwrap()
                .as_ref()
                .map(|e| e.sites.clone()))
        }

        fn load_meta(&self) -> Result<Option<SnapshotMeta>> {
            Ok(self.snapshot.lock().unwrap().as_ref().map(|e| SnapshotMeta {
                version: e.version.clone(),
                generated: e.generated.clone(),
                last_update: String::new(),
                stats: e.stats.clone(),
            }))
        }

        fn persist(&self, export: &ExportData) -> Result<()> {
            *self.snapshot.lock().unwrap() = Some(export.clone());
            Ok(())
        }
    }

    fn cache_with(
        remote: Arc<FakeRemote>,
        store: Arc<MemStore>,
        policy: SyncPolicy,
    ) -> SyncCache {
        SyncCache::with_policy(remote, store, policy).with_bundled(vec![site("bundled", 5.0)])
    }

    async fn wait_for_persist(store: &MemStore, version: &str) {
        for _ in 0..100 {
            if store.persisted_version().as_deref() == Some(version) {
                return;
            }
            tokio::time::sleep(StdDuration::from_millis(10)).await;
        }
        panic!("snapshot for version {version} was never persisted");
    }

    #[tokio::test]
    async fn test_first_sync_fetches_then_memory_serves() {
        let remote = Arc::new(FakeRemote::up(export("100", vec![site("a", 8.0)])));
        let store = Arc::new(MemStore::default());
        let cache = cache_with(Arc::clone(&remote), Arc::clone(&store), SyncPolicy::default());

        let first = cache.sync().await;
        assert_eq!(first.source, DataSource::Remote);
        assert!(!first.from_cache);
        assert_eq!(first.sites.len(), 1);
        assert_eq!(remote.probe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);

        // Within the freshness window: no further network traffic and
        // identical data.
        let second = cache.sync().await;
        assert_eq!(second.source, DataSource::Memory);
        assert!(second.from_cache);
        assert_eq!(second.sites, first.sites);
        assert_eq!(remote.probe_calls.load(Ordering::SeqCst), 1);
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_equal_versions_promote_persisted_snapshot() {
        let snapshot = export("100", vec![site("persisted", 7.0)]);
        let remote = Arc::new(FakeRemote::up(export("100", vec![site("remote", 9.0)])));
        let store = Arc::new(MemStore::seeded(snapshot));
        let cache = cache_with(Arc::clone(&remote), store, SyncPolicy::default());

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Persisted);
        assert_eq!(result.sites[0].id, "persisted");
        assert_eq!(result.version.as_deref(), Some("100"));
        // Probe only, no full fetch.
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 0);

        // The promoted snapshot now counts as fresh memory.
        let again = cache.sync().await;
        assert_eq!(again.source, DataSource::Memory);
        assert_eq!(remote.probe_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_newer_remote_triggers_fetch_and_background_persist() {
        let old = export("1700000000000", vec![site("old", 6.0)]);
        let new = export("1700003600000", vec![site("new", 9.5)]);
        let remote = Arc::new(FakeRemote::up(new));
        let store = Arc::new(MemStore::seeded(old));
        let cache = cache_with(Arc::clone(&remote), Arc::clone(&store), SyncPolicy::default());

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Remote);
        assert_eq!(result.sites[0].id, "new");
        assert_eq!(result.version.as_deref(), Some("1700003600000"));
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);

        wait_for_persist(&store, "1700003600000").await;
    }

    #[tokio::test]
    async fn test_remote_failure_serves_persisted_snapshot() {
        let remote = Arc::new(FakeRemote::down());
        let store = Arc::new(MemStore::seeded(export("100", vec![site("kept", 7.0)])));
        let cache = cache_with(remote, store, SyncPolicy::default());

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Persisted);
        assert_eq!(result.sites[0].id, "kept");
        assert!(!result.is_degraded());
    }

    #[tokio::test]
    async fn test_remote_failure_without_snapshot_uses_bundled() {
        let cache = cache_with(
            Arc::new(FakeRemote::down()),
            Arc::new(MemStore::default()),
            SyncPolicy::default(),
        );

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Bundled);
        assert_eq!(result.sites[0].id, "bundled");
    }

    #[tokio::test]
    async fn test_nothing_anywhere_is_explicitly_unavailable() {
        let cache = SyncCache::new(Arc::new(FakeRemote::down()), Arc::new(MemStore::default()))
            .with_bundled(Vec::new());

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Unavailable);
        assert!(result.sites.is_empty());
        assert!(result.is_degraded());
        assert!(cache.get_sites().await.is_empty());
    }

    #[tokio::test]
    async fn test_stale_memory_beats_reprobing_within_check_interval() {
        // Freshness of zero makes every entry stale immediately, while
        // the check interval still limits probe frequency.
        let policy = SyncPolicy {
            freshness_minutes: 0,
            check_interval_minutes: 60,
        };
        let remote = Arc::new(FakeRemote::up(export("100", vec![site("a", 8.0)])));
        let store = Arc::new(MemStore::default());
        let cache = cache_with(Arc::clone(&remote), store, policy);

        assert_eq!(cache.sync().await.source, DataSource::Remote);
        let again = cache.sync().await;
        assert_eq!(again.source, DataSource::Memory);
        assert!(again.from_cache);
        assert_eq!(remote.probe_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_stale_callers_share_one_fetch() {
        let policy = SyncPolicy {
            freshness_minutes: 0,
            check_interval_minutes: 60,
        };
        let remote = Arc::new(
            FakeRemote::up(export("100", vec![site("a", 8.0)]))
                .with_delay(StdDuration::from_millis(50)),
        );
        let store = Arc::new(MemStore::default());
        let cache = Arc::new(cache_with(Arc::clone(&remote), store, policy));

        let (left, right) = tokio::join!(cache.sync(), cache.sync());
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);
        assert_eq!(left.sites, right.sites);
        assert!(!left.sites.is_empty());
    }

    #[tokio::test]
    async fn test_force_sync_persists_before_returning() {
        let remote = Arc::new(FakeRemote::up(export("200", vec![site("forced", 9.0)])));
        let store = Arc::new(MemStore::default());
        let cache = cache_with(remote, Arc::clone(&store), SyncPolicy::default());

        cache.force_sync().await.expect("force sync");
        assert_eq!(store.persisted_version().as_deref(), Some("200"));

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Memory);
        assert_eq!(result.sites[0].id, "forced");
    }

    #[tokio::test]
    async fn test_force_sync_surfaces_backend_failure() {
        let cache = cache_with(
            Arc::new(FakeRemote::down()),
            Arc::new(MemStore::default()),
            SyncPolicy::default(),
        );
        assert!(cache.force_sync().await.is_err());
    }

    #[tokio::test]
    async fn test_version_info_and_conditional_force_sync() {
        let remote = Arc::new(FakeRemote::up(export("200", vec![site("new", 9.0)])));
        let store = Arc::new(MemStore::seeded(export("100", vec![site("old", 6.0)])));
        let cache = cache_with(remote, Arc::clone(&store), SyncPolicy::default());

        let before = Utc::now();
        let info = cache.version_info().await;
        assert_eq!(info.local.as_deref(), Some("100"));
        assert_eq!(info.remote.as_deref(), Some("200"));
        assert!(info.comparison.needs_update);
        assert!(info.checked_at >= before && info.checked_at <= Utc::now());

        assert!(cache.force_sync_if_needed().await.expect("conditional sync"));
        assert_eq!(store.persisted_version().as_deref(), Some("200"));

        // Already current now: no second sync.
        assert!(!cache.force_sync_if_needed().await.expect("no-op sync"));
    }

    #[tokio::test]
    async fn test_snapshot_meta_reflects_persisted_state() {
        let store = Arc::new(MemStore::default());
        let remote = Arc::new(FakeRemote::up(export("200", vec![site("a", 8.0)])));
        let cache = cache_with(remote, Arc::clone(&store), SyncPolicy::default());

        // Never synced: no metadata.
        assert!(cache.snapshot_meta().is_none());

        cache.force_sync().await.expect("force sync");
        let meta = cache.snapshot_meta().expect("meta after sync");
        assert_eq!(meta.version, "200");
        assert_eq!(meta.stats.total, 1);
    }

    #[tokio::test]
    async fn test_unparseable_local_version_forces_full_fetch() {
        let snapshot = export("not-a-timestamp", vec![site("old", 6.0)]);
        let remote = Arc::new(FakeRemote::up(export("1700000000000", vec![site("new", 9.0)])));
        let store = Arc::new(MemStore::seeded(snapshot));
        let cache = cache_with(Arc::clone(&remote), store, SyncPolicy::default());

        let result = cache.sync().await;
        assert_eq!(result.source, DataSource::Remote);
        assert_eq!(remote.fetch_calls.load(Ordering::SeqCst), 1);
    }
}
