//! Local caching module: the sync cache and its durable fallback store.
//!
//! `SyncCache` keeps the in-memory dataset and decides when to probe the
//! backend; `DurableStore` is the persistence seam with a filesystem
//! implementation (`FsStore`) and a no-op one (`NoopStore`) for targets
//! without local storage.

pub mod store;
pub mod sync;

pub use store::{DurableStore, FsStore, NoopStore};
pub use sync::{CacheEntry, DataSource, SyncCache, SyncPolicy, SyncResult, VersionInfo};
