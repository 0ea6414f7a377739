//! Offline-first synchronization for a remote site-catalog export.
//!
//! The crate keeps an always-available local copy of a scored website
//! catalog published by a backend as a versioned JSON export. The core
//! piece is [`SyncCache`]: it serves an in-memory cache while fresh,
//! rate-limits cheap version probes, fetches the full export only when
//! the version token says the local copy is behind, and degrades through
//! a persisted snapshot and a bundled dataset when the backend is
//! unreachable. Callers always get a `Vec<Site>`; failures never
//! propagate past the sync layer.
//!
//! ```no_run
//! use std::sync::Arc;
//! use vitrine::{Config, ExportClient, FsStore, SyncCache};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = ExportClient::with_timeout(&config.api_base_url, config.request_timeout())?;
//! let store = FsStore::new(config.data_dir()?)?;
//! let cache = SyncCache::with_policy(Arc::new(client), Arc::new(store), config.policy());
//!
//! let sites = cache.get_sites().await;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod bundled;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod models;
pub mod version;

pub use api::{ApiError, ExportClient, HealthStatus, RemoteSource};
pub use cache::{DataSource, DurableStore, FsStore, NoopStore, SyncCache, SyncPolicy, SyncResult};
pub use config::Config;
pub use models::{ExportData, Site};
pub use version::{compare, VersionComparison};
