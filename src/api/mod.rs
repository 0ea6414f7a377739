//! HTTP client module for the catalog backend.
//!
//! This module provides the `ExportClient` for fetching the site-catalog
//! export and its version token, plus the `RemoteSource` trait that the
//! sync layer consumes so tests can substitute a fake backend.

pub mod client;
pub mod error;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::ExportData;

pub use client::{ExportClient, HealthStatus};
pub use error::ApiError;

/// What the sync layer needs from a remote backend: a cheap version
/// probe and the full dataset fetch. Any error counts as "backend
/// unavailable" and sends the caller down the fallback chain.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch only the current dataset version token.
    async fn fetch_version(&self) -> Result<String>;

    /// Fetch the full dataset export.
    async fn fetch_export(&self) -> Result<ExportData>;
}
