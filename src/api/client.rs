//! API client for the catalog backend's export endpoints.
//!
//! This module provides the `ExportClient` struct for fetching the
//! site-catalog export, its version token, and backend health.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::ExportData;

use super::{ApiError, RemoteSource};

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// A probe or fetch that hangs must fail fast so callers can fall back
/// to local data instead of blocking a page render.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Path of the full export endpoint (also serves the version probe).
const EXPORT_PATH: &str = "/api/export";

/// Path of the health endpoint.
const HEALTH_PATH: &str = "/api/health";

/// Wire envelope around the export payload.
#[derive(Debug, Deserialize)]
struct ExportEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<ExportData>,
}

/// Minimal envelope for the version probe: parse nothing but the token.
#[derive(Debug, Deserialize)]
struct VersionEnvelope {
    data: Option<VersionField>,
}

#[derive(Debug, Deserialize)]
struct VersionField {
    version: Option<String>,
}

/// Backend reachability report. Never an error: an unreachable backend
/// is a state to display, not a failure to propagate.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub backend_ok: bool,
    pub status: String,
    pub checked_at: DateTime<Utc>,
}

/// HTTP client for the catalog backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ExportClient {
    client: Client,
    base_url: String,
}

impl ExportClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a client with an explicit request timeout.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    fn export_url(&self) -> String {
        format!("{}{}", self.base_url, EXPORT_PATH)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Fetch the full dataset export.
    ///
    /// A 2xx response with `success: false` or a missing `data` field is
    /// rejected the same way as a transport failure: never partially
    /// adopt a payload the backend itself flags as bad.
    pub async fn fetch_export(&self) -> Result<ExportData> {
        let url = self.export_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;

        let text = response.text().await.context("Failed to read export response body")?;
        let envelope: ExportEnvelope =
            serde_json::from_str(&text).context("Failed to parse export response")?;

        if !envelope.success {
            return Err(ApiError::InvalidResponse(
                "export endpoint reported success=false".to_string(),
            )
            .into());
        }

        let export = envelope.data.ok_or_else(|| {
            ApiError::InvalidResponse("export payload missing data field".to_string())
        })?;

        debug!(
            version = %export.version,
            sites = export.sites.len(),
            "Export fetched"
        );
        Ok(export)
    }

    /// Fetch only the current dataset version token.
    ///
    /// Reuses the export endpoint but parses nothing beyond the token,
    /// so a change in the rest of the payload shape cannot break the probe.
    pub async fn fetch_version(&self) -> Result<String> {
        let url = self.export_url();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to send version probe to {}", url))?;

        let response = Self::check_response(response).await?;

        let text = response.text().await.context("Failed to read version probe body")?;
        let envelope: VersionEnvelope =
            serde_json::from_str(&text).context("Failed to parse version probe response")?;

        envelope
            .data
            .and_then(|d| d.version)
            .ok_or_else(|| {
                ApiError::InvalidResponse("version probe payload missing version".to_string())
                    .into()
            })
    }

    /// Report backend reachability. Degrades instead of erroring.
    pub async fn check_health(&self) -> HealthStatus {
        let url = format!("{}{}", self.base_url, HEALTH_PATH);
        match self.client.get(&url).send().await {
            Ok(response) if response.status().is_success() => HealthStatus {
                backend_ok: true,
                status: "ok".to_string(),
                checked_at: Utc::now(),
            },
            Ok(response) => {
                warn!(status = %response.status(), "Health check returned non-success");
                HealthStatus {
                    backend_ok: false,
                    status: format!("backend returned {}", response.status()),
                    checked_at: Utc::now(),
                }
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                HealthStatus {
                    backend_ok: false,
                    status: "unreachable".to_string(),
                    checked_at: Utc::now(),
                }
            }
        }
    }
}

#[async_trait]
impl RemoteSource for ExportClient {
    async fn fetch_version(&self) -> Result<String> {
        ExportClient::fetch_version(self).await
    }

    async fn fetch_export(&self) -> Result<ExportData> {
        ExportClient::fetch_export(self).await
    }
}
