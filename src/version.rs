//! Version token comparison for dataset synchronization.
//!
//! Version tokens are opaque strings, millisecond epoch timestamps by
//! convention. The comparator must never panic on arbitrary tokens: a
//! token that fails to parse is treated as "unknown, assume stale" so
//! the catalog favors refreshing content over saving a network call.

use chrono::{DateTime, Utc};

/// Outcome of comparing a local version token against a remote one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VersionComparison {
    /// The local copy should be replaced by a full remote fetch.
    pub needs_update: bool,
    /// The local token is strictly newer than the remote one.
    pub is_newer: bool,
    /// The local token is strictly older than the remote one.
    pub is_older: bool,
    /// The tokens differ (including one side being absent).
    pub is_different: bool,
}

/// Compare a local version token against a remote one.
///
/// Rules, in order: both absent means nothing to do; an absent local is
/// infinitely old; an absent remote cannot improve on what is already
/// local; equal strings are current; otherwise both sides are parsed as
/// decimal integers and compared numerically. If either side fails to
/// parse, the result is the conservative `needs_update = true` with
/// neither `is_newer` nor `is_older` set.
pub fn compare(local: Option<&str>, remote: Option<&str>) -> VersionComparison {
    match (local, remote) {
        (None, None) => VersionComparison::default(),
        (None, Some(_)) => VersionComparison {
            needs_update: true,
            is_older: true,
            is_different: true,
            ..Default::default()
        },
        (Some(_), None) => VersionComparison {
            is_newer: true,
            is_different: true,
            ..Default::default()
        },
        (Some(l), Some(r)) if l == r => VersionComparison::default(),
        (Some(l), Some(r)) => {
            match (l.trim().parse::<i64>(), r.trim().parse::<i64>()) {
                (Ok(local_ts), Ok(remote_ts)) => {
                    let is_older = local_ts < remote_ts;
                    VersionComparison {
                        needs_update: is_older,
                        is_newer: local_ts > remote_ts,
                        is_older,
                        is_different: true,
                    }
                }
                // Unparseable token: unknown age, assume stale.
                _ => VersionComparison {
                    needs_update: true,
                    is_different: true,
                    ..Default::default()
                },
            }
        }
    }
}

/// Render a version token for humans: millisecond epoch tokens become a
/// UTC datetime, anything else is echoed back unchanged.
pub fn format_version(version: Option<&str>) -> String {
    let Some(version) = version else {
        return "unknown".to_string();
    };
    match version.trim().parse::<i64>() {
        Ok(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| version.to_string()),
        Err(_) => version.to_string(),
    }
}
