//! vitrine - sync and inspect the local site-catalog snapshot.
//!
//! A small operational CLI around the sync cache: check versions, run a
//! sync, or force a full refresh.

use std::io;
use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vitrine::{catalog, version, Config, DataSource, ExportClient, FsStore, SyncCache};

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn build_cache(config: &Config) -> Result<(SyncCache, ExportClient)> {
    let client = ExportClient::with_timeout(&config.api_base_url, config.request_timeout())?;
    let store = FsStore::new(config.data_dir()?)?;
    let cache = SyncCache::with_policy(
        Arc::new(client.clone()),
        Arc::new(store),
        config.policy(),
    );
    Ok((cache, client))
}

fn print_usage() {
    eprintln!("Usage: vitrine <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  status   Show local/remote dataset versions and backend health");
    eprintln!("  sync     Run one sync pass and report where the data came from");
    eprintln!("  force    Force a full fetch and persist, bypassing freshness checks");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str);

    let config = Config::load()?;
    let (cache, client) = build_cache(&config)?;

    match command {
        Some("status") => {
            let health = client.check_health().await;
            let info = cache.version_info().await;
            println!("backend:  {} ({})", config.api_base_url, health.status);
            println!("local:    {}", version::format_version(info.local.as_deref()));
            println!("remote:   {}", version::format_version(info.remote.as_deref()));
            println!("checked:  {}", info.checked_at.format("%Y-%m-%d %H:%M:%S UTC"));
            match cache.snapshot_meta() {
                Some(meta) => println!(
                    "snapshot: {} sites, {} categories, average score {:.1}",
                    meta.stats.total,
                    meta.stats.categories.len(),
                    meta.stats.avg_vitebutnottoomuch_score
                ),
                None => println!("snapshot: none"),
            }
            println!(
                "state:    {}",
                if info.comparison.needs_update {
                    "update available"
                } else if info.comparison.is_newer {
                    "local ahead of backend"
                } else {
                    "up to date"
                }
            );
        }
        Some("sync") => {
            let result = cache.sync().await;
            let source = match result.source {
                DataSource::Memory => "memory cache",
                DataSource::Remote => "backend",
                DataSource::Persisted => "persisted snapshot",
                DataSource::Bundled => "bundled dataset",
                DataSource::Unavailable => "nowhere - no data available",
            };
            println!(
                "{} sites from {} (version {})",
                result.sites.len(),
                source,
                version::format_version(result.version.as_deref())
            );
            let stats = catalog::stats(&result.sites);
            println!(
                "{} categories, average score {:.1}",
                stats.categories.len(),
                stats.avg_score
            );
            if result.is_degraded() {
                eprintln!("warning: no data source is available");
                std::process::exit(1);
            }
        }
        Some("force") => {
            cache.force_sync().await?;
            println!("forced sync complete");
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }

    Ok(())
}
