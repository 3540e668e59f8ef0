//! One full run: collect, fetch, resolve, write the catalog, rewrite manifests
//! and report.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use iconmirror_core::catalog::{CatalogOptions, build_catalog, load_catalog, write_catalog};
use iconmirror_core::collect::collect_references;
use iconmirror_core::pool::{FetchPool, PoolOptions, PoolProgress, default_concurrency};
use iconmirror_core::report::{RunSummary, Trigger, commit_message, update_log};
use iconmirror_core::resolve::resolve;
use iconmirror_core::rewrite::rewrite_sources;
use iconmirror_core::sources::load_sources;
use iconmirror_core::worker::IconWorker;
use iconmirror_fetch::{Fetcher, HttpClient, ReqwestClient};
use iconmirror_fs::{AtomicWriteOptions, atomic_write};
use iconmirror_store::ContentStore;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::Settings;
use crate::ui::tracker::{ProgressTrackerBuilder, Tracker};

/// Run against the network with the production HTTP client.
pub async fn run(settings: &Settings, quiet: bool, cancel: &CancellationToken) -> Result<RunSummary> {
    let client = ReqwestClient::new(settings.timeouts(), &settings.user_agent).context("failed to build HTTP client")?;
    let fetcher = Fetcher::new(client).with_options(settings.fetch_options());
    let trigger = Trigger::from_event(std::env::var("GITHUB_EVENT_NAME").ok().as_deref());

    run_with(settings, Arc::new(fetcher), trigger, quiet, cancel).await
}

pub async fn run_with<C: HttpClient + 'static>(
    settings: &Settings,
    fetcher: Arc<Fetcher<C>>,
    trigger: Trigger,
    quiet: bool,
    cancel: &CancellationToken,
) -> Result<RunSummary> {
    let started = Instant::now();

    // prerequisites
    let sources = load_sources(&settings.sources)?;
    let store = Arc::new(
        ContentStore::open(&settings.assets_dir)
            .with_context(|| format!("cannot prepare assets directory {}", settings.assets_dir.display()))?,
    );
    for stale in [&settings.update_log, &settings.commit_message].into_iter().flatten() {
        remove_stale(stale)?;
    }

    let base_url = settings.base_url();
    if base_url.is_empty() {
        warn!("no repository or base URL configured, catalog will use relative paths");
    } else {
        info!(%base_url, "public URL prefix");
    }

    info!(sources = sources.len(), "collecting manifests");
    let collection = collect_references(&fetcher, &sources, cancel).await;
    let collected = collection.references.len();

    let concurrency = settings.concurrency.unwrap_or_else(default_concurrency);
    info!(icons = collected, concurrency, "fetching icons");
    let tracker = ProgressTrackerBuilder::default()
        .with_len(collected as u64)
        .with_prefix("Fetching")
        .with_finish("done")
        .hidden(quiet)
        .build();
    let step = tracker.clone();
    let pool = FetchPool::new(IconWorker::new(Arc::clone(&fetcher), Arc::clone(&store), base_url)).with_options(
        PoolOptions::default()
            .concurrency(concurrency)
            .on_progress(Arc::new(move |p: &PoolProgress| {
                step.step(p.completed as u64, p.succeeded as u64);
            })),
    );
    let report = pool.run(collection.references, cancel).await;
    tracker.finish();
    info!(
        stored = report.outcomes.len(),
        failed = report.failed,
        attempted = report.attempted,
        "fetch finished"
    );

    let resolution = resolve(report.outcomes);
    info!(
        unique = resolution.groups.len(),
        duplicates = resolution.duplicates_removed(),
        mapped_urls = resolution.url_map.len(),
        "resolved identities"
    );
    let previous = load_catalog(&settings.catalog);
    let options = CatalogOptions {
        name:    settings.catalog_name.clone(),
        archive: settings.archive,
    };
    let build = build_catalog(&resolution, previous.as_ref(), &options);
    write_catalog(&settings.catalog, &build.catalog)
        .with_context(|| format!("failed to write catalog {}", settings.catalog.display()))?;
    info!(path = %settings.catalog.display(), icons = build.catalog.icons.len(), "catalog written");

    let rewrite = rewrite_sources(&fetcher, &sources, &resolution.url_map, cancel).await;

    if let Some(path) = &settings.update_log
        && let Some(log) = update_log(&build.newly_added)
    {
        write_text(path, &log, "update log");
    }
    if let Some(path) = &settings.commit_message {
        write_text(path, &commit_message(&build.newly_added, trigger, Utc::now()), "commit message");
    }

    let summary = RunSummary {
        collected,
        processed: build.summary.processed,
        unique: build.summary.unique,
        duplicates_removed: build.summary.duplicates_removed,
        catalog_size: build.summary.catalog_size,
        authors: build.summary.authors,
        newly_added: build.newly_added,
        failed_sources: collection.failed_sources,
        manifests_written: rewrite.written.len(),
        cancelled: report.cancelled || cancel.is_cancelled(),
    };
    info!(
        collected = summary.collected,
        processed = summary.processed,
        unique = summary.unique,
        duplicates_removed = summary.duplicates_removed,
        catalog_size = summary.catalog_size,
        new = summary.newly_added.len(),
        authors = %summary.authors.join(", "),
        failed_sources = summary.failed_sources.len(),
        manifests = summary.manifests_written,
        elapsed = ?started.elapsed(),
        "run complete"
    );

    Ok(summary)
}

fn remove_stale(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != ErrorKind::NotFound => {
            Err(e).with_context(|| format!("cannot remove stale {}", path.display()))
        }
        _ => Ok(()),
    }
}

/// Auxiliary outputs never fail the run.
fn write_text(path: &Path, text: &str, what: &str) {
    let mut content = text.as_bytes().to_vec();
    content.push(b'\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty())
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        warn!(path = %path.display(), error = %e, "cannot write {what}");
        return;
    }
    match atomic_write(path, &content, &AtomicWriteOptions::new()) {
        Ok(()) => info!(path = %path.display(), "{what} written"),
        Err(e) => warn!(path = %path.display(), error = %e, "cannot write {what}"),
    }
}
