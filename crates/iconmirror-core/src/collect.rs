//! Manifest Collector: sources in, flat list of icon references out.

use iconmirror_fetch::{Fetcher, HttpClient};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::manifest::{ManifestError, fetch_manifest, icon_entries};
use crate::model::{IconReference, SourceDefinition};

#[derive(Debug, Default)]
pub struct Collection {
    /// In discovery order; `references[i].index == i`.
    pub references:     Vec<IconReference>,
    /// Labels of sources that contributed nothing because they failed.
    pub failed_sources: Vec<String>,
}

/// Fetch every source's manifest and extract its icon references.
///
/// A source that cannot be fetched or parsed is logged and skipped. Stops
/// early, keeping what was gathered, once `cancel` fires.
pub async fn collect_references<C: HttpClient>(
    fetcher: &Fetcher<C>,
    sources: &[SourceDefinition],
    cancel: &CancellationToken,
) -> Collection {
    let mut collection = Collection::default();

    for source in sources {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            result = collect_source(fetcher, source, collection.references.len()) => result,
        };

        match result {
            Ok(references) => {
                info!(source = %source.label, icons = references.len(), "collected source");
                collection.references.extend(references);
            }
            Err(e) => {
                warn!(source = %source.label, url = %source.manifest_url, error = %e, "skipping source");
                collection.failed_sources.push(source.label.clone());
            }
        }
    }

    collection
}

async fn collect_source<C: HttpClient>(
    fetcher: &Fetcher<C>,
    source: &SourceDefinition,
    first_index: usize,
) -> Result<Vec<IconReference>, ManifestError> {
    let manifest = fetch_manifest(fetcher, &source.manifest_url).await?;
    let entries = icon_entries(&manifest)?;
    Ok(entries
        .into_iter()
        .enumerate()
        .map(|(i, (name, url))| IconReference::new(first_index + i, name, url, source))
        .collect())
}
