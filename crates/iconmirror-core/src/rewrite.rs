//! Manifest Rewriter: re-fetches each source and points its icons at the
//! cached copies.

use std::path::PathBuf;

use iconmirror_fetch::{Fetcher, HttpClient};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::write_json;
use crate::manifest::{ManifestError, fetch_manifest};
use crate::model::SourceDefinition;
use crate::resolve::UrlMap;

#[derive(Debug, Default)]
pub struct RewriteReport {
    pub written: Vec<PathBuf>,
    /// Labels of sources whose manifest could not be fetched, parsed or written.
    pub skipped: Vec<String>,
}

/// Replace the manifest's `name` and `description` and map every icon `url`
/// through `url_map`. Icons whose URL has no mapping, such as ones that
/// failed to download, keep their original URL. Other fields are untouched.
pub fn rewrite_manifest(mut manifest: Value, source: &SourceDefinition, url_map: &UrlMap) -> Result<Value, ManifestError> {
    let object = manifest.as_object_mut().ok_or(ManifestError::NotAnObject)?;
    object.insert("name".into(), Value::String(format!("{} (mirror)", source.label)));
    object.insert(
        "description".into(),
        Value::String(format!("Mirrored from: {}", source.manifest_url)),
    );

    if let Some(icons) = object.get_mut("icons").and_then(Value::as_array_mut) {
        for icon in icons.iter_mut().filter_map(Value::as_object_mut) {
            let mapped = icon
                .get("url")
                .and_then(Value::as_str)
                .and_then(|url| url_map.get(url))
                .map(str::to_owned);
            if let Some(mapped) = mapped {
                icon.insert("url".into(), Value::String(mapped));
            }
        }
    }

    Ok(manifest)
}

/// Rewrite every source's manifest to its `output_path`.
///
/// Manifests are fetched again rather than reused from collection. Failures
/// skip the source with a warning. Stops once `cancel` fires; files already
/// written stay complete because every write is atomic.
pub async fn rewrite_sources<C: HttpClient>(
    fetcher: &Fetcher<C>,
    sources: &[SourceDefinition],
    url_map: &UrlMap,
    cancel: &CancellationToken,
) -> RewriteReport {
    let mut report = RewriteReport::default();
    if url_map.is_empty() {
        debug!("no cached copies, rewritten manifests keep upstream URLs");
    }

    for source in sources {
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            fetched = fetch_manifest(fetcher, &source.manifest_url) => fetched,
        };

        let rewritten = match fetched.and_then(|m| rewrite_manifest(m, source, url_map)) {
            Ok(rewritten) => rewritten,
            Err(e) => {
                warn!(source = %source.label, url = %source.manifest_url, error = %e, "skipping rewrite");
                report.skipped.push(source.label.clone());
                continue;
            }
        };

        match write_json(&source.output_path, &rewritten) {
            Ok(()) => {
                info!(source = %source.label, path = %source.output_path.display(), "rewrote manifest");
                report.written.push(source.output_path.clone());
            }
            Err(e) => {
                warn!(source = %source.label, error = %e, "cannot write rewritten manifest");
                report.skipped.push(source.label.clone());
            }
        }
    }

    report
}
