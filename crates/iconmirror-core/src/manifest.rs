//! Remote source manifests: `{"name": .., "description": .., "icons": [{"name", "url", ..}]}`.

use iconmirror_fetch::{Fetcher, HttpClient};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error(transparent)]
    Fetch(#[from] iconmirror_fetch::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest is not a JSON object")]
    NotAnObject,

    #[error("manifest has no `icons` array")]
    MissingIcons,
}

/// Download and parse the manifest at `url`.
pub async fn fetch_manifest<C: HttpClient>(fetcher: &Fetcher<C>, url: &str) -> Result<Value, ManifestError> {
    let body = fetcher.get(url).await?;
    let manifest: Value = serde_json::from_slice(&body)?;
    if !manifest.is_object() {
        return Err(ManifestError::NotAnObject);
    }
    Ok(manifest)
}

/// `(name, url)` of every icon entry that has both set to a non-empty string.
pub fn icon_entries(manifest: &Value) -> Result<Vec<(&str, &str)>, ManifestError> {
    let icons = manifest
        .get("icons")
        .and_then(Value::as_array)
        .ok_or(ManifestError::MissingIcons)?;

    Ok(icons
        .iter()
        .filter_map(|icon| {
            let name = icon.get("name")?.as_str()?;
            let url = icon.get("url")?.as_str()?;
            (!name.is_empty() && !url.is_empty()).then_some((name, url))
        })
        .collect())
}
