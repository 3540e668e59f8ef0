//! Icon Fetch Worker: one reference in, one stored asset out.

use std::sync::Arc;

use iconmirror_fetch::{Fetcher, HttpClient};
use iconmirror_store::ContentStore;
use tracing::debug;

use crate::error::IconError;
use crate::image::ImageFormat;
use crate::model::{FetchOutcome, IconReference, public_url};

pub struct IconWorker<C: HttpClient> {
    fetcher:  Arc<Fetcher<C>>,
    store:    Arc<ContentStore>,
    base_url: String,
}

impl<C: HttpClient> IconWorker<C> {
    /// `base_url` is prepended to stored paths to form the public URL; pass
    /// `""` to reference assets by relative path.
    pub fn new(fetcher: Arc<Fetcher<C>>, store: Arc<ContentStore>, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            store,
            base_url: base_url.into(),
        }
    }

    /// Download, sniff, hash and store one icon.
    pub async fn process(&self, reference: &IconReference) -> Result<FetchOutcome, IconError> {
        let url = &reference.url;
        let bytes = self.fetcher.get(url).await?;
        if bytes.is_empty() {
            return Err(IconError::Empty { url: url.clone() });
        }

        let format = ImageFormat::sniff(&bytes).ok_or_else(|| IconError::UnsupportedFormat { url: url.clone() })?;

        let asset = self
            .store
            .put(&bytes, format.extension())
            .map_err(|source| IconError::Store {
                url: url.clone(),
                source,
            })?;

        debug!(url = %url, format = %format, hash = %asset.hash, created = asset.created, "stored icon");

        Ok(FetchOutcome {
            public_url: public_url(&self.base_url, &asset.path),
            content_hash: asset.hash,
            local_path: asset.path,
            original_url: url.clone(),
            size: asset.size,
            reference: reference.clone(),
        })
    }
}
