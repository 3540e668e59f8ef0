//! Content-addressed storage for downloaded assets.
//!
//! Every blob lives at `<root>/<hash>.<ext>` where `hash` is the
//! [`ContentHash`] of its bytes. Storing the same bytes again is a no-op, which
//! is what deduplicates assets on disk.

mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use iconmirror_fs::{AtomicWriteOptions, Workspace, atomic_write};
use iconmirror_verify::ContentHash;
use tracing::debug;

/// A blob as it exists in the store after [`ContentStore::put`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub hash:    ContentHash,
    pub path:    PathBuf,
    pub size:    u64,
    /// `false` when the blob was already present and the bytes were discarded.
    pub created: bool,
}

#[derive(Debug)]
pub struct ContentStore {
    root:    PathBuf,
    staging: Workspace,
}

impl ContentStore {
    /// Open (creating if needed) a store rooted at `root`.
    ///
    /// A private staging directory is created under `root` for in-flight
    /// writes and removed again when the store is dropped.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let staging = Workspace::create_in(&root, ".staging-")?;
        Ok(Self { root, staging })
    }

    pub fn root(&self) -> &Path { &self.root }

    pub fn path_for(&self, hash: &ContentHash, ext: &str) -> PathBuf {
        self.root.join(format!("{hash}.{ext}"))
    }

    /// Store `bytes` under their content address.
    ///
    /// Safe to call concurrently for the same content: every writer renames a
    /// complete, identical file into place.
    pub fn put(&self, bytes: &[u8], ext: &str) -> Result<StoredAsset> {
        if ext.is_empty() || ext.contains(['/', '\\', '.']) {
            return Err(Error::InvalidExtension(ext.to_string()));
        }

        let hash = ContentHash::of(bytes);
        let path = self.path_for(&hash, ext);
        let size = bytes.len() as u64;

        if path.is_file() {
            debug!(%hash, ext, "store hit");
            return Ok(StoredAsset {
                hash,
                path,
                size,
                created: false,
            });
        }

        atomic_write(&path, bytes, &AtomicWriteOptions::new().staging(self.staging.path()))?;
        debug!(%hash, ext, size, "store write");

        Ok(StoredAsset {
            hash,
            path,
            size,
            created: true,
        })
    }
}
