use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

#[derive(Clone, Debug, Default)]
pub struct AtomicWriteOptions {
    /// Directory for the temporary file. Must live on the same filesystem as
    /// the destination; defaults to the destination's parent.
    pub staging: Option<PathBuf>,
}

impl AtomicWriteOptions {
    pub fn new() -> Self { Self::default() }

    pub fn staging(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging = Some(dir.into());
        self
    }
}

/// Write `content` to `path` through a uniquely named temporary file and a
/// rename. Concurrent writers of the same path each rename a complete file;
/// the last rename wins.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8], options: &AtomicWriteOptions) -> Result<()> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let staging = options.staging.clone().unwrap_or(parent);

    let write_err = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(&staging)
        .map_err(write_err)?;

    tmp.write_all(content).map_err(write_err)?;

    // the temp file is removed by NamedTempFile's drop if persist fails
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::Read {
        path:   path.to_path_buf(),
        source: e,
    })
}
