use std::path::Path;

use tempfile::TempDir;

use crate::{Error, Result};

/// Scratch directory owned for the lifetime of the value.
///
/// The directory and everything in it is removed on drop.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Create a fresh, uniquely named directory inside `parent`, creating
    /// `parent` first when needed.
    pub fn create_in(parent: impl AsRef<Path>, prefix: &str) -> Result<Self> {
        let parent = parent.as_ref();
        std::fs::create_dir_all(parent).map_err(|e| Error::CreateDir {
            path:   parent.to_path_buf(),
            source: e,
        })?;

        let dir = tempfile::Builder::new()
            .prefix(prefix)
            .tempdir_in(parent)
            .map_err(|e| Error::CreateDir {
                path:   parent.join(prefix),
                source: e,
            })?;

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path { self.dir.path() }
}
