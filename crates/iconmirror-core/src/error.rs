use std::path::PathBuf;

use thiserror::Error;

/// Errors that end the run. Everything below the source level is reported
/// and skipped instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source list {0} not found")]
    SourceListMissing(PathBuf),

    #[error("failed to read source list {path}: {source}")]
    SourceList {
        path:   PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to encode {path}: {source}")]
    Encode {
        path:   PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fs(#[from] iconmirror_fs::Error),

    #[error(transparent)]
    Store(#[from] iconmirror_store::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single icon was dropped from aggregation.
#[derive(Debug, Error)]
pub enum IconError {
    #[error(transparent)]
    Fetch(#[from] iconmirror_fetch::Error),

    #[error("empty download from {url}")]
    Empty { url: String },

    #[error("unsupported content type from {url}")]
    UnsupportedFormat { url: String },

    #[error("failed to store {url}: {source}")]
    Store {
        url:    String,
        #[source]
        source: iconmirror_store::Error,
    },

    #[error("cancelled")]
    Cancelled,
}
