//! Error types for iconmirror-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl Error {
    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::Status { status, .. } => crate::core::is_retryable_status(*status),
            Error::InvalidUrl(_) | Error::Client(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
