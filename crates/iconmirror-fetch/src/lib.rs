//! HTTP fetching with bounded retries.
//!
//! # Architecture
//!
//! - [`core`] - Pure decisions (URL validation, status classification)
//! - [`Fetcher`] - Retry orchestration over any [`HttpClient`]
//! - [`ReqwestClient`] - Production client with connect and total timeouts
//!
//! Upstream links rot, so HTTP error statuses are ordinary [`Error`] values
//! rather than panics or aborts. Whether a failure is fatal is the caller's
//! policy.

pub mod core;
mod error;
mod fetcher;
mod http;
mod options;

pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use http::{HttpClient, HttpResponse};
pub use options::{FetchOptions, MAX_RETRIES, Timeouts};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
