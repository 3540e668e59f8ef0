use bytes::Bytes;
use tracing::debug;

use crate::core::{is_success, validate_url};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::options::FetchOptions;

/// Downloads whole bodies with a bounded retry budget.
pub struct Fetcher<C: HttpClient> {
    client:  C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Fetch `url` and return its body.
    ///
    /// Malformed URLs fail without any network I/O. Transport errors, 5xx and
    /// 429 are retried up to `max_retries` times; other statuses fail at once.
    pub async fn get(&self, url: &str) -> Result<Bytes> {
        let url = validate_url(url)?;
        let mut retry = 0;

        loop {
            let error = match self.client.get(url).await {
                Ok(response) if is_success(response.status) => return Ok(response.body),
                Ok(response) => Error::Status {
                    url:    url.to_string(),
                    status: response.status,
                },
                Err(e) => Error::Network {
                    url:     url.to_string(),
                    message: e.to_string(),
                },
            };

            if !error.is_transient() || retry >= self.options.max_retries {
                return Err(error);
            }

            debug!(url, retry = retry + 1, error = %error, "retrying request");
            tokio::time::sleep(self.options.retry_backoff).await;
            retry += 1;
        }
    }
}
