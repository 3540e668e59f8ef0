use std::time::Duration;

/// Network timeouts applied by the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish a connection.
    pub connect: Duration,
    /// Time allowed for the whole request, body included.
    pub total:   Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            total:   Duration::from_secs(20),
        }
    }
}

/// Upper bound on [`FetchOptions::max_retries`].
pub const MAX_RETRIES: u32 = 2;

/// Retry policy for a [`Fetcher`](crate::Fetcher).
///
/// # Examples
///
/// ```
/// use iconmirror_fetch::FetchOptions;
/// use std::time::Duration;
///
/// let options = FetchOptions::default()
///     .max_retries(1)
///     .retry_backoff(Duration::from_millis(200));
/// assert_eq!(options.max_retries, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Retries after the initial attempt, for transient failures only.
    ///
    /// Default and maximum: [`MAX_RETRIES`]
    pub max_retries:   u32,
    /// Fixed delay between attempts.
    ///
    /// Default: 500ms
    pub retry_backoff: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_retries:   MAX_RETRIES,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl FetchOptions {
    /// Values above [`MAX_RETRIES`] are clamped.
    #[must_use]
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.min(MAX_RETRIES);
        self
    }

    #[must_use]
    pub fn retry_backoff(mut self, retry_backoff: Duration) -> Self {
        self.retry_backoff = retry_backoff;
        self
    }
}
