use crate::{Error, Result};

pub fn is_success(status: u16) -> bool { (200..300).contains(&status) }

/// 5xx and 429 are worth retrying; any other non-2xx status is final.
pub fn is_retryable_status(status: u16) -> bool { status >= 500 || status == 429 }

/// Reject URLs that can never be fetched before touching the network.
///
/// The literal `null` shows up in upstream manifests where a field was
/// serialized from a missing value.
pub fn validate_url(url: &str) -> Result<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
        return Err(Error::InvalidUrl(url.to_string()));
    }
    let lower = trimmed.to_ascii_lowercase();
    let host = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"))
        .ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    if host.is_empty() || host.starts_with('/') {
        return Err(Error::InvalidUrl(url.to_string()));
    }
    Ok(trimmed)
}
