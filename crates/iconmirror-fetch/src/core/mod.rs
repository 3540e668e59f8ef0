//! Pure decisions for HTTP fetching, free of I/O.

mod validation;

pub use validation::{is_retryable_status, is_success, validate_url};
