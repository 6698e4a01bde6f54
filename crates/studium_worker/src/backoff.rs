//! Backoff policy: pure decision functions, no side effects.
//!
//! Classification is text-based on the error's display form. Transport
//! errors embed their HTTP status code in the message, so "503" and "429"
//! match here without the policy knowing anything about HTTP.

use regex::Regex;
use std::sync::LazyLock;
use std::time::Duration;

/// Total attempts per invocation: 1 initial + 2 retries.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay before the first retry; doubles per attempt.
pub const BASE_DELAY: Duration = Duration::from_secs(5);

/// Error-text tokens that signal a fault worth retrying: rate limiting,
/// overload, timeouts, and temporary unavailability.
static TRANSIENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:503|429|overloaded|temporar|timeout|timed\s*out|try again|unavailable|quota)")
        .expect("transient pattern is valid")
});

/// Classify an error message as transient (retryable) or permanent.
///
/// Anything not matching the transient token set is permanent.
///
/// # Examples
///
/// ```
/// use studium_worker::backoff::is_transient;
///
/// assert!(is_transient("HTTP 503 error: service unavailable"));
/// assert!(!is_transient("invalid schema"));
/// ```
pub fn is_transient(message: &str) -> bool {
    TRANSIENT_PATTERN.is_match(message)
}

/// Compute the backoff delay before retrying after `attempt` (1-indexed).
///
/// `5s * 2^(attempt-1)`: attempt 1 → 5s, attempt 2 → 10s, attempt 3 → 20s.
pub fn delay_for(attempt: u32) -> Duration {
    BASE_DELAY * 2u32.pow(attempt.saturating_sub(1))
}
