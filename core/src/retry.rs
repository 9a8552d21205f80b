//! Fixed-count retry policy.
//!
//! The policy is data only; the host that owns the network loops on it.
//! Retries are immediate and apply to both failure classes (no status and
//! non-2xx status). Writes are attempted once unless explicitly opted in.

use crate::error::ApiError;
use crate::http::HttpMethod;

/// Additional attempts after the first failed one.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Repeat POST/PUT/DELETE too. Off by default: a write that timed out
    /// may still have been applied.
    pub retry_non_idempotent: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_non_idempotent: false,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            retry_non_idempotent: false,
        }
    }

    /// Total number of attempts allowed for `method`, first one included.
    pub fn attempts_for(&self, method: HttpMethod) -> u32 {
        if method.is_safe_to_repeat() || self.retry_non_idempotent {
            self.max_retries.saturating_add(1)
        } else {
            1
        }
    }

    /// Whether another attempt should follow `attempt` (1-based) failing with `error`.
    pub fn should_retry(&self, method: HttpMethod, attempt: u32, error: &ApiError) -> bool {
        error.is_retryable() && attempt < self.attempts_for(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refused() -> ApiError {
        ApiError::Connectivity("connection refused".to_string())
    }

    #[test]
    fn reads_get_three_attempts_by_default() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts_for(HttpMethod::Get), 3);
        assert!(policy.should_retry(HttpMethod::Get, 1, &refused()));
        assert!(policy.should_retry(HttpMethod::Get, 2, &refused()));
        assert!(!policy.should_retry(HttpMethod::Get, 3, &refused()));
    }

    #[test]
    fn writes_get_one_attempt_by_default() {
        let policy = RetryPolicy::default();
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete] {
            assert_eq!(policy.attempts_for(method), 1);
            assert!(!policy.should_retry(method, 1, &refused()));
        }
    }

    #[test]
    fn writes_can_opt_in() {
        let policy = RetryPolicy {
            retry_non_idempotent: true,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.attempts_for(HttpMethod::Post), 3);
    }

    #[test]
    fn http_errors_are_retried_like_connectivity_errors() {
        let not_found = ApiError::Http {
            status: 404,
            body: String::new(),
        };
        assert!(RetryPolicy::default().should_retry(HttpMethod::Get, 1, &not_found));
    }

    #[test]
    fn decode_errors_are_never_retried() {
        let err = ApiError::Deserialization("expected value".to_string());
        assert!(!RetryPolicy::default().should_retry(HttpMethod::Get, 1, &err));
    }

    #[test]
    fn huge_retry_count_saturates() {
        let policy = RetryPolicy {
            max_retries: u32::MAX,
            retry_non_idempotent: false,
        };
        assert_eq!(policy.attempts_for(HttpMethod::Get), u32::MAX);
        assert!(policy.should_retry(HttpMethod::Get, 1, &refused()));
        assert!(!policy.should_retry(HttpMethod::Get, u32::MAX, &refused()));
    }

    #[test]
    fn none_means_single_attempt() {
        assert_eq!(RetryPolicy::none().attempts_for(HttpMethod::Get), 1);
    }
}
