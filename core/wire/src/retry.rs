//! Stream retry classification and backoff.

use std::time::Duration;

const BASE_BACKOFF: Duration = Duration::from_secs(2);
const BACKOFF_FACTOR: u32 = 2;
const CAPPED_BACKOFF: Duration = Duration::from_secs(30);
/// Cap used when the provider supplies its own `Retry-After`/`Retry-After-Ms`
/// header: effectively unbounded (2^31 - 1 ms), since the provider is
/// telling us exactly how long to wait.
const HEADER_BACKOFF_CAP_MS: u64 = (1u64 << 31) - 1;

/// A stream failure, classified for retry purposes.
#[derive(Debug, Clone)]
pub enum StreamFailure {
    Connection,
    Timeout,
    Status { code: u16, retry_after: Option<Duration> },
}

impl StreamFailure {
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection | Self::Timeout => true,
            Self::Status { code, .. } => *code == 429 || (500..600).contains(code),
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Retry policy for one stream attempt sequence. The caller sets the retry
/// budget (typically 2 for a main turn, 0 for a compaction turn); retries
/// restart the stream from scratch and discard partial deltas from the
/// failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct SessionRetry {
    pub max_retries: u32,
}

impl SessionRetry {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Whether `attempt` (0-indexed, the attempt that just failed) should be
    /// retried at all, independent of the failure's own retryability.
    pub fn has_budget(&self, attempt: u32) -> bool {
        attempt < self.max_retries
    }

    /// Delay to wait before the `attempt`-th retry (0-indexed: the first
    /// retry is `attempt == 0`). Honors the failure's `Retry-After` header
    /// when present; otherwise backs off exponentially from a 2s base,
    /// factor 2, capped at 30s.
    pub fn backoff(&self, attempt: u32, failure: &StreamFailure) -> Duration {
        if let Some(retry_after) = failure.retry_after() {
            let capped_ms = retry_after.as_millis().min(HEADER_BACKOFF_CAP_MS as u128) as u64;
            return Duration::from_millis(capped_ms);
        }

        let multiplier = BACKOFF_FACTOR.saturating_pow(attempt);
        let scaled = BASE_BACKOFF.saturating_mul(multiplier);
        scaled.min(CAPPED_BACKOFF)
    }

    /// Whether `failure` should be retried at `attempt` at all, combining
    /// the failure's own retryability with remaining budget.
    pub fn should_retry(&self, attempt: u32, failure: &StreamFailure) -> bool {
        failure.is_retryable() && self.has_budget(attempt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_and_timeout_are_retryable() {
        assert!(StreamFailure::Connection.is_retryable());
        assert!(StreamFailure::Timeout.is_retryable());
    }

    #[test]
    fn status_429_and_5xx_are_retryable() {
        assert!(StreamFailure::Status { code: 429, retry_after: None }.is_retryable());
        assert!(StreamFailure::Status { code: 503, retry_after: None }.is_retryable());
        assert!(!StreamFailure::Status { code: 400, retry_after: None }.is_retryable());
        assert!(!StreamFailure::Status { code: 404, retry_after: None }.is_retryable());
    }

    #[test]
    fn backoff_without_header_is_exponential_capped_at_30s() {
        let retry = SessionRetry::new(5);
        let failure = StreamFailure::Connection;
        assert_eq!(retry.backoff(0, &failure), Duration::from_secs(2));
        assert_eq!(retry.backoff(1, &failure), Duration::from_secs(4));
        assert_eq!(retry.backoff(2, &failure), Duration::from_secs(8));
        assert_eq!(retry.backoff(3, &failure), Duration::from_secs(16));
        assert_eq!(retry.backoff(4, &failure), Duration::from_secs(30));
        assert_eq!(retry.backoff(10, &failure), Duration::from_secs(30));
    }

    #[test]
    fn backoff_honors_retry_after_header() {
        let retry = SessionRetry::new(2);
        let failure = StreamFailure::Status {
            code: 429,
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(retry.backoff(0, &failure), Duration::from_secs(5));
    }

    #[test]
    fn budget_of_zero_never_retries() {
        let retry = SessionRetry::new(0);
        assert!(!retry.has_budget(0));
        assert!(!retry.should_retry(0, &StreamFailure::Connection));
    }

    #[test]
    fn should_retry_requires_both_retryable_and_budget() {
        let retry = SessionRetry::new(1);
        assert!(retry.should_retry(0, &StreamFailure::Connection));
        assert!(!retry.should_retry(1, &StreamFailure::Connection));
        assert!(!retry.should_retry(0, &StreamFailure::Status { code: 400, retry_after: None }));
    }
}
