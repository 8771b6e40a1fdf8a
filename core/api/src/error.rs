//! Error types for the provider-agnostic API client.

use std::time::Duration;

use conduit_error::ErrorExt;
use conduit_error::Location;
use conduit_error::StatusCode;
use conduit_error::stack_trace_debug;
use snafu::Snafu;

/// API client errors.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ApiError {
    /// Transport-level failure (connection reset, DNS, TLS, …).
    #[snafu(display("Network error: {message}"))]
    Network {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Provider rejected the request for exceeding its rate limit.
    #[snafu(display("Rate limited: {message}"))]
    RateLimited {
        message: String,
        retry_after_ms: i64,
        #[snafu(implicit)]
        location: Location,
    },

    /// Provider reported it is overloaded.
    #[snafu(display("Overloaded: {message}"))]
    Overloaded {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Credentials were rejected.
    #[snafu(display("Authentication failed: {message}"))]
    Authentication {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Request was malformed from the provider's point of view.
    #[snafu(display("Invalid request: {message}"))]
    InvalidRequest {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// The request exceeded the model's context window.
    #[snafu(display("Context overflow: {message}"))]
    ContextOverflow {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A generic mid-stream failure.
    #[snafu(display("Stream error: {message}"))]
    Stream {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// No events were received for longer than the configured stall timeout.
    #[snafu(display("Stream idle for {timeout_secs}s"))]
    StreamIdleTimeout {
        timeout_secs: i64,
        #[snafu(implicit)]
        location: Location,
    },

    /// Retry budget was exhausted without a successful attempt.
    #[snafu(display("Retries exhausted after {attempts} attempts: {last_error}"))]
    RetriesExhausted {
        attempts: i32,
        last_error: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        api_error::NetworkSnafu { message: message.into() }.build()
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        api_error::AuthenticationSnafu { message: message.into() }.build()
    }

    pub fn rate_limited(message: impl Into<String>, retry_after_ms: i64) -> Self {
        api_error::RateLimitedSnafu { message: message.into(), retry_after_ms }.build()
    }

    pub fn overloaded(message: impl Into<String>) -> Self {
        api_error::OverloadedSnafu { message: message.into() }.build()
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        api_error::InvalidRequestSnafu { message: message.into() }.build()
    }

    pub fn context_overflow(message: impl Into<String>) -> Self {
        api_error::ContextOverflowSnafu { message: message.into() }.build()
    }

    pub fn stream(message: impl Into<String>) -> Self {
        api_error::StreamSnafu { message: message.into() }.build()
    }

    pub fn stream_idle_timeout(timeout_secs: i64) -> Self {
        api_error::StreamIdleTimeoutSnafu { timeout_secs }.build()
    }

    pub fn retries_exhausted(attempts: i32, last_error: String) -> Self {
        api_error::RetriesExhaustedSnafu { attempts, last_error }.build()
    }

    /// Whether a fresh attempt is worth making.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Network { .. }
                | ApiError::RateLimited { .. }
                | ApiError::Overloaded { .. }
                | ApiError::StreamIdleTimeout { .. }
        )
    }

    /// Whether repeated overload errors of this kind should trigger a model
    /// fallback rather than further retries.
    pub fn should_fallback(&self) -> bool {
        matches!(self, ApiError::Overloaded { .. })
    }

    /// Provider-supplied retry hint, if any.
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after_ms, .. } => {
                Some(Duration::from_millis(*retry_after_ms as u64))
            }
            _ => None,
        }
    }

    pub fn is_context_overflow(&self) -> bool {
        matches!(self, ApiError::ContextOverflow { .. })
    }

    pub fn is_stream_error(&self) -> bool {
        matches!(self, ApiError::Stream { .. } | ApiError::StreamIdleTimeout { .. })
    }
}

impl ErrorExt for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Network { .. } => StatusCode::NetworkError,
            ApiError::RateLimited { .. } => StatusCode::RateLimited,
            ApiError::Overloaded { .. } => StatusCode::ServiceUnavailable,
            ApiError::Authentication { .. } => StatusCode::AuthenticationFailed,
            ApiError::InvalidRequest { .. } => StatusCode::InvalidRequest,
            ApiError::ContextOverflow { .. } => StatusCode::InvalidArguments,
            ApiError::Stream { .. } => StatusCode::StreamError,
            ApiError::StreamIdleTimeout { .. } => StatusCode::Timeout,
            ApiError::RetriesExhausted { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
