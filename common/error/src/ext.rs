//! [`ErrorExt`] — the trait every error type in the workspace implements so
//! callers can classify and report failures uniformly regardless of which
//! crate raised them.

use crate::StatusCode;
use std::any::Any;
use std::fmt;

/// Extension trait implemented by workspace error types.
///
/// Concrete errors (usually `snafu`-derived enums) implement `status_code`
/// and `as_any`; the rest of the trait has sensible defaults derived from
/// the status code's metadata.
pub trait ErrorExt: std::error::Error {
    /// The classified status code for this error.
    fn status_code(&self) -> StatusCode;

    /// Type-erased access for downcasting in generic error-handling paths.
    fn as_any(&self) -> &dyn Any;

    /// Whether a caller may retry the operation that produced this error.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// A message safe to return to an external caller.
    ///
    /// Internal errors (bugs, unclassified failures) hide their detail
    /// behind a generic message carrying only the status code; everything
    /// else is surfaced verbatim since it was already written to be
    /// user-facing (invalid input, permission denials, and so on).
    fn output_msg(&self) -> String {
        if self.status_code() == StatusCode::Internal {
            format!("Internal error: {}", self.status_code() as i32)
        } else {
            self.to_string()
        }
    }
}

/// A minimal standalone error carrying just a message and a status code.
///
/// Useful at call sites that need to manufacture an [`ErrorExt`] without
/// defining a dedicated enum variant.
#[derive(Debug, Clone)]
pub struct PlainError {
    message: String,
    code: StatusCode,
}

impl PlainError {
    pub fn new(message: impl Into<String>, code: StatusCode) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A boxed error paired with an explicit status code.
///
/// Used to lift foreign errors (`std::io::Error`, `serde_json::Error`, ...)
/// into the [`ErrorExt`] hierarchy while preserving their `source()` chain.
#[derive(Debug)]
pub struct BoxedError {
    inner: Box<dyn std::error::Error + Send + Sync>,
    code: StatusCode,
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl std::error::Error for BoxedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Lift any standard error into a [`BoxedError`] with an explicit status code.
pub fn boxed(
    err: impl std::error::Error + Send + Sync + 'static,
    code: StatusCode,
) -> BoxedError {
    BoxedError {
        inner: Box::new(err),
        code,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
