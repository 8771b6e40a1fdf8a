//! Error types for context assembly and budget accounting.

use conduit_error::ErrorExt;
use conduit_error::Location;
use conduit_error::StatusCode;
use conduit_error::stack_trace_debug;
use snafu::Snafu;

/// Context assembly and budget errors.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ContextError {
    /// System prompt or injected context exceeded the model's token budget.
    #[snafu(display("{message}"))]
    BudgetExceeded {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Context configuration was invalid (negative token counts, etc).
    #[snafu(display("{message}"))]
    InvalidConfig {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Context could not be built (missing required inputs).
    #[snafu(display("{message}"))]
    Build {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ContextError {
    fn status_code(&self) -> StatusCode {
        match self {
            ContextError::BudgetExceeded { .. } => StatusCode::InvalidArguments,
            ContextError::InvalidConfig { .. } => StatusCode::InvalidConfig,
            ContextError::Build { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
