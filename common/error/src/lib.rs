//! Shared error-classification types used across the workspace.
//!
//! Every crate's error enum is `snafu`-derived, implements [`ErrorExt`], and
//! is annotated with [`stack_trace_debug`] so that `{:?}` renders a message
//! plus capture site instead of a raw field dump.

mod ext;
mod status_code;

pub use conduit_stack_trace_macro::stack_trace_debug;
pub use ext::{BoxedError, ErrorExt, PlainError, boxed};
pub use status_code::{StatusCategory, StatusCode, StatusMeta};

/// Capture-site location for `#[snafu(implicit)]` fields.
///
/// Re-exported so error enums across the workspace reference one
/// `Location` type without depending on `snafu` directly for it.
pub type Location = snafu::Location;
