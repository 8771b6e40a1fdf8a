//! Tracing/logging bootstrap and W3C trace-context propagation shared by
//! every binary in the workspace.

mod otel_provider;

pub use otel_provider::{OtelConfig, OtelProvider, extract_traceparent_context};
