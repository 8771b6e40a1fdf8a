//! Process-wide tracing/otel bootstrap.
//!
//! [`OtelProvider::install`] wires a `tracing_subscriber::Registry` with an
//! env-filtered fmt layer plus, when an OTLP endpoint is configured, a span
//! exporter layer. Everything downstream (the HTTP facade, the session
//! runtime, the tool executor) logs through `tracing` macros only; this is
//! the one place that decides where those events go.

use opentelemetry::Context;
use opentelemetry::propagation::{Extractor, TextMapPropagator};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Configuration for the process-wide subscriber.
#[derive(Debug, Clone, Default)]
pub struct OtelConfig {
    /// `RUST_LOG`-style filter directive; falls back to `info` when empty.
    pub env_filter: Option<String>,
    /// OTLP collector endpoint. When `None`, spans are not exported.
    pub otlp_endpoint: Option<String>,
    /// Emit human-readable (as opposed to JSON) log lines.
    pub pretty: bool,
}

/// Handle to the installed subscriber; dropping it flushes pending spans.
pub struct OtelProvider {
    tracer_provider: Option<opentelemetry_sdk::trace::SdkTracerProvider>,
}

impl OtelProvider {
    /// Install the global `tracing` subscriber for this process.
    ///
    /// Idempotent enough for tests: if a global subscriber is already set,
    /// this silently does nothing rather than panicking.
    pub fn install(config: OtelConfig) -> Self {
        let filter = EnvFilter::try_new(config.env_filter.unwrap_or_else(|| "info".to_string()))
            .unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer = if config.pretty {
            tracing_subscriber::fmt::layer().pretty().boxed()
        } else {
            tracing_subscriber::fmt::layer().boxed()
        };

        let tracer_provider = config.otlp_endpoint.as_deref().and_then(build_tracer_provider);

        let otel_layer = tracer_provider.as_ref().map(|provider| {
            use opentelemetry::trace::TracerProvider as _;
            tracing_opentelemetry::layer().with_tracer(provider.tracer("conduit"))
        });

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .with(otel_layer)
            .try_init();

        Self { tracer_provider }
    }

    /// Flush and shut down any configured exporter.
    pub fn shutdown(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            let _ = provider.shutdown();
        }
    }
}

impl Drop for OtelProvider {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn build_tracer_provider(endpoint: &str) -> Option<opentelemetry_sdk::trace::SdkTracerProvider> {
    use opentelemetry_otlp::WithExportConfig;

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(endpoint)
        .build()
        .ok()?;

    Some(
        opentelemetry_sdk::trace::SdkTracerProvider::builder()
            .with_batch_exporter(exporter)
            .build(),
    )
}

struct HeaderExtractor<'a>(&'a HashMap<String, String>);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }
}

/// Parse a W3C `traceparent` (and optional `tracestate`) header pair into an
/// [`opentelemetry::Context`] usable as the parent of a new span.
///
/// Returns `None` when `traceparent` is malformed (wrong arity, invalid hex,
/// all-zero trace or span id).
pub fn extract_traceparent_context(
    traceparent: String,
    tracestate: Option<String>,
) -> Option<Context> {
    let mut carrier = HashMap::new();
    carrier.insert("traceparent".to_string(), traceparent);
    if let Some(tracestate) = tracestate {
        carrier.insert("tracestate".to_string(), tracestate);
    }

    let propagator = TraceContextPropagator::new();
    let context = propagator.extract(&HeaderExtractor(&carrier));

    use opentelemetry::trace::TraceContextExt;
    if context.span().span_context().is_valid() {
        Some(context)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "otel_provider.test.rs"]
mod tests;
