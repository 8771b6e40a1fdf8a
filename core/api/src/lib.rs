//! conduit-api - Provider abstraction layer for the agent system.
//!
//! This crate provides:
//! - A provider-agnostic [`Model`] trait that concrete provider adapters
//!   implement against [`conduit_wire`]'s stream contract
//! - Unified streaming abstraction (stream vs non-stream)
//! - Retry logic with exponential backoff
//! - Model fallback on overload
//! - Prompt caching support
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         conduit-api                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ApiClient         │  UnifiedStream      │  RetryContext       │
//! │  - retry           │  - Streaming mode   │  - backoff          │
//! │  - fallback        │  - Non-stream mode  │  - fallback logic   │
//! │  - caching         │  - Event emission   │                     │
//! ├────────────────────┴───────────────────────────────────────────┤
//! │                        conduit-wire                             │
//! │  StreamChunk, StreamInput, WireMessage, … (provider contract)  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concrete provider SDKs are external collaborators: they implement
//! [`Model`] and are handed to [`ApiClient`] as a trait object. This crate
//! never talks to a provider directly.
//!
//! # Quick Start
//!
//! ```ignore
//! use conduit_api::{ApiClient, GenerateRequest, StreamOptions};
//! use conduit_wire::WireMessage;
//!
//! let client = ApiClient::new(model);
//! let request = GenerateRequest::new(vec![WireMessage::user("Hello!")]);
//!
//! let mut stream = client.stream_request(request, StreamOptions::streaming()).await?;
//!
//! while let Some(result) = stream.next().await {
//!     let result = result?;
//!     if result.has_content() {
//!         // Handle completed content blocks
//!     }
//! }
//! ```
//!
//! # Module Structure
//!
//! - [`error`] - Error types with status codes
//! - [`model`] - Provider-agnostic model handle and request/response shapes
//! - [`aggregation`] - Stream chunk aggregation
//! - [`retry`] - Retry context with backoff
//! - [`unified_stream`] - Unified stream abstraction
//! - [`cache`] - Prompt caching helpers
//! - [`client`] - High-level API client

pub mod aggregation;
pub mod cache;
pub mod client;
pub mod error;
pub mod model;
pub mod retry;
pub mod unified_stream;

// Re-export main types at crate root
pub use aggregation::{AggregationState, PartialBlock, StreamTelemetry};
pub use cache::{CacheStats, Cacheable, PromptCacheConfig};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig, StreamOptions};
pub use error::{ApiError, Result};
pub use model::{
    ChunkStream, ContentBlock, FinishReason, GenerateRequest, GenerateResponse, Message, Model,
    ProviderType, Role, StreamChunk, TokenUsage, ToolCall, ToolResultContent,
};
pub use retry::{RetryConfig, RetryContext, RetryDecision};
pub use unified_stream::{CollectedResponse, QueryResultType, StreamingQueryResult, UnifiedStream};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregation::AggregationState;
    pub use crate::cache::PromptCacheConfig;
    pub use crate::client::{ApiClient, StreamOptions};
    pub use crate::error::{ApiError, Result};
    pub use crate::model::{
        ContentBlock, FinishReason, GenerateRequest, GenerateResponse, Message, Model, Role,
        StreamChunk, ToolCall,
    };
    pub use crate::retry::{RetryConfig, RetryContext};
    pub use crate::unified_stream::{StreamingQueryResult, UnifiedStream};
}
