//! Provider-agnostic model handle and request/response shapes.
//!
//! Concrete provider adapters (Anthropic, OpenAI, …) are external
//! collaborators: they implement [`Model`] against [`conduit_wire`]'s
//! stream contract and are injected into an [`crate::ApiClient`] as a
//! trait object. This crate never talks to a provider directly.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

pub use conduit_protocol::{ProviderType, TokenUsage, ToolCall, ToolResultContent};
pub use conduit_wire::{
    FinishReason, StreamChunk, StreamInput as GenerateRequest, WireContentPart as ContentBlock,
    WireMessage as Message, WireRole as Role,
};

use crate::error::Result;

/// A complete, non-streamed model response.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub finish_reason: FinishReason,
    pub usage: Option<TokenUsage>,
    pub model: String,
}

/// A boxed stream of raw provider chunks.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk>> + Send>>;

/// A callable model handle.
#[async_trait]
pub trait Model: Send + Sync {
    /// Stable identifier for logging and fallback bookkeeping.
    fn model_id(&self) -> &str;

    /// Which provider backs this model, for normalization and ID sanitization.
    fn provider(&self) -> ProviderType;

    /// Start a streaming request.
    async fn stream(&self, request: GenerateRequest) -> Result<ChunkStream>;

    /// Make a single non-streaming request.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
