//! Stream chunk aggregation for accumulating deltas into complete blocks.
//!
//! This module provides [`AggregationState`] which aggregates the raw
//! [`StreamChunk`]s yielded by a [`crate::Model`] into complete content
//! blocks. It handles text, reasoning, and tool call chunks.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use conduit_protocol::{TokenUsage, ToolCall};
use conduit_wire::FinishReason;
use serde::{Deserialize, Serialize};

use crate::model::{ContentBlock, StreamChunk};

/// Partial content block being accumulated.
#[derive(Debug, Clone)]
pub enum PartialBlock {
    /// Reasoning content being accumulated, keyed by `reasoning_id`.
    Reasoning { buffer: String },
}

impl PartialBlock {
    /// Get the content block type name.
    pub fn type_name(&self) -> &'static str {
        match self {
            PartialBlock::Reasoning { .. } => "thinking",
        }
    }
}

/// Telemetry information collected during streaming.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamTelemetry {
    /// Time to first chunk (text or reasoning delta).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_to_first_chunk: Option<Duration>,
    /// Number of stalls detected.
    pub stall_count: i32,
    /// Total chunks received.
    pub chunk_count: i32,
    /// Time of last event.
    #[serde(skip)]
    pub last_event_time: Option<Instant>,
}

/// State machine that aggregates streaming chunks into complete blocks.
///
/// Tracks pending reasoning blocks being built up from deltas (tool calls
/// arrive complete on `ToolCallEnd`, so they need no accumulation) and
/// emits complete blocks as they finish.
#[derive(Debug, Clone)]
pub struct AggregationState {
    /// Pending reasoning blocks, keyed by `reasoning_id`.
    pending_blocks: HashMap<String, PartialBlock>,
    /// Accumulated assistant text, flushed as a block on `MessageEnd`.
    text_buffer: String,
    /// Completed content blocks.
    completed_blocks: Vec<ContentBlock>,
    /// Token usage information.
    usage: Option<TokenUsage>,
    /// Finish reason.
    finish_reason: Option<FinishReason>,
    /// Stream start time for telemetry.
    start_time: Instant,
    /// Telemetry information.
    telemetry: StreamTelemetry,
    /// Whether the stream is complete.
    is_complete: bool,
}

impl Default for AggregationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationState {
    /// Create a new aggregation state.
    pub fn new() -> Self {
        Self {
            pending_blocks: HashMap::new(),
            text_buffer: String::new(),
            completed_blocks: Vec::new(),
            usage: None,
            finish_reason: None,
            start_time: Instant::now(),
            telemetry: StreamTelemetry::default(),
            is_complete: false,
        }
    }

    /// Process a stream chunk and return any newly completed blocks.
    pub fn process_event(&mut self, chunk: &StreamChunk) -> Vec<ContentBlock> {
        self.telemetry.last_event_time = Some(Instant::now());
        self.telemetry.chunk_count += 1;

        let mut completed = Vec::new();

        match chunk {
            StreamChunk::Text { text } => {
                self.record_first_chunk();
                self.text_buffer.push_str(text);
            }

            StreamChunk::ReasoningStart { reasoning_id, .. } => {
                self.record_first_chunk();
                self.pending_blocks
                    .insert(reasoning_id.clone(), PartialBlock::Reasoning { buffer: String::new() });
            }

            StreamChunk::ReasoningDelta { reasoning_id, reasoning_text } => {
                if let Some(PartialBlock::Reasoning { buffer }) = self.pending_blocks.get_mut(reasoning_id) {
                    buffer.push_str(reasoning_text);
                }
            }

            StreamChunk::ReasoningEnd { reasoning_id, .. } => {
                if let Some(PartialBlock::Reasoning { buffer }) = self.pending_blocks.remove(reasoning_id) {
                    if !buffer.is_empty() {
                        let block = ContentBlock::Thinking { text: buffer, signature: None };
                        completed.push(block.clone());
                        self.completed_blocks.push(block);
                    }
                }
            }

            StreamChunk::ToolCallStart { .. } | StreamChunk::ToolCallDelta { .. } => {}

            StreamChunk::ToolCallEnd { tool_call } => {
                let block = ContentBlock::ToolUse { tool_call: tool_call.clone() };
                completed.push(block.clone());
                self.completed_blocks.push(block);
            }

            StreamChunk::MessageStart { usage } => {
                if usage.is_some() {
                    self.usage = usage.clone();
                }
            }

            StreamChunk::MessageDelta { usage, stop_reason } => {
                if usage.is_some() {
                    self.usage = usage.clone();
                }
                if stop_reason.is_some() {
                    self.finish_reason = *stop_reason;
                }
            }

            StreamChunk::MessageEnd => {
                if !self.text_buffer.is_empty() {
                    let block = ContentBlock::Text { text: std::mem::take(&mut self.text_buffer) };
                    completed.push(block.clone());
                    self.completed_blocks.push(block);
                }
                self.is_complete = true;
            }

            StreamChunk::Error { error } => {
                tracing::error!(message = %error, "Stream error");
            }
        }

        completed
    }

    /// Record first chunk time for telemetry.
    fn record_first_chunk(&mut self) {
        if self.telemetry.time_to_first_chunk.is_none() {
            self.telemetry.time_to_first_chunk = Some(self.start_time.elapsed());
        }
    }

    /// Take all completed blocks, clearing the internal list.
    pub fn take_completed(&mut self) -> Vec<ContentBlock> {
        std::mem::take(&mut self.completed_blocks)
    }

    /// Get a reference to completed blocks.
    pub fn completed_blocks(&self) -> &[ContentBlock] {
        &self.completed_blocks
    }

    /// Get accumulated text from completed blocks (plus any not-yet-flushed buffer).
    pub fn text(&self) -> String {
        let mut text: String = self
            .completed_blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        text.push_str(&self.text_buffer);
        text
    }

    /// Get accumulated reasoning from completed blocks.
    pub fn thinking(&self) -> Option<String> {
        self.completed_blocks.iter().find_map(|b| match b {
            ContentBlock::Thinking { text, .. } => Some(text.clone()),
            _ => None,
        })
    }

    /// Get tool calls from completed blocks.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.completed_blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { tool_call } => Some(tool_call.clone()),
                _ => None,
            })
            .collect()
    }

    /// Get token usage.
    pub fn usage(&self) -> Option<&TokenUsage> {
        self.usage.as_ref()
    }

    /// Get the finish reason.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.finish_reason
    }

    /// Check if the stream is complete.
    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Get telemetry information.
    pub fn telemetry(&self) -> &StreamTelemetry {
        &self.telemetry
    }

    /// Record a stall detection.
    pub fn record_stall(&mut self) {
        self.telemetry.stall_count += 1;
    }

    /// Check if stream appears stalled (no events for given duration).
    pub fn is_stalled(&self, threshold: Duration) -> bool {
        self.telemetry.last_event_time.map(|t| t.elapsed() > threshold).unwrap_or(false)
    }

    /// Get the number of pending blocks.
    pub fn pending_count(&self) -> usize {
        self.pending_blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_accumulation() {
        let mut state = AggregationState::new();

        let completed = state.process_event(&StreamChunk::Text { text: "Hello ".to_string() });
        assert!(completed.is_empty());

        let completed = state.process_event(&StreamChunk::Text { text: "world".to_string() });
        assert!(completed.is_empty());

        let completed = state.process_event(&StreamChunk::MessageEnd);
        assert_eq!(completed.len(), 1);

        assert_eq!(state.text(), "Hello world");
        assert!(state.is_complete());
    }

    #[test]
    fn test_reasoning_accumulation() {
        let mut state = AggregationState::new();

        state.process_event(&StreamChunk::ReasoningStart {
            reasoning_id: "r1".to_string(),
            provider_metadata: None,
        });
        state.process_event(&StreamChunk::ReasoningDelta {
            reasoning_id: "r1".to_string(),
            reasoning_text: "Let me ".to_string(),
        });
        state.process_event(&StreamChunk::ReasoningDelta {
            reasoning_id: "r1".to_string(),
            reasoning_text: "think...".to_string(),
        });

        let completed = state.process_event(&StreamChunk::ReasoningEnd {
            reasoning_id: "r1".to_string(),
            provider_metadata: None,
        });

        assert_eq!(completed.len(), 1);
        assert_eq!(state.thinking(), Some("Let me think...".to_string()));
    }

    #[test]
    fn test_tool_call_end_is_complete() {
        let mut state = AggregationState::new();

        state.process_event(&StreamChunk::ToolCallStart {
            tool_call_id: "call_1".to_string(),
            tool_call_name: "get_weather".to_string(),
        });
        state.process_event(&StreamChunk::ToolCallDelta {
            tool_call_id: "call_1".to_string(),
            tool_call_input_delta: json!({"city": "NYC"}),
        });

        let completed = state.process_event(&StreamChunk::ToolCallEnd {
            tool_call: ToolCall::new("call_1", "get_weather", json!({"city": "NYC"})),
        });

        assert_eq!(completed.len(), 1);
        let tool_calls = state.tool_calls();
        assert_eq!(tool_calls.len(), 1);
        assert_eq!(tool_calls[0].name, "get_weather");
    }

    #[test]
    fn test_message_end_marks_complete() {
        let mut state = AggregationState::new();
        state.process_event(&StreamChunk::MessageStart { usage: None });
        state.process_event(&StreamChunk::MessageDelta {
            usage: Some(TokenUsage::new(10, 5)),
            stop_reason: Some(FinishReason::Stop),
        });
        state.process_event(&StreamChunk::MessageEnd);

        assert!(state.is_complete());
        assert_eq!(state.finish_reason(), Some(FinishReason::Stop));
        assert_eq!(state.usage().unwrap().total(), 15);
    }

    #[test]
    fn test_telemetry() {
        let mut state = AggregationState::new();

        state.process_event(&StreamChunk::Text { text: "Hello".to_string() });
        assert!(state.telemetry().time_to_first_chunk.is_some());
        assert_eq!(state.telemetry().chunk_count, 1);

        state.process_event(&StreamChunk::Text { text: " world".to_string() });
        assert_eq!(state.telemetry().chunk_count, 2);

        state.record_stall();
        assert_eq!(state.telemetry().stall_count, 1);
    }

    #[test]
    fn test_take_completed() {
        let mut state = AggregationState::new();

        state.process_event(&StreamChunk::Text { text: "Hello".to_string() });
        state.process_event(&StreamChunk::MessageEnd);

        let completed = state.take_completed();
        assert_eq!(completed.len(), 1);

        let completed = state.take_completed();
        assert!(completed.is_empty());
    }
}
