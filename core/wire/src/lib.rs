//! Provider-agnostic LLM streaming contract.
//!
//! This crate owns the *shape* of a streamed model turn — [`StreamChunk`],
//! [`StreamInput`], [`FinishReason`] — plus the normalization and retry
//! policy every provider adapter must apply before and around a stream.
//! It does not itself talk to any provider; concrete provider SDKs
//! (Anthropic, OpenAI, …) are the external collaborator named out of scope
//! at the top level, and implement against this contract.

pub mod chunk;
pub mod finish_reason;
pub mod normalize;
pub mod retry;

pub use chunk::{
    SamplingParams, StreamChunk, StreamInput, ToolChoice, WireContentPart, WireMessage, WireRole,
};
pub use finish_reason::FinishReason;
pub use normalize::{drop_empty_assistant_messages, inject_cache_hints, sanitize_tool_call_id};
pub use retry::{SessionRetry, StreamFailure};

use conduit_protocol::ProviderType;

/// Apply the full pre-stream normalization pipeline: drop empty assistant
/// messages, inject cache hints, then sanitize every tool-call ID embedded
/// in tool-use/tool-result content for the target provider.
pub fn normalize_input(input: &mut StreamInput, provider: ProviderType) {
    drop_empty_assistant_messages(&mut input.messages);
    inject_cache_hints(&mut input.messages);
    for message in &mut input.messages {
        for part in &mut message.content {
            match part {
                WireContentPart::ToolUse { tool_call } => {
                    tool_call.id = sanitize_tool_call_id(&tool_call.id, provider);
                }
                WireContentPart::ToolResult { tool_call_id, .. } => {
                    *tool_call_id = sanitize_tool_call_id(tool_call_id, provider);
                }
                WireContentPart::Text { .. } | WireContentPart::Thinking { .. } => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_protocol::ToolCall;
    use serde_json::Value;

    #[test]
    fn normalize_input_sanitizes_embedded_tool_call_ids() {
        let mut input = StreamInput::new(vec![WireMessage {
            role: WireRole::Assistant,
            content: vec![WireContentPart::ToolUse {
                tool_call: ToolCall::new("call!!1", "Read", Value::Null),
            }],
            cache_hint: false,
        }]);

        normalize_input(&mut input, ProviderType::Anthropic);

        let WireContentPart::ToolUse { tool_call } = &input.messages[0].content[0] else {
            panic!("expected tool use part");
        };
        assert_eq!(tool_call.id, "call__1");
    }

    #[test]
    fn normalize_input_drops_empty_assistant_before_hinting() {
        let mut input = StreamInput::new(vec![
            WireMessage::text(WireRole::Assistant, ""),
            WireMessage::text(WireRole::User, "hi"),
        ]);
        normalize_input(&mut input, ProviderType::Openai);
        assert_eq!(input.messages.len(), 1);
    }
}
