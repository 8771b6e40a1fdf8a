//! Provider-agnostic stream chunks and the input that produces them.

use conduit_protocol::{TokenUsage, ToolCall, ToolDefinition, ToolResultContent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::finish_reason::FinishReason;

/// Speaker role on a wire message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireRole {
    System,
    User,
    Assistant,
    Tool,
}

/// One content part of a wire message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WireContentPart {
    Text { text: String },
    Thinking { text: String, signature: Option<String> },
    ToolUse { tool_call: ToolCall },
    ToolResult { tool_call_id: String, content: ToolResultContent, is_error: bool },
    Image { media_type: String, data: String },
}

impl WireContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self::ToolUse { tool_call: ToolCall::new(id, name, input) }
    }

    pub fn tool_result(
        tool_call_id: impl Into<String>,
        content: ToolResultContent,
        is_error: bool,
    ) -> Self {
        Self::ToolResult { tool_call_id: tool_call_id.into(), content, is_error }
    }
}

/// A message normalized to the wire boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: WireRole,
    pub content: Vec<WireContentPart>,
    /// Provider-specific cache breakpoint hint, injected by normalization.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub cache_hint: bool,
}

impl WireMessage {
    pub fn new(role: WireRole, content: Vec<WireContentPart>) -> Self {
        Self { role, content, cache_hint: false }
    }

    pub fn text(role: WireRole, text: impl Into<String>) -> Self {
        Self::new(role, vec![WireContentPart::text(text)])
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(WireRole::User, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::text(WireRole::System, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::text(WireRole::Assistant, text)
    }

    pub fn tool_result(tool_call_id: impl Into<String>, content: ToolResultContent) -> Self {
        Self::new(
            WireRole::Tool,
            vec![WireContentPart::tool_result(tool_call_id, content, false)],
        )
    }

    pub fn tool_error(tool_call_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            WireRole::Tool,
            vec![WireContentPart::tool_result(
                tool_call_id,
                ToolResultContent::Text(text.into()),
                true,
            )],
        )
    }

    /// A message is empty when it carries no non-empty text and no
    /// structured content at all (providers that reject empty assistant
    /// turns key off exactly this).
    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|part| match part {
            WireContentPart::Text { text } => text.is_empty(),
            WireContentPart::Thinking { text, .. } => text.is_empty(),
            WireContentPart::ToolUse { .. }
            | WireContentPart::ToolResult { .. }
            | WireContentPart::Image { .. } => false,
        })
    }
}

/// Tool-choice directive for a stream request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    #[default]
    Auto,
    Required,
    None,
    Named(String),
}

/// Sampling parameters carried through to the provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub max_tokens: Option<i32>,
}

/// Input to [`crate::adapter::stream`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInput {
    pub messages: Vec<WireMessage>,
    pub system: Option<String>,
    pub tools: Vec<ToolDefinition>,
    pub tool_choice: ToolChoice,
    pub retries: u32,
    pub sampling: SamplingParams,
    /// Opaque, provider-specific passthrough options.
    pub options: Value,
    /// Named request variant (e.g. a provider/model-specific prompt flavor).
    pub variant: Option<String>,
}

impl StreamInput {
    pub fn new(messages: Vec<WireMessage>) -> Self {
        Self {
            messages,
            system: None,
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
            retries: 0,
            sampling: SamplingParams::default(),
            options: Value::Null,
            variant: None,
        }
    }
}

/// One chunk yielded by a provider-agnostic stream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamChunk {
    Text {
        text: String,
    },
    ReasoningStart {
        reasoning_id: String,
        provider_metadata: Option<Value>,
    },
    ReasoningDelta {
        reasoning_id: String,
        reasoning_text: String,
    },
    ReasoningEnd {
        reasoning_id: String,
        provider_metadata: Option<Value>,
    },
    ToolCallStart {
        tool_call_id: String,
        tool_call_name: String,
    },
    ToolCallDelta {
        tool_call_id: String,
        tool_call_input_delta: Value,
    },
    ToolCallEnd {
        tool_call: ToolCall,
    },
    MessageStart {
        usage: Option<TokenUsage>,
    },
    MessageDelta {
        usage: Option<TokenUsage>,
        stop_reason: Option<FinishReason>,
    },
    MessageEnd,
    Error {
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_message_with_only_empty_text_is_empty() {
        let msg = WireMessage::text(WireRole::Assistant, "");
        assert!(msg.is_empty());
    }

    #[test]
    fn wire_message_with_tool_use_is_not_empty() {
        let msg = WireMessage {
            role: WireRole::Assistant,
            content: vec![WireContentPart::ToolUse {
                tool_call: ToolCall::new("call_1", "Read", Value::Null),
            }],
            cache_hint: false,
        };
        assert!(!msg.is_empty());
    }

    #[test]
    fn wire_message_with_image_is_not_empty() {
        let msg = WireMessage::new(
            WireRole::User,
            vec![WireContentPart::Image { media_type: "image/png".to_string(), data: String::new() }],
        );
        assert!(!msg.is_empty());
    }

    #[test]
    fn constructors_build_expected_roles() {
        assert_eq!(WireMessage::user("hi").role, WireRole::User);
        assert_eq!(WireMessage::system("hi").role, WireRole::System);
        assert_eq!(WireMessage::assistant("hi").role, WireRole::Assistant);

        let result = WireMessage::tool_result("call_1", ToolResultContent::Text("ok".to_string()));
        assert_eq!(result.role, WireRole::Tool);

        let error = WireMessage::tool_error("call_1", "boom");
        let WireContentPart::ToolResult { is_error, .. } = &error.content[0] else {
            panic!("expected tool result part");
        };
        assert!(*is_error);
    }
}
