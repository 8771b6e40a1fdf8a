//! Tracked conversation messages: factories, normalization, history and
//! per-turn bookkeeping built on top of the provider-agnostic wire vocabulary.

pub mod factory;
pub mod history;
pub mod normalization;
pub mod tracked;
pub mod turn;
pub mod type_guards;

pub use conduit_protocol::{TokenUsage, ToolCall, ToolResultContent};
pub use conduit_wire::{FinishReason, WireContentPart as ContentBlock, WireMessage as Message, WireRole as Role};

pub use factory::{
    MessageBuilder, create_assistant_message, create_assistant_message_with_content,
    create_compaction_summary, create_subagent_result_message, create_system_message,
    create_tool_error_message, create_tool_result_message, create_tool_result_structured,
    create_tool_results_batch, create_user_message, create_user_message_with_content,
    GenerateResponse,
};
pub use history::{CompactionBoundary, HistoryBuilder, HistoryConfig, MessageHistory};
pub use normalization::{
    NormalizationOptions, ValidationError, estimate_tokens, normalize_messages_for_api,
    validate_messages,
};
pub use tracked::{MessageSource, TrackedMessage};
pub use turn::{AbortReason, ToolCallStatus, TrackedToolCall, Turn};
pub use type_guards::{
    count_tool_results, count_tool_uses, extract_text, extract_thinking, extract_tool_result,
    extract_tool_use, get_text_content, get_thinking_content, get_tool_calls, has_thinking,
    has_tool_result, has_tool_use, is_assistant_message, is_empty_message, is_image_block,
    is_system_message, is_text_block, is_thinking_block, is_tool_message, is_tool_result_block,
    is_tool_use_block, is_user_message,
};
