//! Convenience constructors for tracked messages.

use crate::tracked::MessageSource;
use crate::tracked::TrackedMessage;
use crate::{ContentBlock, FinishReason, Message, Role, TokenUsage, ToolResultContent};

/// A model turn's response, shaped the way a provider adapter hands it
/// back after a stream completes.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub finish_reason: FinishReason,
    pub usage: Option<TokenUsage>,
    pub model: String,
}

/// Create a user message.
pub fn create_user_message(content: impl Into<String>, turn_id: impl Into<String>) -> TrackedMessage {
    TrackedMessage::user(content, turn_id)
}

/// Create a user message with multiple content blocks.
pub fn create_user_message_with_content(
    content: Vec<ContentBlock>,
    turn_id: impl Into<String>,
) -> TrackedMessage {
    TrackedMessage::new(Message::new(Role::User, content), turn_id, MessageSource::User)
}

/// Create an assistant message from an API response.
pub fn create_assistant_message(response: &GenerateResponse, turn_id: impl Into<String>) -> TrackedMessage {
    TrackedMessage::new(
        Message::new(Role::Assistant, response.content.clone()),
        turn_id,
        MessageSource::assistant(Some(response.id.clone())),
    )
}

/// Create an assistant message from content blocks.
pub fn create_assistant_message_with_content(
    content: Vec<ContentBlock>,
    turn_id: impl Into<String>,
    request_id: Option<String>,
) -> TrackedMessage {
    TrackedMessage::assistant_with_content(content, turn_id, request_id)
}

/// Create a system message.
pub fn create_system_message(content: impl Into<String>, turn_id: impl Into<String>) -> TrackedMessage {
    TrackedMessage::system(content, turn_id)
}

/// Create a tool result message from plain text.
pub fn create_tool_result_message(
    call_id: impl Into<String>,
    content: impl Into<String>,
    turn_id: impl Into<String>,
) -> TrackedMessage {
    TrackedMessage::tool_result(call_id, content, turn_id)
}

/// Create a tool result message from structured content.
pub fn create_tool_result_structured(
    call_id: impl Into<String>,
    content: ToolResultContent,
    is_error: bool,
    turn_id: impl Into<String>,
) -> TrackedMessage {
    let call_id = call_id.into();
    let turn_id = turn_id.into();

    let message = if is_error {
        match content {
            ToolResultContent::Text(text) => Message::tool_error(&call_id, text),
            ToolResultContent::Structured(value) => Message::tool_error(&call_id, value.to_string()),
        }
    } else {
        Message::tool_result(&call_id, content)
    };

    TrackedMessage::new(message, turn_id, MessageSource::tool(&call_id))
}

/// Create a tool error message.
pub fn create_tool_error_message(
    call_id: impl Into<String>,
    error: impl Into<String>,
    turn_id: impl Into<String>,
) -> TrackedMessage {
    TrackedMessage::tool_error(call_id, error, turn_id)
}

/// Create a subagent result message. Subagent results are folded into the
/// parent turn as user-role context.
pub fn create_subagent_result_message(
    agent_id: impl Into<String>,
    result: impl Into<String>,
    turn_id: impl Into<String>,
) -> TrackedMessage {
    TrackedMessage::new(Message::user(result), turn_id, MessageSource::subagent(agent_id))
}

/// Create a compaction summary message.
pub fn create_compaction_summary(summary: impl Into<String>, turn_id: impl Into<String>) -> TrackedMessage {
    TrackedMessage::new(
        Message::user(format!("<compaction_summary>\n{}\n</compaction_summary>", summary.into())),
        turn_id,
        MessageSource::CompactionSummary,
    )
}

/// Create tool result messages for multiple tool calls.
pub fn create_tool_results_batch(
    results: Vec<(String, ToolResultContent, bool)>,
    turn_id: impl Into<String>,
) -> Vec<TrackedMessage> {
    let turn_id = turn_id.into();
    results
        .into_iter()
        .map(|(call_id, content, is_error)| create_tool_result_structured(call_id, content, is_error, turn_id.clone()))
        .collect()
}

/// Builder for creating messages that all belong to the same turn.
pub struct MessageBuilder {
    turn_id: String,
}

impl MessageBuilder {
    pub fn for_turn(turn_id: impl Into<String>) -> Self {
        Self { turn_id: turn_id.into() }
    }

    pub fn user(&self, content: impl Into<String>) -> TrackedMessage {
        create_user_message(content, &self.turn_id)
    }

    pub fn system(&self, content: impl Into<String>) -> TrackedMessage {
        create_system_message(content, &self.turn_id)
    }

    pub fn assistant_from_response(&self, response: &GenerateResponse) -> TrackedMessage {
        create_assistant_message(response, &self.turn_id)
    }

    pub fn assistant_with_content(
        &self,
        content: Vec<ContentBlock>,
        request_id: Option<String>,
    ) -> TrackedMessage {
        create_assistant_message_with_content(content, &self.turn_id, request_id)
    }

    pub fn tool_result(&self, call_id: impl Into<String>, content: impl Into<String>) -> TrackedMessage {
        create_tool_result_message(call_id, content, &self.turn_id)
    }

    pub fn tool_error(&self, call_id: impl Into<String>, error: impl Into<String>) -> TrackedMessage {
        create_tool_error_message(call_id, error, &self.turn_id)
    }
}

#[cfg(test)]
#[path = "factory.test.rs"]
mod tests;
