//! Type guards and extractors for content blocks and messages.

use serde_json::Value;

use crate::{ContentBlock, Message, Role, ToolCall, ToolResultContent};

pub fn is_text_block(block: &ContentBlock) -> bool {
    matches!(block, ContentBlock::Text { .. })
}

pub fn is_tool_use_block(block: &ContentBlock) -> bool {
    matches!(block, ContentBlock::ToolUse { .. })
}

pub fn is_tool_result_block(block: &ContentBlock) -> bool {
    matches!(block, ContentBlock::ToolResult { .. })
}

pub fn is_thinking_block(block: &ContentBlock) -> bool {
    matches!(block, ContentBlock::Thinking { .. })
}

pub fn is_image_block(block: &ContentBlock) -> bool {
    matches!(block, ContentBlock::Image { .. })
}

pub fn extract_text(block: &ContentBlock) -> Option<&str> {
    match block {
        ContentBlock::Text { text } => Some(text),
        _ => None,
    }
}

pub fn extract_thinking(block: &ContentBlock) -> Option<&str> {
    match block {
        ContentBlock::Thinking { text, .. } => Some(text),
        _ => None,
    }
}

pub fn extract_tool_use(block: &ContentBlock) -> Option<(&str, &str, &Value)> {
    match block {
        ContentBlock::ToolUse { tool_call } => Some((&tool_call.id, &tool_call.name, &tool_call.input)),
        _ => None,
    }
}

pub fn extract_tool_result(block: &ContentBlock) -> Option<(&str, &ToolResultContent, bool)> {
    match block {
        ContentBlock::ToolResult { tool_call_id, content, is_error } => {
            Some((tool_call_id, content, *is_error))
        }
        _ => None,
    }
}

pub fn has_tool_use(message: &Message) -> bool {
    message.content.iter().any(is_tool_use_block)
}

pub fn has_tool_result(message: &Message) -> bool {
    message.content.iter().any(is_tool_result_block)
}

pub fn has_thinking(message: &Message) -> bool {
    message.content.iter().any(is_thinking_block)
}

pub fn is_empty_message(message: &Message) -> bool {
    message.content.is_empty()
}

pub fn is_user_message(message: &Message) -> bool {
    message.role == Role::User
}

pub fn is_assistant_message(message: &Message) -> bool {
    message.role == Role::Assistant
}

pub fn is_system_message(message: &Message) -> bool {
    message.role == Role::System
}

pub fn is_tool_message(message: &Message) -> bool {
    message.role == Role::Tool
}

pub fn get_text_content(message: &Message) -> String {
    message.content.iter().filter_map(extract_text).collect::<Vec<_>>().join("")
}

pub fn get_tool_calls(message: &Message) -> Vec<ToolCall> {
    message
        .content
        .iter()
        .filter_map(|block| match block {
            ContentBlock::ToolUse { tool_call } => Some(tool_call.clone()),
            _ => None,
        })
        .collect()
}

pub fn get_thinking_content(message: &Message) -> Option<String> {
    message.content.iter().find_map(|block| match block {
        ContentBlock::Thinking { text, .. } => Some(text.clone()),
        _ => None,
    })
}

pub fn count_tool_uses(message: &Message) -> usize {
    message.content.iter().filter(|block| is_tool_use_block(block)).count()
}

pub fn count_tool_results(message: &Message) -> usize {
    message.content.iter().filter(|block| is_tool_result_block(block)).count()
}

#[cfg(test)]
#[path = "type_guards.test.rs"]
mod tests;
