//! Flattening tracked messages into the list sent to a provider, and
//! validating that list is well-formed before it goes out.

use crate::{ContentBlock, Message, Role, ToolResultContent, TrackedMessage};

/// Options for message normalization.
#[derive(Debug, Clone, Default)]
pub struct NormalizationOptions {
    /// Remove tombstoned messages.
    pub skip_tombstoned: bool,
    /// Merge consecutive messages from the same role.
    pub merge_consecutive: bool,
    /// Strip thinking signatures (for cross-provider compatibility).
    pub strip_thinking_signatures: bool,
    /// Include empty messages.
    pub include_empty: bool,
}

impl NormalizationOptions {
    pub fn for_api() -> Self {
        Self {
            skip_tombstoned: true,
            merge_consecutive: true,
            strip_thinking_signatures: false,
            include_empty: false,
        }
    }

    pub fn for_debug() -> Self {
        Self {
            skip_tombstoned: false,
            merge_consecutive: false,
            strip_thinking_signatures: false,
            include_empty: true,
        }
    }
}

/// Normalize tracked messages into the list sent to the model.
pub fn normalize_messages_for_api(
    messages: &[TrackedMessage],
    options: &NormalizationOptions,
) -> Vec<Message> {
    let mut normalized: Vec<Message> = Vec::new();

    for tracked in messages {
        if options.skip_tombstoned && tracked.is_tombstoned() {
            continue;
        }
        if !options.include_empty && tracked.inner.content.is_empty() {
            continue;
        }

        let mut message = tracked.inner.clone();
        if options.strip_thinking_signatures {
            message = strip_thinking_signatures(&message);
        }

        if options.merge_consecutive {
            if let Some(last) = normalized.last_mut() {
                if can_merge(last, &message) {
                    merge_messages(last, &message);
                    continue;
                }
            }
        }

        normalized.push(message);
    }

    normalized
}

fn can_merge(a: &Message, b: &Message) -> bool {
    if a.role != b.role {
        return false;
    }

    let has_tool_blocks = |m: &Message| {
        m.content
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse { .. } | ContentBlock::ToolResult { .. }))
    };

    !has_tool_blocks(a) && !has_tool_blocks(b)
}

fn merge_messages(target: &mut Message, source: &Message) {
    for block in &source.content {
        target.content.push(block.clone());
    }
}

fn strip_thinking_signatures(message: &Message) -> Message {
    let content = message
        .content
        .iter()
        .map(|block| match block {
            ContentBlock::Thinking { text, .. } => ContentBlock::Thinking { text: text.clone(), signature: None },
            other => other.clone(),
        })
        .collect();

    let mut out = Message::new(message.role, content);
    out.cache_hint = message.cache_hint;
    out
}

/// Validate that messages are suitable for an API request.
pub fn validate_messages(messages: &[Message]) -> Result<(), ValidationError> {
    if messages.is_empty() {
        return Err(ValidationError::EmptyMessages);
    }

    let mut last_role: Option<Role> = None;
    for (idx, msg) in messages.iter().enumerate() {
        if msg.role == Role::System && idx > 0 {
            return Err(ValidationError::SystemNotFirst { index: idx });
        }

        if msg.role != Role::System && msg.role != Role::Tool {
            if let Some(prev_role) = last_role {
                if prev_role != Role::System && prev_role != Role::Tool && msg.role == prev_role {
                    return Err(ValidationError::InvalidAlternation {
                        index: idx,
                        expected: if msg.role == Role::User { Role::Assistant } else { Role::User },
                        found: msg.role,
                    });
                }
            }
        }

        if msg.role == Role::Tool {
            for block in &msg.content {
                if let ContentBlock::ToolResult { tool_call_id, .. } = block {
                    if !has_matching_tool_use(messages, idx, tool_call_id) {
                        return Err(ValidationError::OrphanToolResult { tool_use_id: tool_call_id.clone() });
                    }
                }
            }
        }

        last_role = Some(msg.role);
    }

    Ok(())
}

fn has_matching_tool_use(messages: &[Message], current_idx: usize, tool_call_id: &str) -> bool {
    for msg in messages[..current_idx].iter().rev() {
        if msg.role == Role::Assistant {
            for block in &msg.content {
                if let ContentBlock::ToolUse { tool_call } = block {
                    if tool_call.id == tool_call_id {
                        return true;
                    }
                }
            }
            break;
        }
    }
    false
}

/// Validation errors for message sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyMessages,
    SystemNotFirst { index: usize },
    OrphanToolResult { tool_use_id: String },
    InvalidAlternation { index: usize, expected: Role, found: Role },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyMessages => write!(f, "Message list is empty"),
            ValidationError::SystemNotFirst { index } => {
                write!(f, "System message at index {index} is not first")
            }
            ValidationError::OrphanToolResult { tool_use_id } => {
                write!(f, "Tool result for '{tool_use_id}' has no matching tool use")
            }
            ValidationError::InvalidAlternation { index, expected, found } => {
                write!(f, "Invalid role alternation at index {index}: expected {expected:?}, found {found:?}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Rough token estimate for a set of messages (chars / 4).
pub fn estimate_tokens(messages: &[Message]) -> i32 {
    messages
        .iter()
        .map(|m| {
            m.content
                .iter()
                .map(|block| match block {
                    ContentBlock::Text { text } => (text.len() / 4) as i32,
                    ContentBlock::Thinking { text, .. } => (text.len() / 4) as i32,
                    ContentBlock::Image { .. } => 1000,
                    ContentBlock::ToolUse { tool_call } => (tool_call.input.to_string().len() / 4) as i32,
                    ContentBlock::ToolResult { content, .. } => match content {
                        ToolResultContent::Text(t) => (t.len() / 4) as i32,
                        ToolResultContent::Structured(v) => (v.to_string().len() / 4) as i32,
                    },
                })
                .sum::<i32>()
        })
        .sum()
}

#[cfg(test)]
#[path = "normalization.test.rs"]
mod tests;
