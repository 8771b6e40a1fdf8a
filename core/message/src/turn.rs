//! A conversational turn: the user message that opened it, the assistant's
//! reply, and whatever tool calls the assistant made along the way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Message, ToolResultContent, TokenUsage, TrackedMessage};

pub use conduit_protocol::AbortReason;

/// Lifecycle of a single tool call within a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ToolCallStatus {
    Pending,
    Running,
    Success,
    Failed { error: String },
    Aborted { reason: AbortReason },
}

impl ToolCallStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed { .. } | Self::Aborted { .. })
    }
}

/// A tool call tracked through its start/complete/fail/abort lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedToolCall {
    pub call_id: String,
    pub name: String,
    pub input: Value,
    pub status: ToolCallStatus,
    pub output: Option<ToolResultContent>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl TrackedToolCall {
    pub fn from_parts(call_id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            input,
            status: ToolCallStatus::Pending,
            output: None,
            started_at: None,
            completed_at: None,
        }
    }

    pub fn start(&mut self) {
        self.status = ToolCallStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self, content: ToolResultContent) {
        self.status = ToolCallStatus::Success;
        self.output = Some(content);
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = ToolCallStatus::Failed { error: error.into() };
        self.completed_at = Some(Utc::now());
    }

    pub fn abort(&mut self, reason: AbortReason) {
        self.status = ToolCallStatus::Aborted { reason };
        self.completed_at = Some(Utc::now());
    }

    /// The message this tool call contributes to the transcript, if it has
    /// reached a terminal state.
    pub fn to_message(&self) -> Option<Message> {
        match &self.status {
            ToolCallStatus::Success => {
                self.output.clone().map(|content| Message::tool_result(&self.call_id, content))
            }
            ToolCallStatus::Failed { error } => Some(Message::tool_error(&self.call_id, error.clone())),
            ToolCallStatus::Aborted { reason } => {
                Some(Message::tool_error(&self.call_id, format!("aborted: {reason}")))
            }
            ToolCallStatus::Pending | ToolCallStatus::Running => None,
        }
    }
}

/// One user/assistant exchange, including every tool call made in between.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub number: i32,
    pub user_message: TrackedMessage,
    pub assistant_message: Option<TrackedMessage>,
    pub tool_calls: Vec<TrackedToolCall>,
    pub usage: TokenUsage,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Turn {
    pub fn new(number: i32, user_message: TrackedMessage) -> Self {
        Self {
            number,
            user_message,
            assistant_message: None,
            tool_calls: Vec::new(),
            usage: TokenUsage::new(0, 0),
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn set_assistant_message(&mut self, message: TrackedMessage) {
        self.assistant_message = Some(message);
    }

    pub fn add_tool_call(&mut self, tool_call: TrackedToolCall) {
        self.tool_calls.push(tool_call);
    }

    pub fn get_tool_call_mut(&mut self, call_id: &str) -> Option<&mut TrackedToolCall> {
        self.tool_calls.iter_mut().find(|tc| tc.call_id == call_id)
    }

    pub fn pending_tool_count(&self) -> usize {
        self.tool_calls.iter().filter(|tc| !tc.status.is_terminal()).count()
    }

    pub fn all_tools_complete(&self) -> bool {
        self.tool_calls.iter().all(|tc| tc.status.is_terminal())
    }

    pub fn update_usage(&mut self, usage: TokenUsage) {
        self.usage.input_tokens += usage.input_tokens;
        self.usage.output_tokens += usage.output_tokens;
        self.usage.cache_read_tokens =
            merge_optional(self.usage.cache_read_tokens, usage.cache_read_tokens);
        self.usage.cache_creation_tokens =
            merge_optional(self.usage.cache_creation_tokens, usage.cache_creation_tokens);
        self.usage.reasoning_tokens =
            merge_optional(self.usage.reasoning_tokens, usage.reasoning_tokens);
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|end| end - self.started_at)
    }
}

fn merge_optional(a: Option<i64>, b: Option<i64>) -> Option<i64> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + b),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

#[cfg(test)]
#[path = "turn.test.rs"]
mod tests;
