//! A message plus the bookkeeping needed to place it in a turn and drop it
//! from history without losing the audit trail.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ContentBlock, Message, Role, ToolCall, ToolResultContent};

/// Where a tracked message came from. Distinct from [`Role`]: a system
/// reminder is sent to the provider as a user message but originates
/// differently and is hidden from the transcript shown to a human.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageSource {
    User,
    Assistant { request_id: Option<String> },
    Tool { call_id: String },
    System,
    SystemReminder { reminder_type: String },
    CompactionSummary,
    Subagent { agent_id: String },
}

impl MessageSource {
    pub fn assistant(request_id: Option<String>) -> Self {
        Self::Assistant { request_id }
    }

    pub fn tool(call_id: impl Into<String>) -> Self {
        Self::Tool { call_id: call_id.into() }
    }

    pub fn subagent(agent_id: impl Into<String>) -> Self {
        Self::Subagent { agent_id: agent_id.into() }
    }
}

/// A message tracked for the lifetime of a session: carries a stable uuid,
/// the turn it belongs to, its [`MessageSource`], and tombstone/meta flags
/// used when building the API-facing transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedMessage {
    pub uuid: String,
    pub inner: Message,
    pub turn_id: String,
    pub source: MessageSource,
    meta: bool,
    tombstoned: bool,
}

impl TrackedMessage {
    pub fn new(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            inner,
            turn_id: turn_id.into(),
            source,
            meta: false,
            tombstoned: false,
        }
    }

    pub fn new_meta(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        let mut message = Self::new(inner, turn_id, source);
        message.meta = true;
        message
    }

    pub fn user(content: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::user(content), turn_id, MessageSource::User)
    }

    pub fn assistant(
        content: impl Into<String>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(Message::assistant(content), turn_id, MessageSource::assistant(request_id))
    }

    pub fn assistant_with_content(
        content: Vec<ContentBlock>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(Message::new(Role::Assistant, content), turn_id, MessageSource::assistant(request_id))
    }

    pub fn system(content: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::system(content), turn_id, MessageSource::System)
    }

    pub fn system_reminder(
        content: impl Into<String>,
        reminder_type: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        Self::new_meta(
            Message::user(content),
            turn_id,
            MessageSource::SystemReminder { reminder_type: reminder_type.into() },
        )
    }

    pub fn tool_result(
        call_id: impl Into<String>,
        content: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(
            Message::tool_result(call_id.clone(), ToolResultContent::Text(content.into())),
            turn_id,
            MessageSource::tool(call_id),
        )
    }

    pub fn tool_error(
        call_id: impl Into<String>,
        error: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(Message::tool_error(call_id.clone(), error), turn_id, MessageSource::tool(call_id))
    }

    pub fn role(&self) -> Role {
        self.inner.role
    }

    pub fn text(&self) -> String {
        crate::type_guards::get_text_content(&self.inner)
    }

    pub fn is_tombstoned(&self) -> bool {
        self.tombstoned
    }

    pub fn tombstone(&mut self) {
        self.tombstoned = true;
    }

    pub fn is_meta(&self) -> bool {
        self.meta
    }

    pub fn set_meta(&mut self, meta: bool) {
        self.meta = meta;
    }

    pub fn has_tool_calls(&self) -> bool {
        crate::type_guards::has_tool_use(&self.inner)
    }

    pub fn tool_calls(&self) -> Vec<ToolCall> {
        crate::type_guards::get_tool_calls(&self.inner)
    }
}

impl From<TrackedMessage> for Message {
    fn from(tracked: TrackedMessage) -> Self {
        tracked.inner
    }
}

#[cfg(test)]
#[path = "tracked.test.rs"]
mod tests;
