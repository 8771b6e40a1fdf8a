//! SSE envelope shared by the global and session-scoped event streams.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SseEnvelope {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl SseEnvelope {
    pub fn new(event_type: impl Into<String>, data: Value, timestamp_ms: i64) -> Self {
        Self {
            event_type: event_type.into(),
            data,
            timestamp: timestamp_ms,
            session_id: None,
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Render as a single `data: {...}\n\n` SSE frame.
    pub fn to_sse_line(&self) -> String {
        format!(
            "data: {}\n\n",
            serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
        )
    }
}
