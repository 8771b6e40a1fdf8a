//! Session resource DTOs for the `/v1/session` surface.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
pub struct SessionTimeResponse {
    pub created: i64,
    pub updated: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SessionResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<SessionTimeResponse>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SessionCreateRequest {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
    #[serde(default)]
    pub directory: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SessionUpdateRequest {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SessionMessageRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub agent: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub parts: Option<Vec<Value>>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SessionCompactRequest {
    #[serde(default)]
    pub auto: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SessionDeleteMessagesRequest {
    pub message_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SessionRestoreMessagesRequest {
    pub messages: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SessionMessageResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assistant_message_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
pub struct SessionDeleteResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
pub struct SessionDeleteMessagesResponse {
    pub deleted: usize,
}

#[derive(Debug, Clone, Copy, Serialize, JsonSchema)]
pub struct SessionRestoreMessagesResponse {
    pub restored: usize,
}

#[derive(Debug, Clone, Default, Serialize, JsonSchema)]
pub struct SessionListMessageResponse {
    pub id: String,
    pub role: String,
    #[serde(default)]
    pub info: Value,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub parts: Vec<Value>,
}

#[cfg(test)]
#[path = "session.test.rs"]
mod tests;
