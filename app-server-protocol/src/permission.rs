//! Permission workflow DTOs for `/v1/permission`.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// Mirrors `conduit_context::permission_engine::PermissionReply` at the wire
/// boundary so this crate has no compile-time dependency on `conduit-context`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PermissionReplyValue {
    Once,
    Always,
    Reject,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PermissionReplyRequest {
    pub reply: PermissionReplyValue,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PermissionRequestResponse {
    pub id: String,
    pub session_id: String,
    pub permission: String,
    pub patterns: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Value>,
}
