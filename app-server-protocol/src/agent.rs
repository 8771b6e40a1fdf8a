//! Agent-roster DTOs for `/v1/agent`.

use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct AgentResponse {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub hidden: bool,
}

fn default_mode() -> String {
    "primary".to_string()
}
