//! Health and filesystem-path resources.

use schemars::JsonSchema;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct HealthResponse {
    #[serde(default = "default_status")]
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: default_status(),
        }
    }
}

fn default_status() -> String {
    "ok".to_string()
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct PathsResponse {
    pub home: String,
    pub state: String,
    pub config: String,
    pub cwd: String,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct SkillResponse {
    pub name: String,
    pub description: String,
    pub location: String,
}
