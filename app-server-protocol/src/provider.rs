//! Provider and model-catalog DTOs for `/v1/provider`.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ProviderResponse {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub model_count: usize,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ProviderModelResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ProviderConnectRequest {
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub config: Option<Value>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ProviderConnectResponse {
    pub ok: bool,
    pub provider_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderResponse>,
}
