//! Question workflow DTOs for `/v1/question`.

use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuestionReplyRequest {
    pub answers: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct QuestionRequestResponse {
    pub id: String,
    pub session_id: String,
    pub questions: Vec<String>,
}
