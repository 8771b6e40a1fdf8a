//! Provider-facing tool definition: the `{name, description, input_schema}`
//! triple sent to the model, independent of any specific provider SDK.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Value,
}

impl ToolDefinition {
    pub fn full(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            input_schema,
        }
    }

    pub fn bare(name: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema,
        }
    }
}

/// A single tool invocation requested by the model, as surfaced from the
/// provider stream: a call ID, the tool name, and its (already-parsed)
/// JSON input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: Value,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, input: Value) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_sets_description() {
        let def = ToolDefinition::full("Read", "reads a file", serde_json::json!({"type": "object"}));
        assert_eq!(def.name, "Read");
        assert_eq!(def.description, Some("reads a file".to_string()));
    }

    #[test]
    fn bare_has_no_description() {
        let def = ToolDefinition::bare("Read", serde_json::json!({"type": "object"}));
        assert!(def.description.is_none());
    }

    #[test]
    fn tool_call_carries_id_name_input() {
        let call = ToolCall::new("call-1", "Read", serde_json::json!({"file_path": "a.rs"}));
        assert_eq!(call.id, "call-1");
        assert_eq!(call.name, "Read");
    }
}
