//! Normalized stream finish reasons.

use serde::{Deserialize, Serialize};

/// Closed set of finish reasons every provider's stream normalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    #[serde(rename = "tool-calls")]
    ToolCalls,
    Length,
    ContentFilter,
    Unknown,
}

impl FinishReason {
    /// Map a provider-native finish-reason string onto the closed set.
    pub fn normalize(raw: &str) -> Self {
        match raw {
            "stop" | "end_turn" | "complete" => Self::Stop,
            "tool_calls" | "tool-calls" | "tool_use" | "function_call" => Self::ToolCalls,
            "length" | "max_tokens" | "max_output_tokens" => Self::Length,
            "content_filter" | "safety" => Self::ContentFilter,
            _ => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_known_provider_strings() {
        assert_eq!(FinishReason::normalize("end_turn"), FinishReason::Stop);
        assert_eq!(FinishReason::normalize("tool_use"), FinishReason::ToolCalls);
        assert_eq!(FinishReason::normalize("max_tokens"), FinishReason::Length);
        assert_eq!(FinishReason::normalize("safety"), FinishReason::ContentFilter);
    }

    #[test]
    fn unknown_strings_fall_back_to_unknown() {
        assert_eq!(FinishReason::normalize("whatever"), FinishReason::Unknown);
    }
}
