//! Extended-thinking / reasoning-effort configuration for a single turn.

use crate::model::ReasoningEffort;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::str::FromStr;

/// Requested reasoning depth plus optional provider-specific budget knobs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ThinkingLevel {
    pub effort: ReasoningEffort,
    pub budget_tokens: Option<i64>,
    pub max_output_tokens: Option<i64>,
    pub interleaved: bool,
}

impl ThinkingLevel {
    pub fn new(effort: ReasoningEffort) -> Self {
        Self {
            effort,
            ..Default::default()
        }
    }

    pub fn with_budget(effort: ReasoningEffort, budget_tokens: i64) -> Self {
        Self {
            effort,
            budget_tokens: Some(budget_tokens),
            ..Default::default()
        }
    }

    pub fn none() -> Self {
        Self::new(ReasoningEffort::None)
    }

    pub fn low() -> Self {
        Self::new(ReasoningEffort::Low)
    }

    pub fn medium() -> Self {
        Self::new(ReasoningEffort::Medium)
    }

    pub fn high() -> Self {
        Self::new(ReasoningEffort::High)
    }

    pub fn xhigh() -> Self {
        Self::new(ReasoningEffort::XHigh)
    }

    pub fn is_enabled(&self) -> bool {
        self.effort != ReasoningEffort::None
    }

    pub fn set_budget(mut self, budget_tokens: i64) -> Self {
        self.budget_tokens = Some(budget_tokens);
        self
    }

    pub fn set_max_output_tokens(mut self, max_output_tokens: i64) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn set_interleaved(mut self, interleaved: bool) -> Self {
        self.interleaved = interleaved;
        self
    }

    /// Reject negative token budgets; providers reject them outright anyway.
    pub fn validate(&self) -> Result<(), String> {
        if self.budget_tokens.is_some_and(|v| v < 0) {
            return Err("budget_tokens must not be negative".to_string());
        }
        if self.max_output_tokens.is_some_and(|v| v < 0) {
            return Err("max_output_tokens must not be negative".to_string());
        }
        Ok(())
    }
}

impl std::fmt::Display for ThinkingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.effort)
    }
}

impl FromStr for ThinkingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let effort = match s {
            "none" => ReasoningEffort::None,
            "minimal" => ReasoningEffort::Minimal,
            "low" => ReasoningEffort::Low,
            "medium" => ReasoningEffort::Medium,
            "high" => ReasoningEffort::High,
            "xhigh" => ReasoningEffort::XHigh,
            other => return Err(format!("unknown thinking level: {other}")),
        };
        Ok(Self::new(effort))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ThinkingLevelObject {
    effort: ReasoningEffort,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    budget_tokens: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<i64>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    interleaved: bool,
}

impl Serialize for ThinkingLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let is_simple =
            self.budget_tokens.is_none() && self.max_output_tokens.is_none() && !self.interleaved;
        if is_simple {
            self.effort.to_string().serialize(serializer)
        } else {
            ThinkingLevelObject {
                effort: self.effort,
                budget_tokens: self.budget_tokens,
                max_output_tokens: self.max_output_tokens,
                interleaved: self.interleaved,
            }
            .serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for ThinkingLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            String(String),
            Object(ThinkingLevelObject),
        }

        match Repr::deserialize(deserializer)? {
            Repr::String(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Object(obj) => Ok(ThinkingLevel {
                effort: obj.effort,
                budget_tokens: obj.budget_tokens,
                max_output_tokens: obj.max_output_tokens,
                interleaved: obj.interleaved,
            }),
        }
    }
}

#[cfg(test)]
#[path = "thinking.test.rs"]
mod tests;
