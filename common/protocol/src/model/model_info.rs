//! Model capability metadata, merged from built-in defaults, user config and
//! provider-specific overrides.

use super::ReasoningSummary;
use crate::ThinkingLevel;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// A capability a model may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    TextGeneration,
    Vision,
    Audio,
    Streaming,
    ToolUse,
    PromptCaching,
    ExtendedThinking,
}

/// Resolved model metadata: context window, capabilities, default reasoning
/// settings and any provider-specific request options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thinking_level: Option<ThinkingLevel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_thinking_levels: Option<Vec<ThinkingLevel>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_summary: Option<ReasoningSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tool_output_chars: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tools: Option<Vec<String>>,

    /// Provider-specific request body overrides (e.g. `response_format`, `seed`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, serde_json::Value>>,
}

impl ModelInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_context_window(mut self, window: i64) -> Self {
        self.context_window = Some(window);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_timeout_secs(mut self, secs: i64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.default_thinking_level = Some(level);
        self
    }

    pub fn with_request_options(mut self, options: HashMap<String, serde_json::Value>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn display_name_or_slug(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.slug)
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.contains(&capability))
    }

    pub fn get_request_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.as_ref().and_then(|opts| opts.get(key))
    }

    /// Nearest configured thinking level to `requested`, by effort distance.
    pub fn nearest_supported_level(&self, requested: &ThinkingLevel) -> Option<&ThinkingLevel> {
        self.supported_thinking_levels.as_ref().and_then(|levels| {
            levels
                .iter()
                .min_by_key(|level| (level.effort as i32 - requested.effort as i32).abs())
        })
    }

    /// Like [`Self::nearest_supported_level`] but falls back to `requested`
    /// unchanged when no supported levels are configured.
    pub fn resolve_thinking_level(&self, requested: &ThinkingLevel) -> ThinkingLevel {
        self.nearest_supported_level(requested)
            .copied()
            .unwrap_or(*requested)
    }

    /// Overlay `other`'s set fields onto `self`; unset fields in `other` are
    /// left untouched. `options` maps merge key by key.
    pub fn merge_from(&mut self, other: &Self) {
        if other.context_window.is_some() {
            self.context_window = other.context_window;
        }
        if other.max_output_tokens.is_some() {
            self.max_output_tokens = other.max_output_tokens;
        }
        if other.capabilities.is_some() {
            self.capabilities = other.capabilities.clone();
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.default_thinking_level.is_some() {
            self.default_thinking_level = other.default_thinking_level;
        }
        if other.supported_thinking_levels.is_some() {
            self.supported_thinking_levels = other.supported_thinking_levels.clone();
        }
        if other.reasoning_summary.is_some() {
            self.reasoning_summary = other.reasoning_summary;
        }
        if other.max_tool_output_chars.is_some() {
            self.max_tool_output_chars = other.max_tool_output_chars;
        }
        if other.excluded_tools.is_some() {
            self.excluded_tools = other.excluded_tools.clone();
        }
        match (&mut self.options, &other.options) {
            (Some(base), Some(overlay)) => {
                for (k, v) in overlay {
                    base.insert(k.clone(), v.clone());
                }
            }
            (None, Some(overlay)) => self.options = Some(overlay.clone()),
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "model_info.test.rs"]
mod tests;
