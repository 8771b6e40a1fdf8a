//! MCP tool-discovery tuning: when to switch from listing every tool to an
//! on-demand search, and how long discovered tool lists stay cached.

use serde::Deserialize;
use serde::Serialize;

/// Controls the fallback from "send every MCP tool" to "expose a search tool"
/// once the tool list would eat too much of the context window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpAutoSearchConfig {
    pub enabled: bool,
    /// Fraction of the context window tool definitions may occupy before
    /// auto-search kicks in.
    pub context_threshold: f32,
    /// Below this context window, auto-search never engages.
    pub min_context_window: i64,
    pub search_on_list_changed: bool,
    /// Rough characters-per-token ratio used to estimate tool definition size.
    pub chars_per_token: f32,
}

impl Default for McpAutoSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            context_threshold: 0.10,
            min_context_window: 32000,
            search_on_list_changed: true,
            chars_per_token: 2.5,
        }
    }
}

impl McpAutoSearchConfig {
    /// Character count above which auto-search engages for a given context window.
    pub fn char_threshold(&self, context_window: i64) -> i64 {
        (self.context_threshold as f64 * context_window as f64 * self.chars_per_token as f64)
            as i64
    }

    pub fn should_use_auto_search(
        &self,
        context_window: i64,
        tool_definition_chars: i64,
        supports_tool_calling: bool,
    ) -> bool {
        if !self.enabled || !supports_tool_calling || context_window < self.min_context_window {
            return false;
        }
        tool_definition_chars >= self.char_threshold(context_window)
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.context_threshold) {
            return Err("context_threshold must be between 0.0 and 1.0".to_string());
        }
        if self.min_context_window < 0 {
            return Err("min_context_window must not be negative".to_string());
        }
        Ok(())
    }
}

/// Controls how long a server's discovered tool list is cached before
/// re-querying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpToolCacheConfig {
    pub enabled: bool,
    pub ttl_secs: i64,
    pub invalidate_on_list_changed: bool,
}

impl Default for McpToolCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            invalidate_on_list_changed: true,
        }
    }
}

impl McpToolCacheConfig {
    pub fn ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.ttl_secs.max(0) as u64)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs < 0 {
            return Err("ttl_secs must not be negative".to_string());
        }
        Ok(())
    }
}

/// MCP-wide tuning: tool discovery and caching behavior.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    pub auto_search: McpAutoSearchConfig,
    pub tool_cache: McpToolCacheConfig,
}

impl McpConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.auto_search.validate()?;
        self.tool_cache.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mcp_config.test.rs"]
mod tests;
