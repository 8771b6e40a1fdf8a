//! Tool lookup, MCP tool-descriptor bookkeeping, and feature-gated
//! definition listing.

use crate::tool::Tool;
use conduit_protocol::Features;
use conduit_protocol::McpAutoSearchConfig;
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Narrow descriptor for a tool discovered from an MCP server. The MCP
/// subsystem itself lives outside this crate; this is the only shape it
/// hands back to the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct McpToolInfo {
    pub server: String,
    pub name: String,
    pub description: Option<String>,
    pub input_schema: serde_json::Value,
}

impl McpToolInfo {
    /// Name the tool is addressed by once registered, e.g. `mcp__github_search`.
    pub fn qualified_name(&self) -> String {
        format!("mcp__{}_{}", self.server, self.name)
    }

    fn description_chars(&self) -> usize {
        self.description.as_deref().map(str::len).unwrap_or(0)
    }
}

/// Holds every executable tool (builtin or MCP-backed) plus metadata about
/// discovered-but-not-yet-materialised MCP tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
    aliases: HashMap<String, String>,
    mcp_tools: BTreeMap<String, Vec<McpToolInfo>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    /// Register a tool under its own name plus an additional alias.
    pub fn register_with_alias(&mut self, tool: impl Tool + 'static, alias: impl Into<String>) {
        let name = tool.name().to_string();
        self.aliases.insert(alias.into(), name.clone());
        self.tools.insert(name, Box::new(tool));
    }

    pub fn has(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|name| self.tools.contains_key(name))
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        let resolved = self.resolve(name)?;
        self.tools.get(resolved).map(|tool| tool.as_ref())
    }

    fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        if self.tools.contains_key(name) {
            Some(name)
        } else {
            self.aliases.get(name).map(String::as_str)
        }
    }

    /// Record the tool descriptors an MCP server advertised. Does not make
    /// them executable; callers must separately `register` a forwarding
    /// [`Tool`] under [`McpToolInfo::qualified_name`] if they want the tool
    /// to be directly callable rather than deferred.
    pub fn register_mcp_server(&mut self, server: impl Into<String>, tools: Vec<McpToolInfo>) {
        let server = server.into();
        let tools = tools
            .into_iter()
            .map(|mut info| {
                info.server = server.clone();
                info
            })
            .collect();
        self.mcp_tools.insert(server, tools);
    }

    pub fn unregister_mcp_server(&mut self, server: &str) {
        self.mcp_tools.remove(server);
    }

    pub fn is_mcp_tool(&self, name: &str) -> bool {
        self.mcp_tools
            .values()
            .flatten()
            .any(|info| info.qualified_name() == name)
    }

    /// Snapshot of every discovered MCP tool descriptor, across all servers.
    pub fn mcp_tool_snapshot(&self) -> Vec<McpToolInfo> {
        self.mcp_tools.values().flatten().cloned().collect()
    }

    /// Total character count across every MCP tool's description, used to
    /// decide whether auto-search tool discovery should engage.
    pub fn mcp_description_chars(&self) -> usize {
        self.mcp_tools
            .values()
            .flatten()
            .map(McpToolInfo::description_chars)
            .sum()
    }

    pub fn should_enable_auto_search(&self, context_window: i64, config: &McpAutoSearchConfig) -> bool {
        let chars = self.mcp_description_chars() as i64;
        if chars == 0 {
            return false;
        }
        config.should_use_auto_search(context_window, chars, true)
    }

    /// Remove every registered MCP-backed tool whose name matches a
    /// discovered descriptor, returning the names removed. Their metadata
    /// stays available via [`Self::is_mcp_tool`]; this is used when auto
    /// search mode replaces the full tool list with a search tool.
    pub fn defer_mcp_tool_definitions(&mut self) -> Vec<String> {
        let qualified: Vec<String> = self
            .mcp_tools
            .values()
            .flatten()
            .map(McpToolInfo::qualified_name)
            .collect();
        qualified
            .into_iter()
            .filter(|name| self.tools.remove(name).is_some())
            .collect()
    }

    pub fn all_definitions(&self) -> Vec<conduit_protocol::ToolDefinition> {
        let mut defs: Vec<_> = self
            .tools
            .values()
            .map(|tool| tool.to_definition())
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Definitions filtered by the active feature set, dropping any tool
    /// whose [`Tool::feature_gate`] names a disabled feature.
    pub fn definitions_filtered(
        &self,
        features: &Features,
    ) -> Vec<conduit_protocol::ToolDefinition> {
        let mut defs: Vec<_> = self
            .tools
            .values()
            .filter(|tool| tool.feature_gate().is_none_or(|feature| features.enabled(feature)))
            .map(|tool| tool.to_definition())
            .collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
