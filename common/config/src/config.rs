//! The recognized configuration surface: everything that can be set in
//! `config.toml`/`config.json`, overridden by environment variables, and
//! consumed by the session runtime.

use conduit_protocol::AttachmentConfig;
use conduit_protocol::CompactConfig;
use conduit_protocol::Features;
use conduit_protocol::PathConfig;
use conduit_protocol::PermissionBehavior;
use conduit_protocol::PlanModeConfig;
use conduit_protocol::SandboxMode;
use conduit_protocol::ToolConfig;
use conduit_protocol::WebFetchConfig;
use conduit_protocol::WebSearchConfig;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Logging sink configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub console: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub access_log: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
            console: true,
            file: None,
            access_log: false,
            dev_file: None,
        }
    }
}

/// Log line rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// A configured LLM provider endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEntry {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    pub models: Vec<String>,
}

/// A named subagent profile available to the Task tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

/// A user-defined slash command template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub template: String,
}

/// Skill discovery roots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsConfig {
    pub paths: Vec<PathBuf>,
    pub urls: Vec<String>,
}

/// A configured MCP server, either spawned locally or reached over HTTP/SSE.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpServerEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Permission rules: either a single default behavior for everything, or a
/// per-tool-pattern map (`"Bash(git push:*)" -> "ask"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Permission {
    Default(PermissionBehavior),
    Rules(HashMap<String, PermissionBehavior>),
}

impl Default for Permission {
    fn default() -> Self {
        Self::Default(PermissionBehavior::Ask)
    }
}

/// How long a remembered "always allow"/"always deny" choice persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionMemoryScope {
    #[default]
    Turn,
    Session,
    Project,
    Persisted,
}

/// Opt-in experimental behavior toggles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentalConfig {
    pub batch_tool: bool,
    pub plan_mode: bool,
    pub enable_exa: bool,
    pub lsp_tool: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_tools: Option<Vec<String>>,
}

/// HTTP/SSE facade listen settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub hostname: String,
    pub mdns: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mdns_domain: Option<String>,
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            hostname: "127.0.0.1".to_string(),
            mdns: false,
            mdns_domain: None,
            cors: false,
        }
    }
}

/// Terminal UI preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    pub scroll_speed: u32,
    pub diff_style: DiffStyle,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            scroll_speed: 3,
            diff_style: DiffStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStyle {
    #[default]
    Unified,
    SideBySide,
}

/// How session transcripts may be shared outside the local machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Share {
    Manual,
    Auto,
    #[default]
    Disabled,
}

/// LSP integration settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LspConfig {
    pub enabled: bool,
    pub servers: HashMap<String, String>,
}

/// Formatter-on-save settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub enabled: bool,
    pub commands: HashMap<String, String>,
}

/// Complete resolved configuration for a session.
///
/// Built by [`crate::loader::ConfigLoader`] by layering, in increasing
/// precedence: compiled-in defaults, the config file, then environment
/// variables (see [`crate::env_loader::EnvLoader`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Option<String>,
    pub log_level: Option<String>,
    pub logging: LoggingConfig,

    pub model: Option<String>,
    pub small_model: Option<String>,
    pub default_agent: Option<String>,

    pub provider: HashMap<String, ProviderEntry>,
    pub disabled_providers: Vec<String>,
    pub enabled_providers: Vec<String>,

    pub agent: HashMap<String, AgentEntry>,
    pub command: HashMap<String, CommandEntry>,
    pub skills: SkillsConfig,
    pub mcp: HashMap<String, McpServerEntry>,

    pub permission: Permission,
    pub permission_memory_scope: PermissionMemoryScope,
    pub tools: HashMap<String, bool>,
    pub strict_permissions: bool,
    pub continue_loop_on_deny: bool,

    pub experimental: ExperimentalConfig,
    pub server: ServerConfig,
    pub tui: TuiConfig,

    pub plugin: Vec<String>,
    pub instructions: Vec<String>,
    pub snapshot: Option<String>,
    pub share: Share,
    pub autoupdate: bool,

    pub compaction: CompactConfig,
    pub lsp: LspConfig,
    pub formatter: FormatterConfig,

    // Resolved at build time, not read directly off the config file.
    #[serde(skip)]
    pub sandbox_mode: SandboxMode,
    #[serde(skip)]
    pub features: Features,
    #[serde(skip)]
    pub tool_config: ToolConfig,
    #[serde(skip)]
    pub plan_config: PlanModeConfig,
    #[serde(skip)]
    pub attachment_config: AttachmentConfig,
    #[serde(skip)]
    pub path_config: PathConfig,
    #[serde(skip)]
    pub web_search_config: WebSearchConfig,
    #[serde(skip)]
    pub web_fetch_config: WebFetchConfig,
    #[serde(skip)]
    pub cwd: PathBuf,
    #[serde(skip)]
    pub conduit_home: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: None,
            log_level: None,
            logging: LoggingConfig::default(),
            model: None,
            small_model: None,
            default_agent: None,
            provider: HashMap::new(),
            disabled_providers: Vec::new(),
            enabled_providers: Vec::new(),
            agent: HashMap::new(),
            command: HashMap::new(),
            skills: SkillsConfig::default(),
            mcp: HashMap::new(),
            permission: Permission::default(),
            permission_memory_scope: PermissionMemoryScope::default(),
            tools: HashMap::new(),
            strict_permissions: false,
            continue_loop_on_deny: false,
            experimental: ExperimentalConfig::default(),
            server: ServerConfig::default(),
            tui: TuiConfig::default(),
            plugin: Vec::new(),
            instructions: Vec::new(),
            snapshot: None,
            share: Share::default(),
            autoupdate: true,
            compaction: CompactConfig::default(),
            lsp: LspConfig::default(),
            formatter: FormatterConfig::default(),
            sandbox_mode: SandboxMode::default(),
            features: Features::with_defaults(),
            tool_config: ToolConfig::default(),
            plan_config: PlanModeConfig::default(),
            attachment_config: AttachmentConfig::default(),
            path_config: PathConfig::default(),
            web_search_config: WebSearchConfig::default(),
            web_fetch_config: WebFetchConfig::default(),
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            conduit_home: crate::loader::default_config_dir(),
        }
    }
}

impl Config {
    /// Whether a named tool is enabled, defaulting to `true` when unlisted.
    pub fn is_tool_enabled(&self, tool_name: &str) -> bool {
        self.tools.get(tool_name).copied().unwrap_or(true)
    }

    /// Whether `provider_name` was explicitly disabled.
    pub fn is_provider_disabled(&self, provider_name: &str) -> bool {
        self.disabled_providers.iter().any(|p| p == provider_name)
    }

    /// Default permission behavior when no rule pattern matches a tool call.
    pub fn default_permission_behavior(&self) -> PermissionBehavior {
        match &self.permission {
            Permission::Default(behavior) => *behavior,
            Permission::Rules(_) => PermissionBehavior::Ask,
        }
    }

    /// Look up the permission rule for an exact pattern, if one was configured.
    pub fn permission_rule(&self, pattern: &str) -> Option<PermissionBehavior> {
        match &self.permission {
            Permission::Rules(rules) => rules.get(pattern).copied(),
            Permission::Default(_) => None,
        }
    }

    pub fn allows_write(&self) -> bool {
        self.sandbox_mode.allows_write()
    }

    pub fn is_path_writable(&self, path: &std::path::Path) -> bool {
        match self.sandbox_mode {
            SandboxMode::ReadOnly => false,
            SandboxMode::FullAccess => true,
            SandboxMode::WorkspaceWrite => path.starts_with(&self.cwd),
        }
    }
}

/// Overrides applied on top of the loaded [`Config`], e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub cwd: Option<PathBuf>,
    pub sandbox_mode: Option<SandboxMode>,
    pub model: Option<String>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_sandbox_mode(mut self, mode: SandboxMode) -> Self {
        self.sandbox_mode = Some(mode);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn apply(self, mut config: Config) -> Config {
        if let Some(cwd) = self.cwd {
            config.cwd = cwd;
        }
        if let Some(mode) = self.sandbox_mode {
            config.sandbox_mode = mode;
        }
        if let Some(model) = self.model {
            config.model = Some(model);
        }
        config
    }
}

#[cfg(test)]
#[path = "config.test.rs"]
mod tests;
