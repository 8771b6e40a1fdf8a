//! Hook definition types.
//!
//! A `HookDefinition` describes a single hook: when it fires (event type)
//! and what it does (handler).

use serde::Deserialize;
use serde::Serialize;

use crate::event::HookEventType;

/// Defines a single hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookDefinition {
    /// The name of this hook (for logging and identification).
    pub name: String,

    /// The event type that triggers this hook.
    pub event_type: HookEventType,

    /// The handler to execute when this hook fires.
    pub handler: HookHandler,

    /// Whether this hook is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Timeout in seconds for hook execution.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: i32,
}

impl HookDefinition {
    /// Effective timeout, clamped to something sane if misconfigured.
    pub fn effective_timeout_secs(&self) -> i32 {
        if self.timeout_secs <= 0 {
            default_timeout_secs()
        } else {
            self.timeout_secs
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_timeout_secs() -> i32 {
    30
}

/// The action performed by a hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HookHandler {
    /// Run an external command, passing the `HookContext` as JSON on stdin.
    Command {
        /// The command to execute.
        command: String,
        /// Arguments for the command.
        #[serde(default)]
        args: Vec<String>,
    },

    /// An inline function handler (not serializable, never dispatched through
    /// the registry's command path; registered directly by callers that hold
    /// the registry).
    #[serde(skip)]
    Inline,
}

#[cfg(test)]
#[path = "definition.test.rs"]
mod tests;
