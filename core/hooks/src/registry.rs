//! Hook registry for storing and dispatching hooks.
//!
//! The `HookRegistry` is the central coordinator: it stores all registered
//! hooks and, when an event occurs, finds the matching hooks and executes
//! them concurrently.

use std::sync::RwLock;
use std::time::Instant;

use tracing::info;
use tracing::warn;

use crate::context::HookContext;
use crate::definition::HookDefinition;
use crate::definition::HookHandler;
use crate::event::HookEventType;
use crate::handlers::command::CommandHandler;
use crate::result::HookOutcome;
use crate::result::HookResult;

/// Central registry that stores hooks and dispatches events.
///
/// Uses interior mutability (`RwLock`) so execution can proceed through a
/// shared reference (`Arc<HookRegistry>`).
pub struct HookRegistry {
    hooks: RwLock<Vec<HookDefinition>>,
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl HookRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self { hooks: RwLock::new(Vec::new()) }
    }

    /// Registers a hook definition.
    pub fn register(&self, hook: HookDefinition) {
        info!(name = %hook.name, event = hook.event_type.as_str(), "Registered hook");
        if let Ok(mut hooks) = self.hooks.write() {
            hooks.push(hook);
        }
    }

    /// Registers multiple hook definitions.
    pub fn register_all(&self, hooks: impl IntoIterator<Item = HookDefinition>) {
        for hook in hooks {
            self.register(hook);
        }
    }

    /// Returns all hooks registered for a given event type.
    pub fn hooks_for_event(&self, event_type: &HookEventType) -> Vec<HookDefinition> {
        if let Ok(hooks) = self.hooks.read() {
            hooks.iter().filter(|h| h.enabled && h.event_type == *event_type).cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Executes all hooks matching the context's event type, in parallel.
    ///
    /// Returns outcomes in registration order.
    pub async fn execute(&self, ctx: &HookContext) -> Vec<HookOutcome> {
        let matching = self.hooks_for_event(&ctx.event_type);
        if matching.is_empty() {
            return Vec::new();
        }

        let futures: Vec<_> = matching
            .iter()
            .map(|hook| {
                let handler = hook.handler.clone();
                let hook_name = hook.name.clone();
                let timeout_secs = hook.effective_timeout_secs();
                let ctx = ctx.clone();
                async move {
                    let start = Instant::now();
                    let timeout = tokio::time::Duration::from_secs(timeout_secs as u64);
                    let result = tokio::time::timeout(timeout, execute_handler(&handler, &ctx)).await;
                    let duration_ms = start.elapsed().as_millis() as i64;

                    let result = match result {
                        Ok(r) => r,
                        Err(_) => {
                            warn!(hook_name = %hook_name, timeout_secs, "Hook timed out");
                            HookResult::Continue
                        }
                    };

                    HookOutcome { hook_name, result, duration_ms }
                }
            })
            .collect();

        futures::future::join_all(futures).await
    }

    /// Removes all registered hooks.
    pub fn clear(&self) {
        if let Ok(mut hooks) = self.hooks.write() {
            hooks.clear();
        }
    }

    /// Returns the number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.read().map(|h| h.len()).unwrap_or(0)
    }

    /// Returns `true` if no hooks are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy of all registered hooks.
    pub fn all_hooks(&self) -> Vec<HookDefinition> {
        self.hooks.read().map(|h| h.clone()).unwrap_or_default()
    }
}

async fn execute_handler(handler: &HookHandler, ctx: &HookContext) -> HookResult {
    match handler {
        HookHandler::Command { command, args } => CommandHandler::execute(command, args, ctx).await,
        HookHandler::Inline => {
            warn!("Inline handler cannot be dispatched through the registry");
            HookResult::Continue
        }
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry").field("hooks_count", &self.len()).finish()
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
