//! Process-wide application context.
//!
//! Bundles every subsystem a session needs — the event bus, tool registry,
//! and the permission/question/skills/agents/mcp/lsp/runner seams other
//! crates plug concrete implementations into — behind one value with an
//! idempotent startup and a shutdown that unwinds every subscription and
//! background task it handed out.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use conduit_bus::EventBus;
use conduit_tools::{PermissionRequester, ToolRegistry};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Interactive clarifying-question workflow, the `question` seam of
/// [`AppContext`]. Implemented outside this crate by whatever drives the
/// session UI.
#[async_trait]
pub trait QuestionRequester: Send + Sync {
    /// Suspend until the UI answers every question or rejects the batch.
    async fn ask(&self, session_id: &str, questions: Vec<String>) -> Result<Vec<String>, QuestionRejected>;
}

/// Raised when a question batch is rejected by the UI; the tool executor
/// converts this into a blocked-tool error.
#[derive(Debug, Clone)]
pub struct QuestionRejected {
    pub reason: String,
}

/// Named skill/prompt-fragment lookup, the `skills` seam.
pub trait SkillsProvider: Send + Sync {
    fn list(&self) -> Vec<String>;
    fn content(&self, name: &str) -> Option<String>;
}

/// Subagent definition lookup, the `agents` seam.
pub trait AgentsProvider: Send + Sync {
    fn list(&self) -> Vec<String>;
}

/// MCP server connection pool, the `mcp` seam. Critical: a degraded MCP
/// subsystem does not fail startup, it is recorded unhealthy and the tool
/// resolver silently omits MCP-backed tools.
#[async_trait]
pub trait McpClient: Send + Sync {
    async fn start(&self) -> Result<(), String>;
    async fn shutdown(&self);
}

/// Language-server client pool, the `lsp` seam.
#[async_trait]
pub trait LspClient: Send + Sync {
    async fn start(&self) -> Result<(), String>;
    async fn shutdown(&self);
}

/// At-most-one-task-per-session registry, the `runner` seam (Session
/// Runtime). `start` must raise if a task is already live for
/// `session_id`; `interrupt` cancels it and clears per-session permission
/// and question state.
#[async_trait]
pub trait SessionRunner: Send + Sync {
    async fn interrupt(&self, session_id: &str);
    async fn shutdown(&self);
}

/// Health status of a subsystem tracked in [`AppContext`]'s health table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// One row of the health table described by the `mcp`/`lsp` health seam.
#[derive(Debug, Clone)]
pub struct SubsystemHealth {
    pub status: HealthStatus,
    pub critical: bool,
    pub error: Option<String>,
}

impl SubsystemHealth {
    fn healthy(critical: bool) -> Self {
        Self { status: HealthStatus::Healthy, critical, error: None }
    }

    fn degraded(critical: bool, error: impl Into<String>) -> Self {
        Self { status: HealthStatus::Degraded, critical, error: Some(error.into()) }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

/// The bundle described by the App Context module: every subsystem a
/// session needs, plus a startup/shutdown lifecycle.
#[derive(Clone)]
pub struct AppContext {
    pub bus: EventBus,
    pub tools: Arc<RwLock<ToolRegistry>>,
    pub permission: Option<Arc<dyn PermissionRequester>>,
    pub question: Option<Arc<dyn QuestionRequester>>,
    pub skills: Option<Arc<dyn SkillsProvider>>,
    pub agents: Option<Arc<dyn AgentsProvider>>,
    pub mcp: Option<Arc<dyn McpClient>>,
    pub lsp: Option<Arc<dyn LspClient>>,
    pub runner: Option<Arc<dyn SessionRunner>>,
    health: Arc<RwLock<HashMap<&'static str, SubsystemHealth>>>,
    started: Arc<AtomicBool>,
    cancellation: CancellationToken,
}

impl AppContext {
    /// Construct a context with no optional subsystems wired; callers
    /// attach `mcp`/`lsp`/`skills`/`agents`/`permission`/`question`/`runner`
    /// before calling [`AppContext::startup`].
    pub fn new() -> Self {
        Self {
            bus: EventBus::new(),
            tools: Arc::new(RwLock::new(ToolRegistry::new())),
            permission: None,
            question: None,
            skills: None,
            agents: None,
            mcp: None,
            lsp: None,
            runner: None,
            health: Arc::new(RwLock::new(HashMap::new())),
            started: Arc::new(AtomicBool::new(false)),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Start every critical subsystem. Idempotent: a second call is a
    /// no-op. MCP failures are recorded in the health table rather than
    /// propagated; a failed LSP start is also recorded as degraded since
    /// neither subsystem is required for a session to run.
    pub async fn startup(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        if let Some(mcp) = &self.mcp {
            let health = match mcp.start().await {
                Ok(()) => SubsystemHealth::healthy(true),
                Err(error) => SubsystemHealth::degraded(true, error),
            };
            self.health.write().await.insert("mcp", health);
        }

        if let Some(lsp) = &self.lsp {
            let health = match lsp.start().await {
                Ok(()) => SubsystemHealth::healthy(false),
                Err(error) => SubsystemHealth::degraded(false, error),
            };
            self.health.write().await.insert("lsp", health);
        }
    }

    /// Whether the named subsystem is present and healthy. Tool resolvers
    /// consult this to decide whether to omit MCP-backed tools.
    pub async fn is_healthy(&self, subsystem: &str) -> bool {
        self.health
            .read()
            .await
            .get(subsystem)
            .map(SubsystemHealth::is_healthy)
            .unwrap_or(true)
    }

    pub async fn health_snapshot(&self) -> HashMap<&'static str, SubsystemHealth> {
        self.health.read().await.clone()
    }

    /// Unsubscribe every session-scoped bus listener (by dropping the root
    /// bus's handler tables) and cancel every outstanding runtime task.
    pub async fn shutdown(&self) {
        self.cancellation.cancel();

        if let Some(runner) = &self.runner {
            runner.shutdown().await;
        }
        if let Some(mcp) = &self.mcp {
            mcp.shutdown().await;
        }
        if let Some(lsp) = &self.lsp {
            lsp.shutdown().await;
        }

        self.started.store(false, Ordering::SeqCst);
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("started", &self.started.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "app_context.test.rs"]
mod tests;
