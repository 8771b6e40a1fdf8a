//! Streaming tool executor.
//!
//! This module provides [`StreamingToolExecutor`], which runs exactly one
//! tool call at a time. Concurrency across a turn's tool calls comes from
//! the stream runner driving multiple sequential tool-call-end chunks, not
//! from this executor running calls in parallel — every call is queued and
//! then awaited to completion before the next one starts.

use crate::context::ApprovalStore;
use crate::context::FileTracker;
use crate::context::PermissionRequester;
use crate::context::ToolContext;
use crate::context::ToolContextBuilder;
use crate::doom_loop::DoomLoopDetector;
use crate::error::Result;
use crate::registry::ToolRegistry;
use crate::result_persistence;
use conduit_protocol::AbortReason;
use conduit_protocol::LoopEvent;
use conduit_protocol::PermissionMode;
use conduit_protocol::ToolCall;
use conduit_protocol::ToolOutput;
use conduit_protocol::ValidationResult;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Configuration for the tool executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Working directory for tool execution.
    pub cwd: PathBuf,
    /// Session ID.
    pub session_id: String,
    /// Permission mode.
    pub permission_mode: PermissionMode,
    /// Default timeout for tool execution (seconds).
    pub default_timeout_secs: i64,
    /// Session directory for storing large tool results.
    ///
    /// When set, tool results exceeding the configured size threshold are
    /// persisted to `{session_dir}/tool-results/{call_id}.txt`.
    pub session_dir: Option<PathBuf>,
    /// Tool configuration for result persistence settings (preview size, enable flag).
    pub tool_config: conduit_protocol::ToolConfig,
    /// Feature flags for tool enablement.
    pub features: conduit_protocol::Features,
    /// Web search configuration.
    pub web_search_config: conduit_protocol::WebSearchConfig,
    /// Web fetch configuration.
    pub web_fetch_config: conduit_protocol::WebFetchConfig,
    /// Model-level cap on tool output size (characters).
    /// When set, applied after per-tool truncation but before persistence.
    pub max_tool_output_chars: Option<i32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/")),
            session_id: String::new(),
            permission_mode: PermissionMode::Default,
            default_timeout_secs: 120,
            session_dir: None,
            tool_config: conduit_protocol::ToolConfig::default(),
            features: conduit_protocol::Features::with_defaults(),
            web_search_config: conduit_protocol::WebSearchConfig::default(),
            web_fetch_config: conduit_protocol::WebFetchConfig::default(),
            max_tool_output_chars: None,
        }
    }
}

/// Pending tool call waiting for execution.
#[derive(Debug)]
struct PendingToolCall {
    tool_call: ToolCall,
    #[allow(dead_code)]
    queued_at: std::time::Instant,
}

/// Result from a tool execution.
#[derive(Debug)]
pub struct ToolExecutionResult {
    /// Tool call ID.
    pub call_id: String,
    /// Tool name.
    pub name: String,
    /// Execution result.
    pub result: Result<ToolOutput>,
}

/// Streaming tool executor. Runs one tool call at a time, in arrival
/// order; there is no concurrent tool execution inside a turn.
///
/// # Example
///
/// ```ignore
/// let executor = StreamingToolExecutor::new(registry, config, event_tx);
///
/// // When content_block_stop for tool_use is received, queue the call.
/// executor.on_tool_complete(tool_call).await;
///
/// // After message_stop - run every queued call, one after another.
/// executor.execute_pending_unsafe().await;
///
/// // Collect results.
/// let results = executor.drain().await;
/// ```
pub struct StreamingToolExecutor {
    registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    event_tx: Option<mpsc::Sender<LoopEvent>>,
    cancel_token: CancellationToken,
    approval_store: Arc<Mutex<ApprovalStore>>,
    file_tracker: Arc<Mutex<FileTracker>>,
    /// Calls queued for sequential execution.
    pending: Arc<Mutex<Vec<PendingToolCall>>>,
    /// Completed results waiting to be collected.
    completed_results: Arc<Mutex<Vec<ToolExecutionResult>>>,
    /// Optional permission requester for interactive approval flow.
    permission_requester: Option<Arc<dyn PermissionRequester>>,
    /// Optional permission rule evaluator.
    permission_evaluator: Option<crate::permission_rules::PermissionRuleEvaluator>,
    /// Allowlist of tool names the model was actually given.
    ///
    /// Set after tool selection via [`Self::set_allowed_tool_names`]. When
    /// `Some`, only these tools can be executed; all others get `NotFound`.
    /// When `None` (default), all registered tools are executable.
    allowed_tool_names: Arc<std::sync::RwLock<Option<HashSet<String>>>>,
    /// Repeated-call guard shared across every call this executor runs.
    doom_loop: Arc<DoomLoopDetector>,
}

impl StreamingToolExecutor {
    /// Create a new executor.
    pub fn new(
        registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
        event_tx: Option<mpsc::Sender<LoopEvent>>,
    ) -> Self {
        Self {
            registry,
            config,
            event_tx,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            pending: Arc::new(Mutex::new(Vec::new())),
            completed_results: Arc::new(Mutex::new(Vec::new())),
            permission_requester: None,
            permission_evaluator: None,
            allowed_tool_names: Arc::new(std::sync::RwLock::new(None)),
            doom_loop: Arc::new(DoomLoopDetector::new()),
        }
    }

    /// Set the cancellation token.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Set the approval store.
    pub fn with_approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.approval_store = store;
        self
    }

    /// Set the file tracker.
    pub fn with_file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.file_tracker = tracker;
        self
    }

    /// Set the permission requester for interactive approval flow.
    pub fn with_permission_requester(mut self, requester: Arc<dyn PermissionRequester>) -> Self {
        self.permission_requester = Some(requester);
        self
    }

    /// Set the permission rule evaluator.
    pub fn with_permission_evaluator(
        mut self,
        evaluator: crate::permission_rules::PermissionRuleEvaluator,
    ) -> Self {
        self.permission_evaluator = Some(evaluator);
        self
    }

    /// Set the allowlist of tool names that the model was given.
    ///
    /// Any tool call whose name is not in this set is rejected with
    /// `NotFound`, preventing hallucinated or injected calls to tools the
    /// model was never offered.
    pub fn set_allowed_tool_names(&self, names: HashSet<String>) {
        *self.allowed_tool_names.write().unwrap() = Some(names);
    }

    fn is_tool_allowed(&self, name: &str) -> bool {
        match self.allowed_tool_names.read().unwrap().as_ref() {
            None => true,
            Some(set) => set.contains(name),
        }
    }

    /// Called when a tool_use block completes during streaming. The call is
    /// queued; nothing executes until [`Self::execute_pending_unsafe`] (or a
    /// later call to it) drains the queue.
    pub async fn on_tool_complete(&self, tool_call: ToolCall) {
        let call_id = &tool_call.id;
        let name = &tool_call.name;

        debug!(call_id = %call_id, name = %name, "Tool use complete");

        if !self.is_tool_allowed(name) {
            debug!(call_id = %call_id, name = %name, "Tool not in allowed set, rejecting");
            let result =
                Err(crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build());
            self.emit_completed(call_id, &result).await;
            self.completed_results
                .lock()
                .await
                .push(ToolExecutionResult {
                    call_id: call_id.clone(),
                    name: name.clone(),
                    result,
                });
            return;
        }

        self.emit_event(LoopEvent::ToolUseQueued {
            call_id: call_id.clone(),
            name: name.clone(),
            input: tool_call.input.clone(),
        })
        .await;

        self.pending.lock().await.push(PendingToolCall {
            tool_call,
            queued_at: std::time::Instant::now(),
        });
    }

    /// Run every queued call, strictly one at a time, in arrival order.
    pub async fn execute_pending_unsafe(&self) {
        loop {
            let next = {
                let mut lock = self.pending.lock().await;
                if lock.is_empty() {
                    None
                } else {
                    Some(lock.remove(0))
                }
            };

            let Some(pending_call) = next else {
                break;
            };

            if self.cancel_token.is_cancelled() {
                break;
            }

            let tool_call = pending_call.tool_call;
            let call_id = tool_call.id.clone();
            let name = tool_call.name.clone();

            if !self.is_tool_allowed(&name) {
                debug!(call_id = %call_id, name = %name, "Tool not in allowed set, rejecting");
                let result =
                    Err(crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build());
                self.emit_completed(&call_id, &result).await;
                self.completed_results
                    .lock()
                    .await
                    .push(ToolExecutionResult {
                        call_id,
                        name,
                        result,
                    });
                continue;
            }

            self.execute_single_tool(tool_call).await;
        }
    }

    /// Execute one tool call to completion before returning.
    async fn execute_single_tool(&self, tool_call: ToolCall) {
        let call_id = tool_call.id.clone();
        let name = tool_call.name.clone();

        self.emit_event(LoopEvent::ToolUseStarted {
            call_id: call_id.clone(),
            name: name.clone(),
        })
        .await;

        let ctx = self.create_context(&call_id);
        let result = execute_tool(
            &self.registry,
            tool_call,
            ctx,
            self.config.default_timeout_secs,
            self.config.max_tool_output_chars,
            self.config.session_dir.as_deref(),
            &self.config.tool_config,
            &self.doom_loop,
        )
        .await;

        self.emit_completed(&call_id, &result).await;
        self.completed_results
            .lock()
            .await
            .push(ToolExecutionResult {
                call_id,
                name,
                result,
            });
    }

    /// Collect every result produced so far.
    pub async fn drain(&self) -> Vec<ToolExecutionResult> {
        let mut results = self.completed_results.lock().await;
        std::mem::take(&mut *results)
    }

    /// Abort every pending tool call. A call already in flight is stopped
    /// through the cancellation token it was created with.
    pub async fn abort_all(&self, reason: AbortReason) {
        self.cancel_token.cancel();
        self.pending.lock().await.clear();
        self.emit_event(LoopEvent::ToolExecutionAborted { reason })
            .await;
    }

    /// Number of calls currently queued but not yet started.
    pub async fn pending_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Create a tool context for execution.
    fn create_context(&self, call_id: &str) -> ToolContext {
        let mut builder = ToolContextBuilder::new(call_id, &self.config.session_id)
            .cwd(self.config.cwd.clone())
            .permission_mode(self.config.permission_mode)
            .cancel_token(self.cancel_token.clone())
            .approval_store(self.approval_store.clone())
            .file_tracker(self.file_tracker.clone())
            .features(self.config.features.clone());

        if let Some(ref requester) = self.permission_requester {
            builder = builder.permission_requester(requester.clone());
        }
        if let Some(ref evaluator) = self.permission_evaluator {
            builder = builder.permission_evaluator(evaluator.clone());
        }

        builder.build()
    }

    /// Emit a loop event.
    async fn emit_event(&self, event: LoopEvent) {
        if let Some(tx) = &self.event_tx {
            if let Err(e) = tx.send(event).await {
                debug!("Failed to send tool event: {e}");
            }
        }
    }

    /// Emit a completed event.
    async fn emit_completed(&self, call_id: &str, result: &Result<ToolOutput>) {
        let (output, is_error) = match result {
            Ok(output) => (output.content.clone(), output.is_error),
            Err(e) => (
                conduit_protocol::ToolResultContent::Text(e.to_string()),
                true,
            ),
        };

        self.emit_event(LoopEvent::ToolUseCompleted {
            call_id: call_id.to_string(),
            output,
            is_error,
        })
        .await;
    }
}

/// Execute a single tool with timeout and cancellation support.
#[allow(clippy::too_many_arguments)]
async fn execute_tool(
    registry: &ToolRegistry,
    tool_call: ToolCall,
    mut ctx: ToolContext,
    timeout_secs: i64,
    max_tool_output_chars: Option<i32>,
    session_dir: Option<&Path>,
    tool_config: &conduit_protocol::ToolConfig,
    doom_loop: &DoomLoopDetector,
) -> Result<ToolOutput> {
    let timeout_duration = std::time::Duration::from_secs(timeout_secs as u64);
    let cancel_token = ctx.cancel_token.clone();

    tokio::select! {
        biased;
        _ = cancel_token.cancelled() => {
            Err(crate::error::tool_error::CancelledSnafu.build())
        }
        result = tokio::time::timeout(
            timeout_duration,
            execute_tool_inner(registry, tool_call, &mut ctx, max_tool_output_chars, session_dir, tool_config, doom_loop),
        ) => {
            match result {
                Ok(inner) => inner,
                Err(_) => Err(crate::error::tool_error::TimeoutSnafu { timeout_secs }.build()),
            }
        }
    }
}

/// Check if a tool name is an edit/write tool (for AcceptEdits mode).
fn is_edit_tool(name: &str) -> bool {
    matches!(
        name,
        "Edit" | "SmartEdit" | "Write" | "NotebookEdit" | "ApplyPatch"
    )
}

/// Check if a tool name is read-only or a plan mode control tool.
fn is_read_only_or_plan_tool(name: &str) -> bool {
    matches!(
        name,
        "Read" | "Glob" | "Grep" | "TaskOutput" | "EnterPlanMode" | "ExitPlanMode" | "AskUserQuestion"
    )
}

/// Extract file_path from tool input if present.
fn extract_file_path(input: &Value) -> Option<std::path::PathBuf> {
    input
        .get("file_path")
        .and_then(|v| v.as_str())
        .map(std::path::PathBuf::from)
}

/// Extract a command prefix pattern for the "allow similar commands" option.
///
/// For Bash commands, extracts the first word as a prefix pattern.
/// E.g. `"git push origin main"` → `Some("git *")`.
fn extract_prefix_pattern(tool_name: &str, input: &Value) -> Option<String> {
    if tool_name != "Bash" {
        return None;
    }
    let command = input.get("command").and_then(|v| v.as_str())?;
    let first_word = command.split_whitespace().next()?;
    if first_word.is_empty() {
        return None;
    }
    Some(format!("{first_word} *"))
}

/// Build a default approval request for a tool that needs user approval.
fn default_approval_request(name: &str, input: &Value) -> conduit_protocol::ApprovalRequest {
    let description = if let Some(path) = extract_file_path(input) {
        format!("{name}: {}", path.display())
    } else if let Some(cmd) = input.get("command").and_then(|v| v.as_str()) {
        let truncated = if cmd.len() > 80 {
            format!("{}...", &cmd[..80])
        } else {
            cmd.to_string()
        };
        format!("{name}: {truncated}")
    } else {
        format!("Execute tool: {name}")
    };

    let proposed_prefix_pattern = extract_prefix_pattern(name, input);

    conduit_protocol::ApprovalRequest {
        request_id: format!(
            "default-{name}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ),
        tool_name: name.to_string(),
        description,
        risks: vec![],
        allow_remember: true,
        proposed_prefix_pattern,
    }
}

/// Extract command string from shell tool input.
fn extract_command_input(name: &str, input: &Value) -> Option<String> {
    match name {
        "Bash" => input
            .get("command")
            .and_then(|v| v.as_str())
            .map(String::from),
        _ => None,
    }
}

/// Full permission pipeline.
///
/// 1. Check DENY rules (all sources) → if match → Deny
/// 2. Check ASK rules (all sources) → if match → NeedsApproval
/// 3. Tool-specific check_permission() → returns allow/deny/ask/passthrough
/// 4. Check ALLOW rules (all sources) → if match → Allow
/// 5. Default behavior: reads → Allow, writes → NeedsApproval
async fn check_permission_pipeline(
    tool: &dyn crate::tool::Tool,
    name: &str,
    input: &Value,
    ctx: &ToolContext,
) -> conduit_protocol::PermissionResult {
    let file_path = extract_file_path(input);
    let command_input = extract_command_input(name, input);

    if let Some(ref evaluator) = ctx.permission_evaluator {
        if let Some(decision) = evaluator.evaluate_behavior(
            name,
            file_path.as_deref(),
            crate::permission_rules::RuleAction::Deny,
            command_input.as_deref(),
        ) {
            return decision.result;
        }

        if let Some(decision) = evaluator.evaluate_behavior(
            name,
            file_path.as_deref(),
            crate::permission_rules::RuleAction::Ask,
            command_input.as_deref(),
        ) {
            return conduit_protocol::PermissionResult::NeedsApproval {
                request: conduit_protocol::ApprovalRequest {
                    request_id: format!("rule-ask-{name}"),
                    tool_name: name.to_string(),
                    description: decision.reason,
                    risks: vec![],
                    allow_remember: true,
                    proposed_prefix_pattern: extract_prefix_pattern(name, input),
                },
            };
        }
    }

    let tool_result = tool.check_permission(input, ctx).await;
    if !tool_result.is_passthrough() {
        return tool_result;
    }

    if let Some(ref evaluator) = ctx.permission_evaluator {
        if let Some(decision) = evaluator.evaluate_behavior(
            name,
            file_path.as_deref(),
            crate::permission_rules::RuleAction::Allow,
            command_input.as_deref(),
        ) {
            if decision.result.is_allowed() {
                return conduit_protocol::PermissionResult::Allowed;
            }
        }
    }

    if tool.is_read_only() {
        conduit_protocol::PermissionResult::Allowed
    } else {
        conduit_protocol::PermissionResult::NeedsApproval {
            request: default_approval_request(name, input),
        }
    }
}

/// Apply permission mode on top of pipeline result.
///
/// - Bypass: everything → Allowed
/// - AcceptEdits: edit/write NeedsApproval → Allowed
/// - Plan: non-read-only → Denied
fn apply_permission_mode(
    result: conduit_protocol::PermissionResult,
    mode: PermissionMode,
    tool_name: &str,
) -> conduit_protocol::PermissionResult {
    match mode {
        PermissionMode::Bypass => conduit_protocol::PermissionResult::Allowed,
        PermissionMode::AcceptEdits if is_edit_tool(tool_name) => match result {
            conduit_protocol::PermissionResult::NeedsApproval { .. } => {
                conduit_protocol::PermissionResult::Allowed
            }
            other => other,
        },
        PermissionMode::Plan if !is_read_only_or_plan_tool(tool_name) => match result {
            conduit_protocol::PermissionResult::Allowed
            | conduit_protocol::PermissionResult::NeedsApproval { .. } => {
                conduit_protocol::PermissionResult::Denied {
                    reason: "Plan mode: only read-only tools allowed".to_string(),
                }
            }
            other => other,
        },
        _ => result,
    }
}

/// Inner tool execution logic (without timeout).
#[allow(clippy::too_many_arguments)]
async fn execute_tool_inner(
    registry: &ToolRegistry,
    tool_call: ToolCall,
    ctx: &mut ToolContext,
    max_tool_output_chars: Option<i32>,
    session_dir: Option<&Path>,
    tool_config: &conduit_protocol::ToolConfig,
    doom_loop: &DoomLoopDetector,
) -> Result<ToolOutput> {
    let call_id = &tool_call.id;
    let name = &tool_call.name;
    let input = tool_call.input;

    let tool = registry
        .get(name)
        .ok_or_else(|| crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build())?;

    // Defense-in-depth: reject calls to feature-gated tools that are disabled.
    // Normally the model never sees these (definitions_filtered excludes them),
    // but a hallucinated or injected tool name could still reach here.
    if let Some(feature) = tool.feature_gate() {
        if !ctx.features.enabled(feature) {
            return Err(crate::error::tool_error::NotFoundSnafu { name: name.clone() }.build());
        }
    }

    let validation = tool.validate(&input).await;
    if let ValidationResult::Invalid { errors } = validation {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        return Err(crate::error::tool_error::InvalidInputSnafu {
            message: error_msgs.join(", "),
        }
        .build());
    }

    let pipeline_result = check_permission_pipeline(tool.as_ref(), name, &input, ctx).await;
    let permission = apply_permission_mode(pipeline_result, ctx.permission_mode, name);

    match permission {
        conduit_protocol::PermissionResult::Allowed => {}
        conduit_protocol::PermissionResult::Denied { reason } => {
            return Err(
                crate::error::tool_error::PermissionDeniedSnafu { message: reason }.build(),
            );
        }
        conduit_protocol::PermissionResult::NeedsApproval { request } => {
            let pattern = &request.description;
            if ctx.is_approved(name, pattern).await {
                // Already approved for this pattern (exact or wildcard).
            } else if let Some(requester) = &ctx.permission_requester {
                let worker_id = ctx.call_id.clone();
                let decision = requester
                    .request_permission(request.clone(), &worker_id)
                    .await;
                match decision {
                    conduit_protocol::ApprovalDecision::Denied => {
                        return Err(crate::error::tool_error::PermissionDeniedSnafu {
                            message: format!("User denied permission for tool '{name}'"),
                        }
                        .build());
                    }
                    conduit_protocol::ApprovalDecision::Approved => {
                        ctx.approve_pattern(name, pattern).await;
                    }
                    conduit_protocol::ApprovalDecision::ApprovedWithPrefix { prefix_pattern } => {
                        ctx.persist_permission_rule(name, &prefix_pattern).await;
                    }
                }
            } else {
                return Err(crate::error::tool_error::PermissionDeniedSnafu {
                    message: format!("Tool '{name}' requires approval: {}", request.description),
                }
                .build());
            }
        }
        conduit_protocol::PermissionResult::Passthrough => {
            // Should not happen after pipeline — treat as allowed.
        }
    }

    if doom_loop.observe(name, &input) {
        let request = conduit_protocol::ApprovalRequest {
            request_id: format!("doom-loop-{name}"),
            tool_name: name.clone(),
            description: format!(
                "'{name}' has been called with identical input three times in a row"
            ),
            risks: vec![],
            allow_remember: true,
            proposed_prefix_pattern: Some(name.clone()),
        };

        if let Some(requester) = &ctx.permission_requester {
            let worker_id = ctx.call_id.clone();
            if let conduit_protocol::ApprovalDecision::Denied =
                requester.request_permission(request, &worker_id).await
            {
                return Err(crate::error::tool_error::PermissionDeniedSnafu {
                    message: format!("Doom-loop guard denied repeated calls to '{name}'"),
                }
                .build());
            }
        }
    }

    let result = tool.execute(input, ctx).await;

    let mut output = match result {
        Ok(output) => tool.post_process(output, ctx).await,
        Err(e) => return Err(e),
    };

    // Persist oversized results BEFORE truncation.
    let per_tool_limit = tool.max_result_size_chars() as usize;
    if let Some(dir) = session_dir {
        output = result_persistence::persist_if_needed(
            output,
            call_id,
            dir,
            per_tool_limit,
            tool_config,
        )
        .await;
    }

    let max_chars = match max_tool_output_chars {
        Some(model_limit) => per_tool_limit.min(model_limit as usize),
        None => per_tool_limit,
    };
    output.truncate_to(max_chars);

    tool.cleanup(ctx).await;

    Ok(output)
}

impl std::fmt::Debug for StreamingToolExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingToolExecutor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "executor.test.rs"]
mod tests;
