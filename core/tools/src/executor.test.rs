use super::*;
use crate::tool::Tool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};

struct EchoTool;

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        "echo_tool"
    }
    fn description(&self) -> &str {
        "Echoes back"
    }
    fn input_schema(&self) -> Value {
        serde_json::json!({"type": "object"})
    }
    async fn execute(&self, _input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        Ok(ToolOutput::text("echo result"))
    }
}

#[tokio::test]
async fn on_tool_complete_only_queues_until_drained() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let executor = StreamingToolExecutor::new(Arc::new(registry), ExecutorConfig::default(), None);

    let tool_call = ToolCall::new("call-1", "echo_tool", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;

    assert_eq!(executor.pending_count().await, 1);

    executor.execute_pending_unsafe().await;
    assert_eq!(executor.pending_count().await, 0);

    let results = executor.drain().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].result.is_ok());
}

#[tokio::test]
async fn queued_calls_run_one_at_a_time_in_order() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let executor = StreamingToolExecutor::new(Arc::new(registry), ExecutorConfig::default(), None);

    for i in 0..3 {
        let call = ToolCall::new(format!("call-{i}"), "echo_tool", serde_json::json!({}));
        executor.on_tool_complete(call).await;
    }
    assert_eq!(executor.pending_count().await, 3);

    executor.execute_pending_unsafe().await;
    let results = executor.drain().await;

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].call_id, "call-0");
    assert_eq!(results[1].call_id, "call-1");
    assert_eq!(results[2].call_id, "call-2");
}

/// A tool gated on a feature flag.
struct FeatureGatedTool;

#[async_trait]
impl Tool for FeatureGatedTool {
    fn name(&self) -> &str {
        "gated_tool"
    }
    fn description(&self) -> &str {
        "A feature-gated tool"
    }
    fn input_schema(&self) -> Value {
        serde_json::json!({"type": "object"})
    }
    fn feature_gate(&self) -> Option<conduit_protocol::Feature> {
        Some(conduit_protocol::Feature::Ls)
    }
    async fn execute(&self, _input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        Ok(ToolOutput::text("gated result"))
    }
}

#[tokio::test]
async fn test_feature_gated_tool_rejected_when_disabled() {
    let mut registry = ToolRegistry::new();
    registry.register(FeatureGatedTool);

    let mut features = conduit_protocol::Features::with_defaults();
    features.disable(conduit_protocol::Feature::Ls);

    let config = ExecutorConfig {
        features,
        ..ExecutorConfig::default()
    };
    let executor = StreamingToolExecutor::new(Arc::new(registry), config, None);

    let tool_call = ToolCall::new("call-1", "gated_tool", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;
    executor.execute_pending_unsafe().await;

    let results = executor.drain().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].result.is_err());
    let err = results[0].result.as_ref().unwrap_err().to_string();
    assert!(
        err.contains("not found") || err.contains("NotFound"),
        "Expected NotFound error, got: {err}"
    );
}

#[tokio::test]
async fn test_executor_not_found() {
    let registry = ToolRegistry::new();
    let executor = StreamingToolExecutor::new(Arc::new(registry), ExecutorConfig::default(), None);

    let tool_call = ToolCall::new("call-1", "nonexistent", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;

    assert_eq!(executor.pending_count().await, 1);

    executor.execute_pending_unsafe().await;

    let results = executor.drain().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].result.is_err());
}

#[tokio::test]
async fn test_allowed_tool_names_rejects_unlisted_tool() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let executor = StreamingToolExecutor::new(Arc::new(registry), ExecutorConfig::default(), None);

    executor.set_allowed_tool_names(vec!["echo_tool".to_string()].into_iter().collect());

    let tool_call = ToolCall::new("call-1", "echo_tool", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;

    let tool_call = ToolCall::new("call-2", "unlisted_tool", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;

    executor.execute_pending_unsafe().await;
    let results = executor.drain().await;

    assert_eq!(results.len(), 2);

    let allowed_result = results.iter().find(|r| r.call_id == "call-1").unwrap();
    assert!(allowed_result.result.is_ok(), "echo_tool should succeed");

    let unlisted_result = results.iter().find(|r| r.call_id == "call-2").unwrap();
    assert!(
        unlisted_result.result.is_err(),
        "unlisted tool should be rejected"
    );
    let err = unlisted_result.result.as_ref().unwrap_err().to_string();
    assert!(
        err.contains("not found") || err.contains("NotFound"),
        "Expected NotFound error, got: {err}"
    );
}

#[tokio::test]
async fn test_no_allowlist_allows_all_tools() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let executor = StreamingToolExecutor::new(Arc::new(registry), ExecutorConfig::default(), None);

    let tool_call = ToolCall::new("call-1", "echo_tool", serde_json::json!({}));
    executor.on_tool_complete(tool_call).await;
    executor.execute_pending_unsafe().await;

    let results = executor.drain().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].result.is_ok());
}

/// Records every permission request it's asked to decide, always approving.
struct RecordingRequester {
    asked: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PermissionRequester for RecordingRequester {
    async fn request_permission(
        &self,
        request: conduit_protocol::ApprovalRequest,
        _worker_id: &str,
    ) -> conduit_protocol::ApprovalDecision {
        self.asked.lock().await.push(request.tool_name);
        conduit_protocol::ApprovalDecision::Approved
    }
}

#[tokio::test]
async fn three_identical_calls_trigger_exactly_one_doom_loop_ask() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let asked = Arc::new(Mutex::new(Vec::new()));
    let executor = StreamingToolExecutor::new(
        Arc::new(registry),
        ExecutorConfig {
            permission_mode: PermissionMode::Bypass,
            ..ExecutorConfig::default()
        },
        None,
    )
    .with_permission_requester(Arc::new(RecordingRequester {
        asked: asked.clone(),
    }));

    for i in 0..4 {
        let call = ToolCall::new(
            format!("call-{i}"),
            "echo_tool",
            serde_json::json!({"x": 1}),
        );
        executor.on_tool_complete(call).await;
    }
    executor.execute_pending_unsafe().await;

    let results = executor.drain().await;
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.result.is_ok()));

    let asked = asked.lock().await;
    assert_eq!(
        asked.iter().filter(|name| *name == "echo_tool").count(),
        1,
        "doom-loop permission ask should fire exactly once"
    );
}

#[tokio::test]
async fn distinct_inputs_never_trigger_doom_loop() {
    let mut registry = ToolRegistry::new();
    registry.register(EchoTool);

    let asked = Arc::new(Mutex::new(Vec::new()));
    let call_count = Arc::new(AtomicUsize::new(0));
    let executor = StreamingToolExecutor::new(
        Arc::new(registry),
        ExecutorConfig {
            permission_mode: PermissionMode::Bypass,
            ..ExecutorConfig::default()
        },
        None,
    )
    .with_permission_requester(Arc::new(RecordingRequester {
        asked: asked.clone(),
    }));

    for i in 0..5 {
        let n = call_count.fetch_add(1, Ordering::SeqCst);
        let call = ToolCall::new(format!("call-{i}"), "echo_tool", serde_json::json!({"x": n}));
        executor.on_tool_complete(call).await;
    }
    executor.execute_pending_unsafe().await;
    executor.drain().await;

    assert!(asked.lock().await.is_empty());
}

#[test]
fn test_extract_prefix_pattern_bash_command() {
    let input = serde_json::json!({"command": "git push origin main"});
    assert_eq!(
        extract_prefix_pattern("Bash", &input),
        Some("git *".to_string())
    );
}

#[test]
fn test_extract_prefix_pattern_bash_single_word() {
    let input = serde_json::json!({"command": "ls"});
    assert_eq!(
        extract_prefix_pattern("Bash", &input),
        Some("ls *".to_string())
    );
}

#[test]
fn test_extract_prefix_pattern_non_bash_tool() {
    let input = serde_json::json!({"command": "git push"});
    assert_eq!(extract_prefix_pattern("Read", &input), None);
    assert_eq!(extract_prefix_pattern("Edit", &input), None);
    assert_eq!(extract_prefix_pattern("Write", &input), None);
}

#[test]
fn test_extract_prefix_pattern_missing_command() {
    let input = serde_json::json!({"file_path": "/tmp/test"});
    assert_eq!(extract_prefix_pattern("Bash", &input), None);
}

#[test]
fn test_extract_prefix_pattern_empty_command() {
    let input = serde_json::json!({"command": ""});
    assert_eq!(extract_prefix_pattern("Bash", &input), None);
}

#[test]
fn test_extract_prefix_pattern_whitespace_only() {
    let input = serde_json::json!({"command": "   "});
    assert_eq!(extract_prefix_pattern("Bash", &input), None);
}

#[test]
fn test_extract_prefix_pattern_complex_command() {
    let input = serde_json::json!({"command": "cargo test --no-fail-fast -- -q"});
    assert_eq!(
        extract_prefix_pattern("Bash", &input),
        Some("cargo *".to_string())
    );
}
