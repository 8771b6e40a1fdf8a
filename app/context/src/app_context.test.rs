use super::*;

struct FailingMcp;

#[async_trait::async_trait]
impl McpClient for FailingMcp {
    async fn start(&self) -> Result<(), String> {
        Err("connection refused".to_string())
    }

    async fn shutdown(&self) {}
}

struct WorkingLsp;

#[async_trait::async_trait]
impl LspClient for WorkingLsp {
    async fn start(&self) -> Result<(), String> {
        Ok(())
    }

    async fn shutdown(&self) {}
}

#[tokio::test]
async fn startup_is_idempotent() {
    let ctx = AppContext::new();
    ctx.startup().await;
    ctx.startup().await;
    assert!(ctx.started.load(Ordering::SeqCst));
}

#[tokio::test]
async fn failing_mcp_start_is_recorded_degraded_not_propagated() {
    let mut ctx = AppContext::new();
    ctx.mcp = Some(Arc::new(FailingMcp));
    ctx.startup().await;

    assert!(!ctx.is_healthy("mcp").await);
    let snapshot = ctx.health_snapshot().await;
    let mcp_health = snapshot.get("mcp").unwrap();
    assert!(mcp_health.critical);
    assert_eq!(mcp_health.error.as_deref(), Some("connection refused"));
}

#[tokio::test]
async fn healthy_lsp_start_is_recorded_healthy() {
    let mut ctx = AppContext::new();
    ctx.lsp = Some(Arc::new(WorkingLsp));
    ctx.startup().await;
    assert!(ctx.is_healthy("lsp").await);
}

#[tokio::test]
async fn subsystem_absent_from_health_table_is_treated_as_healthy() {
    let ctx = AppContext::new();
    ctx.startup().await;
    assert!(ctx.is_healthy("mcp").await);
}

#[tokio::test]
async fn shutdown_cancels_the_shared_cancellation_token() {
    let ctx = AppContext::new();
    let token = ctx.cancellation_token();
    assert!(!token.is_cancelled());
    ctx.shutdown().await;
    assert!(token.is_cancelled());
}
