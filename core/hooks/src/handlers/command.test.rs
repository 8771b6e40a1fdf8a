use super::*;
use std::path::PathBuf;

fn make_ctx() -> HookContext {
    HookContext::new(HookEventType::PreToolUse, "test-session", PathBuf::from("/tmp"))
}

#[tokio::test]
async fn test_execute_echo_command() {
    let ctx = make_ctx();
    let result = CommandHandler::execute("echo", &[r#"{"action":"continue"}"#.to_string()], &ctx).await;
    assert!(matches!(result, HookResult::Continue));
}

#[tokio::test]
async fn test_execute_reject_from_stdout() {
    let ctx = make_ctx();
    let result =
        CommandHandler::execute("echo", &[r#"{"action":"reject","reason":"blocked"}"#.to_string()], &ctx).await;
    match result {
        HookResult::Reject { reason } => assert_eq!(reason, "blocked"),
        other => panic!("expected Reject, got {other:?}"),
    }
}

#[tokio::test]
async fn test_execute_nonexistent_command() {
    let ctx = make_ctx();
    let result = CommandHandler::execute("this-command-definitely-does-not-exist-12345", &[], &ctx).await;
    assert!(matches!(result, HookResult::Continue));
}

#[tokio::test]
async fn test_execute_failing_command() {
    let ctx = make_ctx();
    let result = CommandHandler::execute("false", &[], &ctx).await;
    assert!(matches!(result, HookResult::Continue));
}
