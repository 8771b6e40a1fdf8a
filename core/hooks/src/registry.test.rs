use std::path::PathBuf;

use super::*;

#[test]
fn test_register_and_count() {
    let registry = HookRegistry::new();
    assert!(registry.is_empty());

    registry.register(HookDefinition {
        name: "lint".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 30,
    });

    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_hooks_for_event_filters_by_type_and_enabled() {
    let registry = HookRegistry::new();
    registry.register(HookDefinition {
        name: "pre-compact-hook".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 30,
    });
    registry.register(HookDefinition {
        name: "disabled-hook".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: false,
        timeout_secs: 30,
    });
    registry.register(HookDefinition {
        name: "other-event-hook".to_string(),
        event_type: HookEventType::SessionStart,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 30,
    });

    let matching = registry.hooks_for_event(&HookEventType::PreCompact);
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].name, "pre-compact-hook");
}

#[tokio::test]
async fn test_execute_with_no_matching_hooks_returns_empty() {
    let registry = HookRegistry::new();
    let ctx = HookContext::new(HookEventType::PreCompact, "sess", PathBuf::from("/tmp"));
    let outcomes = registry.execute(&ctx).await;
    assert!(outcomes.is_empty());
}

#[tokio::test]
async fn test_execute_runs_matching_command_hooks() {
    let registry = HookRegistry::new();
    registry.register(HookDefinition {
        name: "echo-continue".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command {
            command: "echo".to_string(),
            args: vec![r#"{"action":"continue"}"#.to_string()],
        },
        enabled: true,
        timeout_secs: 5,
    });

    let ctx = HookContext::new(HookEventType::PreCompact, "sess", PathBuf::from("/tmp"));
    let outcomes = registry.execute(&ctx).await;

    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].hook_name, "echo-continue");
    assert!(matches!(outcomes[0].result, HookResult::Continue));
}

#[test]
fn test_clear_removes_all_hooks() {
    let registry = HookRegistry::new();
    registry.register(HookDefinition {
        name: "a".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 30,
    });
    registry.clear();
    assert!(registry.is_empty());
}
