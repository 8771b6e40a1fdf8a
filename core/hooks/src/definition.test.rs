use super::*;

#[test]
fn test_default_timeout_used_when_unset() {
    let hook = HookDefinition {
        name: "lint".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 0,
    };
    assert_eq!(hook.effective_timeout_secs(), 30);
}

#[test]
fn test_effective_timeout_passthrough() {
    let hook = HookDefinition {
        name: "lint".to_string(),
        event_type: HookEventType::PreCompact,
        handler: HookHandler::Command { command: "true".to_string(), args: vec![] },
        enabled: true,
        timeout_secs: 5,
    };
    assert_eq!(hook.effective_timeout_secs(), 5);
}

#[test]
fn test_handler_serde_roundtrip() {
    let handler = HookHandler::Command { command: "./check.sh".to_string(), args: vec!["--fast".to_string()] };
    let json = serde_json::to_string(&handler).unwrap();
    let parsed: HookHandler = serde_json::from_str(&json).unwrap();
    match parsed {
        HookHandler::Command { command, args } => {
            assert_eq!(command, "./check.sh");
            assert_eq!(args, vec!["--fast".to_string()]);
        }
        HookHandler::Inline => panic!("expected Command"),
    }
}
