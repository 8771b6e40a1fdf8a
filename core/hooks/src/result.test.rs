use super::*;

#[test]
fn test_continue_serde() {
    let result = HookResult::Continue;
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(json, r#"{"action":"continue"}"#);
}

#[test]
fn test_reject_serde_roundtrip() {
    let result = HookResult::Reject { reason: "not allowed".to_string() };
    let json = serde_json::to_string(&result).unwrap();
    let parsed: HookResult = serde_json::from_str(&json).unwrap();
    match parsed {
        HookResult::Reject { reason } => assert_eq!(reason, "not allowed"),
        other => panic!("expected Reject, got {other:?}"),
    }
}

#[test]
fn test_modify_input_serde() {
    let result = HookResult::ModifyInput { new_input: serde_json::json!({"path": "/a"}) };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("modify_input"));
}

#[test]
fn test_outcome_carries_duration() {
    let outcome = HookOutcome { hook_name: "lint".to_string(), result: HookResult::Continue, duration_ms: 42 };
    assert_eq!(outcome.duration_ms, 42);
}
