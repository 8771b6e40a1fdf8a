use super::*;
use serde_json::json;

#[test]
fn fires_on_exactly_three_identical_calls() {
    let detector = DoomLoopDetector::new();
    let input = json!({"command": "ls"});

    assert!(!detector.observe("Bash", &input));
    assert!(!detector.observe("Bash", &input));
    assert!(detector.observe("Bash", &input));
}

#[test]
fn does_not_refire_on_a_fourth_identical_call() {
    let detector = DoomLoopDetector::new();
    let input = json!({"command": "ls"});

    detector.observe("Bash", &input);
    detector.observe("Bash", &input);
    assert!(detector.observe("Bash", &input));
    assert!(!detector.observe("Bash", &input));
}

#[test]
fn refires_after_the_streak_breaks_and_repeats() {
    let detector = DoomLoopDetector::new();
    let a = json!({"command": "ls"});
    let b = json!({"command": "pwd"});

    detector.observe("Bash", &a);
    detector.observe("Bash", &a);
    assert!(detector.observe("Bash", &a));

    assert!(!detector.observe("Bash", &b));
    detector.observe("Bash", &a);
    detector.observe("Bash", &a);
    assert!(detector.observe("Bash", &a));
}

#[test]
fn different_tool_names_do_not_share_a_signature() {
    let detector = DoomLoopDetector::new();
    let input = json!({"command": "ls"});

    assert!(!detector.observe("Bash", &input));
    assert!(!detector.observe("Grep", &input));
    assert!(!detector.observe("Bash", &input));
}

#[test]
fn field_order_does_not_defeat_signature_matching() {
    let detector = DoomLoopDetector::new();
    let a = json!({"path": "/tmp", "recursive": true});
    let b = json!({"recursive": true, "path": "/tmp"});

    detector.observe("Glob", &a);
    detector.observe("Glob", &b);
    assert!(detector.observe("Glob", &a));
}
