use super::*;

#[test]
fn identity_and_permission_templates_are_non_empty() {
    assert!(!BASE_IDENTITY.is_empty());
    assert!(!TOOL_POLICY.is_empty());
    assert!(!SECURITY.is_empty());
    assert!(!GIT_WORKFLOW.is_empty());
    assert!(!TASK_MANAGEMENT.is_empty());
    assert!(!MCP_INSTRUCTIONS.is_empty());
}

#[test]
fn permission_templates_mention_their_mode() {
    assert!(PERMISSION_DEFAULT.contains("Permission Mode"));
    assert!(PERMISSION_PLAN.contains("Permission Mode"));
    assert!(PERMISSION_ACCEPT_EDITS.contains("Permission Mode"));
    assert!(PERMISSION_ACCEPT_EDITS.contains("Accept Edits"));
    assert!(PERMISSION_BYPASS.contains("Permission Mode"));
}

#[test]
fn subagent_templates_are_distinct() {
    assert!(EXPLORE_SUBAGENT.contains("Explore Subagent"));
    assert!(PLAN_SUBAGENT.contains("Plan Subagent"));
    assert!(!EXPLORE_SUBAGENT.contains("Plan Subagent"));
    assert!(!PLAN_SUBAGENT.contains("Explore Subagent"));
}

#[test]
fn summarization_template_mentions_summarization() {
    assert!(SUMMARIZATION.contains("Conversation Summarization"));
}
