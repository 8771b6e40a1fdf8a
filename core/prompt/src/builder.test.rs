use conduit_context::ConversationContext;
use conduit_context::EnvironmentInfo;
use conduit_context::MemoryFile;
use conduit_context::SubagentType;

use super::*;

fn test_context() -> ConversationContext {
    let env = EnvironmentInfo::builder()
        .platform("linux")
        .os_version("6.1.0")
        .cwd("/work")
        .model("test-model")
        .date("2026-01-01")
        .build()
        .unwrap();

    ConversationContext::builder().environment(env).build().unwrap()
}

#[test]
fn build_includes_identity_and_security() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(prompt.contains("# Identity"));
    assert!(prompt.contains("# Security Guidelines"));
}

#[test]
fn build_includes_permission_section() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(prompt.contains("# Permission Mode"));
}

#[test]
fn build_omits_tool_policy_without_tools() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(!prompt.contains("# Tool Usage Policy"));
}

#[test]
fn build_includes_tool_policy_with_tools() {
    let mut ctx = test_context();
    ctx.tool_names = vec!["Read".to_string()];
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(prompt.contains("# Tool Usage Policy"));
    assert!(prompt.contains("Use Read for reading files"));
}

#[test]
fn build_omits_mcp_instructions_without_servers() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(ctx.mcp_server_names.is_empty());
    assert!(!prompt.contains("MCP"));
}

#[test]
fn build_includes_memory_files_when_present() {
    let mut ctx = test_context();
    ctx.memory_files = vec![MemoryFile {
        path: "CLAUDE.md".to_string(),
        content: "project notes".to_string(),
        priority: 0,
    }];
    let prompt = SystemPromptBuilder::build(&ctx);
    assert!(prompt.contains("project notes"));
}

#[test]
fn build_for_subagent_explore_uses_explore_template() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build_for_subagent(&ctx, SubagentType::Explore);
    assert!(prompt.contains("Explore Subagent"));
    assert!(!prompt.contains("Plan Subagent"));
}

#[test]
fn build_for_subagent_plan_uses_plan_template() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build_for_subagent(&ctx, SubagentType::Plan);
    assert!(prompt.contains("Plan Subagent"));
    assert!(!prompt.contains("Explore Subagent"));
}

#[test]
fn build_for_subagent_omits_tool_policy_and_git_workflow() {
    let ctx = test_context();
    let prompt = SystemPromptBuilder::build_for_subagent(&ctx, SubagentType::Explore);
    assert!(!prompt.contains("# Tool Usage Policy"));
    assert!(!prompt.contains("# Git Workflow"));
}

#[test]
fn build_summarization_delegates_to_summarization_module() {
    let (system, user) = SystemPromptBuilder::build_summarization("conversation", None);
    assert!(system.contains("Conversation Summarization"));
    assert!(user.contains("conversation"));
}

#[test]
fn build_brief_summarization_delegates_to_summarization_module() {
    let (system, user) = SystemPromptBuilder::build_brief_summarization("conversation");
    assert!(system.contains("brief"));
    assert!(user.contains("conversation"));
}
