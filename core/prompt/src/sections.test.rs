use conduit_context::ContextInjection;
use conduit_context::ConversationContext;
use conduit_context::EnvironmentInfo;
use conduit_context::MemoryFile;
use conduit_protocol::PermissionMode;

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
fn assemble_sections_skips_empty() {
    let sections = vec![
        (PromptSection::Identity, "hello".to_string()),
        (PromptSection::Security, String::new()),
        (PromptSection::GitWorkflow, "  ".to_string()),
        (PromptSection::TaskManagement, "world".to_string()),
    ];

    let result = assemble_sections(&sections);
    assert_eq!(result, "hello\n\nworld");
}

#[test]
fn assemble_sections_empty_input() {
    assert_eq!(assemble_sections(&[]), "");
}

#[test]
fn render_environment_includes_platform_and_os_version() {
    let ctx = test_context();
    let rendered = render_environment(&ctx);
    assert!(rendered.contains("linux"));
    assert!(rendered.contains("OS Version: 6.1.0"));
    assert!(rendered.contains("/work"));
}

#[test]
fn render_environment_language_preference_section() {
    let mut env = EnvironmentInfo::builder()
        .platform("linux")
        .os_version("6.1.0")
        .cwd("/work")
        .model("test-model")
        .language_preference("Japanese")
        .build()
        .unwrap();
    env.date = "2026-01-01".to_string();
    let ctx = ConversationContext::builder().environment(env).build().unwrap();

    let rendered = render_environment(&ctx);
    assert!(rendered.contains("# Language Preference"));
    assert!(rendered.contains("MUST respond in Japanese"));
}

#[test]
fn render_environment_omits_language_section_when_absent() {
    let ctx = test_context();
    let rendered = render_environment(&ctx);
    assert!(!rendered.contains("# Language Preference"));
}

#[test]
fn permission_section_matches_mode() {
    assert_eq!(permission_section(&PermissionMode::Default), templates::PERMISSION_DEFAULT);
    assert_eq!(permission_section(&PermissionMode::Plan), templates::PERMISSION_PLAN);
    assert_eq!(permission_section(&PermissionMode::AcceptEdits), templates::PERMISSION_ACCEPT_EDITS);
    assert_eq!(permission_section(&PermissionMode::Bypass), templates::PERMISSION_BYPASS);
}

#[test]
fn render_memory_files_empty_returns_empty_string() {
    let ctx = test_context();
    assert_eq!(render_memory_files(&ctx), "");
}

#[test]
fn render_memory_files_sorted_by_priority() {
    let mut ctx = test_context();
    ctx.memory_files = vec![
        MemoryFile { path: "b.md".to_string(), content: "second".to_string(), priority: 2 },
        MemoryFile { path: "a.md".to_string(), content: "first".to_string(), priority: 1 },
    ];

    let rendered = render_memory_files(&ctx);
    let a_pos = rendered.find("a.md").unwrap();
    let b_pos = rendered.find("b.md").unwrap();
    assert!(a_pos < b_pos);
}

#[test]
fn generate_tool_policy_lines_filters_to_registered_tools() {
    let names = vec!["Read".to_string(), "Edit".to_string()];
    let lines = generate_tool_policy_lines(&names);
    assert!(lines.contains("Read"));
    assert!(lines.contains("Edit"));
    assert!(!lines.contains("Grep"));
}

#[test]
fn generate_tool_policy_lines_empty_when_no_known_tools() {
    let names = vec!["CustomTool".to_string()];
    assert_eq!(generate_tool_policy_lines(&names), "");
}

#[test]
fn render_injections_filters_by_position() {
    let mut ctx = test_context();
    ctx.injections = vec![
        ContextInjection {
            label: "before".to_string(),
            content: "before content".to_string(),
            position: InjectionPosition::BeforeTools,
        },
        ContextInjection {
            label: "end".to_string(),
            content: "end content".to_string(),
            position: InjectionPosition::EndOfPrompt,
        },
    ];

    let before = render_injections(&ctx, InjectionPosition::BeforeTools);
    assert!(before.contains("before content"));
    assert!(!before.contains("end content"));

    let end = render_injections(&ctx, InjectionPosition::EndOfPrompt);
    assert!(end.contains("end content"));
}

#[test]
fn render_injections_empty_when_no_match() {
    let ctx = test_context();
    assert_eq!(render_injections(&ctx, InjectionPosition::AfterTools), "");
}
