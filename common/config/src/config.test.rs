use super::*;

#[test]
fn default_config_has_ask_permission_behavior() {
    let config = Config::default();
    assert_eq!(config.default_permission_behavior(), PermissionBehavior::Ask);
}

#[test]
fn unlisted_tool_defaults_to_enabled() {
    let config = Config::default();
    assert!(config.is_tool_enabled("Read"));
}

#[test]
fn explicitly_disabled_tool_is_disabled() {
    let mut config = Config::default();
    config.tools.insert("Bash".to_string(), false);
    assert!(!config.is_tool_enabled("Bash"));
}

#[test]
fn disabled_providers_are_reported() {
    let mut config = Config::default();
    config.disabled_providers.push("openai".to_string());
    assert!(config.is_provider_disabled("openai"));
    assert!(!config.is_provider_disabled("anthropic"));
}

#[test]
fn permission_rules_lookup_by_pattern() {
    let mut rules = HashMap::new();
    rules.insert("Bash(git push:*)".to_string(), PermissionBehavior::Ask);
    let config = Config {
        permission: Permission::Rules(rules),
        ..Config::default()
    };
    assert_eq!(
        config.permission_rule("Bash(git push:*)"),
        Some(PermissionBehavior::Ask)
    );
    assert_eq!(config.permission_rule("Bash(ls:*)"), None);
    assert_eq!(config.default_permission_behavior(), PermissionBehavior::Ask);
}

#[test]
fn read_only_sandbox_disallows_writes() {
    let mut config = Config::default();
    config.sandbox_mode = SandboxMode::ReadOnly;
    assert!(!config.allows_write());
    assert!(!config.is_path_writable(&config.cwd.clone()));
}

#[test]
fn full_access_sandbox_allows_any_path() {
    let mut config = Config::default();
    config.sandbox_mode = SandboxMode::FullAccess;
    assert!(config.is_path_writable(std::path::Path::new("/etc/hosts")));
}

#[test]
fn workspace_write_restricts_to_cwd() {
    let mut config = Config::default();
    config.cwd = PathBuf::from("/workspace/project");
    config.sandbox_mode = SandboxMode::WorkspaceWrite;
    assert!(config.is_path_writable(std::path::Path::new("/workspace/project/src/main.rs")));
    assert!(!config.is_path_writable(std::path::Path::new("/etc/hosts")));
}

#[test]
fn overrides_apply_on_top_of_defaults() {
    let config = Config::default();
    let overrides = ConfigOverrides::new()
        .with_cwd("/tmp/project")
        .with_sandbox_mode(SandboxMode::FullAccess)
        .with_model("claude-sonnet");
    let config = overrides.apply(config);
    assert_eq!(config.cwd, PathBuf::from("/tmp/project"));
    assert_eq!(config.sandbox_mode, SandboxMode::FullAccess);
    assert_eq!(config.model, Some("claude-sonnet".to_string()));
}

#[test]
fn config_roundtrips_through_json() {
    let mut config = Config::default();
    config.model = Some("claude-sonnet".to_string());
    config.provider.insert(
        "anthropic".to_string(),
        ProviderEntry {
            base_url: "https://api.anthropic.com".to_string(),
            api_key_env: Some("ANTHROPIC_API_KEY".to_string()),
            models: vec!["claude-sonnet".to_string()],
        },
    );
    let json = serde_json::to_string(&config).unwrap();
    let restored: Config = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.model, config.model);
    assert_eq!(restored.provider.get("anthropic").unwrap().base_url, "https://api.anthropic.com");
}

#[test]
fn permission_default_deserializes_from_bare_string() {
    let permission: Permission = serde_json::from_str("\"deny\"").unwrap();
    assert_eq!(permission, Permission::Default(PermissionBehavior::Deny));
}

#[test]
fn permission_rules_deserialize_from_object() {
    let permission: Permission =
        serde_json::from_str(r#"{"Bash(rm:*)": "deny"}"#).unwrap();
    match permission {
        Permission::Rules(rules) => {
            assert_eq!(rules.get("Bash(rm:*)"), Some(&PermissionBehavior::Deny));
        }
        Permission::Default(_) => panic!("expected rules map"),
    }
}
