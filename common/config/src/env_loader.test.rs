use super::*;

#[test]
fn default_compact_config_has_no_overrides() {
    let loader = EnvLoader::new();
    // SAFETY: tests run single-threaded within this module; no var is set.
    let config = loader.load_compact_config();
    assert!(!config.disable_compact);
    assert!(config.autocompact_pct_override.is_none());
}

#[test]
fn bool_parsing_accepts_common_spellings() {
    let loader = EnvLoader::new();
    // SAFETY: test-local env var, not read concurrently elsewhere in this crate.
    unsafe { std::env::set_var(ENV_DISABLE_COMPACT, "yes") };
    assert!(loader.get_bool(ENV_DISABLE_COMPACT));
    unsafe { std::env::remove_var(ENV_DISABLE_COMPACT) };
}

#[test]
fn unset_i32_returns_none() {
    let loader = EnvLoader::new();
    assert_eq!(loader.get_i32("CONDUIT_DOES_NOT_EXIST"), None);
}

#[test]
fn path_config_reads_project_dir() {
    let loader = EnvLoader::new();
    // SAFETY: test-local env var.
    unsafe { std::env::set_var(ENV_PROJECT_DIR, "/tmp/project") };
    let config = loader.load_path_config();
    assert_eq!(
        config.project_dir,
        Some(std::path::PathBuf::from("/tmp/project"))
    );
    unsafe { std::env::remove_var(ENV_PROJECT_DIR) };
}
