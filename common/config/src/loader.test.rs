use super::*;
use crate::Config;
use serial_test::serial;
use tempfile::tempdir;

#[test]
fn missing_config_file_yields_defaults() {
    let project = tempdir().unwrap();
    let home = tempdir().unwrap();
    let loader = ConfigLoader::new(project.path()).with_conduit_home(home.path());
    let config = loader.load_config_file().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn loads_config_file_contents() {
    let project = tempdir().unwrap();
    let home = tempdir().unwrap();
    std::fs::write(
        home.path().join(CONFIG_FILE),
        r#"{"model": "claude-sonnet"}"#,
    )
    .unwrap();
    let loader = ConfigLoader::new(project.path()).with_conduit_home(home.path());
    let config = loader.load_config_file().unwrap();
    assert_eq!(config.model, Some("claude-sonnet".to_string()));
}

#[test]
fn invalid_json_reports_the_file_path() {
    let project = tempdir().unwrap();
    let home = tempdir().unwrap();
    std::fs::write(home.path().join(CONFIG_FILE), "not json").unwrap();
    let loader = ConfigLoader::new(project.path()).with_conduit_home(home.path());
    let err = loader.load_config_file().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidJson { .. }));
}

#[test]
fn load_merges_instructions_and_sets_cwd() {
    let project = tempdir().unwrap();
    let home = tempdir().unwrap();
    std::fs::write(project.path().join(AGENTS_MD_FILE), "be careful").unwrap();
    let loader = ConfigLoader::new(project.path()).with_conduit_home(home.path());
    let config = loader.load().unwrap();
    assert_eq!(config.cwd, project.path());
    assert_eq!(config.conduit_home, home.path());
    assert_eq!(config.instructions, vec!["be careful".to_string()]);
}

#[test]
fn save_then_load_roundtrips() {
    let project = tempdir().unwrap();
    let home = tempdir().unwrap();
    let loader = ConfigLoader::new(project.path()).with_conduit_home(home.path());
    let mut config = Config::default();
    config.model = Some("claude-opus".to_string());
    loader.save(&config).unwrap();
    let loaded = loader.load_config_file().unwrap();
    assert_eq!(loaded.model, Some("claude-opus".to_string()));
}

#[test]
#[serial]
fn default_config_dir_honors_conduit_home_env() {
    unsafe { std::env::set_var(CONDUIT_HOME_ENV, "/tmp/conduit-home-test") };
    assert_eq!(default_config_dir(), PathBuf::from("/tmp/conduit-home-test"));
    unsafe { std::env::remove_var(CONDUIT_HOME_ENV) };
}

#[test]
fn load_instructions_returns_none_when_missing() {
    let project = tempdir().unwrap();
    assert!(load_instructions(project.path()).is_none());
}
