//! Loads [`Config`] by layering compiled-in defaults, an optional config
//! file, project `AGENTS.md` instructions, and environment variable
//! overrides (in increasing precedence).

use crate::Config;
use crate::ConfigError;
use crate::env_loader::EnvLoader;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::warn;

pub const DEFAULT_CONFIG_DIR: &str = ".conduit";
pub const CONFIG_FILE: &str = "config.json";
pub const AGENTS_MD_FILE: &str = "AGENTS.md";
pub const LOG_DIR_NAME: &str = "logs";

pub const CONDUIT_HOME_ENV: &str = "CONDUIT_HOME";
pub const CONDUIT_LOG_DIR_ENV: &str = "CONDUIT_LOG_DIR";

/// `$CONDUIT_HOME` if set, otherwise `~/.conduit`.
pub fn default_config_dir() -> PathBuf {
    if let Ok(home) = std::env::var(CONDUIT_HOME_ENV) {
        return PathBuf::from(home);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_CONFIG_DIR)
}

/// Walk up from `start` looking for an existing conduit home directory
/// (a `.conduit` directory containing `config.json`), falling back to the
/// global default.
pub fn find_conduit_home(start: &Path) -> PathBuf {
    let mut dir = Some(start);
    while let Some(candidate) = dir {
        let conduit_dir = candidate.join(DEFAULT_CONFIG_DIR);
        if conduit_dir.join(CONFIG_FILE).is_file() {
            return conduit_dir;
        }
        dir = candidate.parent();
    }
    default_config_dir()
}

/// Directory logs are written to, honoring `$CONDUIT_LOG_DIR`.
pub fn log_dir(conduit_home: &Path) -> PathBuf {
    if let Ok(dir) = std::env::var(CONDUIT_LOG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    conduit_home.join(LOG_DIR_NAME)
}

/// Read `AGENTS.md` from `project_dir`, if present.
pub fn load_instructions(project_dir: &Path) -> Option<String> {
    let path = project_dir.join(AGENTS_MD_FILE);
    match std::fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read instructions file");
            None
        }
    }
}

/// Assembles a [`Config`] from disk and the environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    conduit_home: PathBuf,
    project_dir: PathBuf,
}

impl ConfigLoader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            conduit_home: find_conduit_home(&project_dir),
            project_dir,
        }
    }

    pub fn with_conduit_home(mut self, conduit_home: impl Into<PathBuf>) -> Self {
        self.conduit_home = conduit_home.into();
        self
    }

    fn config_file_path(&self) -> PathBuf {
        self.conduit_home.join(CONFIG_FILE)
    }

    /// Read and parse `config.json`, returning `Config::default()` if it
    /// doesn't exist.
    pub fn load_config_file(&self) -> Result<Config, ConfigError> {
        let path = self.config_file_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|error| ConfigError::InvalidJson {
                file: path.display().to_string(),
                error: error.to_string(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file found, using defaults");
                Ok(Config::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Load the full configuration: file, then project instructions, then
    /// environment overrides, finally deriving the project-scoped defaults
    /// (cwd, conduit home, sandbox mode, tool/compaction/plan tuning).
    pub fn load(&self) -> Result<Config, ConfigError> {
        let mut config = self.load_config_file()?;

        config.cwd = self.project_dir.clone();
        config.conduit_home = self.conduit_home.clone();

        if let Some(instructions) = load_instructions(&self.project_dir) {
            config.instructions.push(instructions);
        }

        let env = EnvLoader::new();
        config.tool_config = env.load_tool_config();
        config.compaction = env.load_compact_config();
        config.plan_config = env.load_plan_config();
        config.attachment_config = env.load_attachment_config();
        config.path_config = env.load_path_config();

        if let Some(project_dir) = config.path_config.project_dir.clone() {
            config.cwd = project_dir;
        }

        Ok(config)
    }

    /// Persist `config` back to `config.json`, creating the conduit home
    /// directory if needed.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.conduit_home)?;
        let contents = serde_json::to_string_pretty(config)?;
        std::fs::write(self.config_file_path(), contents)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "loader.test.rs"]
mod tests;
