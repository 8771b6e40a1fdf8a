//! Session configuration: the recognized config-file surface, environment
//! variable overrides, and the loader that merges them.
//!
//! Configuration is stored in `config.json` under the conduit home
//! directory (`$CONDUIT_HOME`, defaulting to `~/.conduit`), and can be
//! overridden per-field by environment variables (see [`env_loader`]).
//!
//! # Example
//!
//! ```no_run
//! use conduit_config::ConfigLoader;
//!
//! # fn example() -> Result<(), conduit_config::ConfigError> {
//! let loader = ConfigLoader::new(std::env::current_dir().unwrap());
//! let config = loader.load()?;
//! println!("sandbox mode: {}", config.sandbox_mode);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod env_loader;
pub mod error;
pub mod loader;

pub use config::AgentEntry;
pub use config::CommandEntry;
pub use config::Config;
pub use config::ConfigOverrides;
pub use config::DiffStyle;
pub use config::ExperimentalConfig;
pub use config::FormatterConfig;
pub use config::LogFormat;
pub use config::LoggingConfig;
pub use config::LspConfig;
pub use config::McpServerEntry;
pub use config::Permission;
pub use config::PermissionMemoryScope;
pub use config::ProviderEntry;
pub use config::ServerConfig;
pub use config::Share;
pub use config::SkillsConfig;
pub use config::TuiConfig;
pub use env_loader::EnvLoader;
pub use error::ConfigError;
pub use error::Result;
pub use loader::AGENTS_MD_FILE;
pub use loader::CONDUIT_HOME_ENV;
pub use loader::CONDUIT_LOG_DIR_ENV;
pub use loader::CONFIG_FILE;
pub use loader::ConfigLoader;
pub use loader::DEFAULT_CONFIG_DIR;
pub use loader::LOG_DIR_NAME;
pub use loader::default_config_dir;
pub use loader::find_conduit_home;
pub use loader::load_instructions;
pub use loader::log_dir;
