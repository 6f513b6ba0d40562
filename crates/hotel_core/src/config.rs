//! Layered service configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `<PREFIX>_*` environment variables (`__` separates nested keys,
//! e.g. `ROOM_SERVER__PORT=9000`).

use crate::logging::default_log_level;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Per-service defaults used to seed configuration loading.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    /// Service name; also the default config file stem and database file stem.
    pub name: &'static str,
    /// Environment variable prefix, e.g. `ROOM`.
    pub env_prefix: &'static str,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ServiceConfig {
    pub server: Server,
    pub database: Database,
    pub logger: Logger,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Database {
    /// File path, or `:memory:` for a throwaway database.
    pub path: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Logger {
    pub level: String,
    /// Absolute directory for rolling log files; stderr when unset.
    pub dir: Option<String>,
}

impl ServiceConfig {
    /// Loads configuration from `<PREFIX>_CONFIG` (or `<name>.toml`) plus env.
    pub fn load(defaults: &ServiceDefaults) -> Result<Self, ConfigError> {
        let file = std::env::var(format!("{}_CONFIG", defaults.env_prefix))
            .unwrap_or_else(|_| format!("{}.toml", defaults.name));
        Self::load_with_file(defaults, &file)
    }

    /// Loads configuration from an explicit file path plus env.
    ///
    /// A missing file is not an error; defaults and env still apply.
    pub fn load_with_file(defaults: &ServiceDefaults, file: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", i64::from(defaults.port))?
            .set_default("database.path", format!("{}.sqlite3", defaults.name))?
            .set_default("logger.level", default_log_level())?
            .add_source(File::with_name(file).required(false))
            .add_source(
                Environment::with_prefix(defaults.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<ServiceConfig>()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn is_in_memory_db(&self) -> bool {
        self.database.path.trim() == ":memory:"
    }
}
