//! Configuration System
//!
//! Handles loading builder defaults and logging settings from TOML files and
//! environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ql::{QueryBuilder, Relation};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values applied to every builder created through [`Config::builder`]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    pub database: Option<String>,

    pub retention_policy: Option<String>,

    #[serde(default)]
    pub relation: Relation,

    pub tz: Option<String>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("influx-ql").join("config.toml")),
            Some(PathBuf::from("/etc/influx-ql/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// A builder preconfigured with the `[defaults]` section
    pub fn builder(&self) -> QueryBuilder {
        let defaults = &self.defaults;
        let mut builder = QueryBuilder::default();

        if let Some(db) = &defaults.database {
            builder.set_database(db.as_str());
        }
        if let Some(rp) = &defaults.retention_policy {
            builder.set_retention_policy(rp.as_str());
        }
        if let Some(tz) = &defaults.tz {
            builder.set_tz(tz.as_str());
        }
        builder.set_relation(defaults.relation);
        builder
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Builder defaults
        if let Ok(database) = std::env::var("INFLUX_QL_DATABASE") {
            self.defaults.database = Some(database);
        }
        if let Ok(rp) = std::env::var("INFLUX_QL_RP") {
            self.defaults.retention_policy = Some(rp);
        }
        if let Ok(relation) = std::env::var("INFLUX_QL_RELATION") {
            match Relation::parse(&relation) {
                Some(r) => self.defaults.relation = r,
                None => tracing::warn!("Ignoring invalid INFLUX_QL_RELATION: {}", relation),
            }
        }
        if let Ok(tz) = std::env::var("INFLUX_QL_TZ") {
            self.defaults.tz = Some(tz);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("INFLUX_QL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("INFLUX_QL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# influx-ql Configuration
#
# Environment variables override these settings:
# - INFLUX_QL_DATABASE
# - INFLUX_QL_RP
# - INFLUX_QL_RELATION
# - INFLUX_QL_TZ
# - INFLUX_QL_LOG_LEVEL
# - INFLUX_QL_LOG_FORMAT

[defaults]
# Database every new builder selects from
# database = "mydb"

# Retention policy every new builder selects from
# retention_policy = "autogen"

# How WHERE fragments are joined: and, or
relation = "and"

# Time zone appended as tz('...')
# tz = "America/Chicago"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
