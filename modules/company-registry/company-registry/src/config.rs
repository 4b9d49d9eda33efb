//! Module configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional YAML
//! file, then `REGISTRY_*` environment variables with `__` separating
//! nested keys (`REGISTRY_AUTH__SECRET`, `REGISTRY_DATABASE__URL`).

use std::path::Path;
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use registry_auth::TokenConfig;
use serde::Deserialize;

use crate::domain::service::ServiceConfig;

pub const ENV_PREFIX: &str = "REGISTRY_";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("invalid configuration value for '{key}': {message}")]
    Invalid { key: &'static str, message: String },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub auth: TokenConfig,
    pub events: EventsConfig,
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection DSN (`sqlite::memory:`, `sqlite://path?mode=rwc`, `postgres://...`).
    pub url: String,
    pub max_connections: u32,
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Upper bound on waiting for a pooled connection.
    #[serde(with = "humantime_serde")]
    pub acquire_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite::memory:".to_owned(),
            max_connections: 5,
            connect_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// In-memory sqlite lives inside one connection; the pool must not open more.
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.starts_with("sqlite") && self.url.contains(":memory:")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Noop,
    Broadcast,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventsConfig {
    pub sink: SinkKind,
    pub topic: String,
    /// Broadcast buffer per subscriber.
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            sink: SinkKind::Noop,
            topic: "company-registry.mutations".to_owned(),
            capacity: 256,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Layered sources: optional YAML file, then the environment.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load from `path` (if any) and the environment.
    ///
    /// # Errors
    /// Returns `ConfigError` when a source cannot be parsed or a value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment(path))
    }

    /// # Errors
    /// Returns `ConfigError` when extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let cfg: Self = figment.extract().map_err(Box::new)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database.url",
                message: "must not be empty".to_owned(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "database.max_connections",
                message: "must be at least 1".to_owned(),
            });
        }
        if self.events.topic.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "events.topic",
                message: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
