use anyhow::{Context, Result};
use figment::providers::{Env, Format, Json, Serialized, Yaml};
use figment::Figment;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tripwire.yaml";

/// Prefix for environment overrides (`TRIPWIRE_LOGGING__LEVEL=debug`).
/// Keys arrive lowercased, so only all-lowercase keys can be overridden.
pub const ENV_PREFIX: &str = "TRIPWIRE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Watcher #{0} has an empty name")]
    EmptyWatcherName(usize),

    #[error("Watcher name '{0}' is not usable as a directory name")]
    InvalidWatcherName(String),

    #[error("Duplicate watcher name: {0}")]
    DuplicateWatcherName(String),

    #[error("Watcher '{0}' has an empty url")]
    EmptyUrl(String),

    #[error("Watcher '{0}' has an empty waitForText.text")]
    EmptyPattern(String),

    #[error("Invalid probeTimeoutSecs: {0}. Must be at least 1")]
    InvalidProbeTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("dataDir cannot be empty")]
    EmptyDataDir,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. The config file (`.json` parsed as JSON, anything else as YAML)
    /// 3. Environment variables (TRIPWIRE_* prefix, `__` separates nested keys)
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let figment = if is_json {
            figment.merge(Json::file(path))
        } else {
            figment.merge(Yaml::file(path))
        };
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataDir);
        }

        if config.probe_timeout_secs == 0 {
            return Err(ConfigError::InvalidProbeTimeout(config.probe_timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let mut seen = HashSet::new();
        for (index, watcher) in config.watchers.iter().enumerate() {
            let name = watcher.name.trim();
            if name.is_empty() {
                return Err(ConfigError::EmptyWatcherName(index));
            }
            // Names become directory names under dataDir.
            if name.starts_with('.') || name.contains(['/', '\\']) || name != watcher.name {
                return Err(ConfigError::InvalidWatcherName(watcher.name.clone()));
            }
            if !seen.insert(name) {
                return Err(ConfigError::DuplicateWatcherName(watcher.name.clone()));
            }
            if watcher.url.trim().is_empty() {
                return Err(ConfigError::EmptyUrl(watcher.name.clone()));
            }
            if watcher.wait_for_text.text.trim().is_empty() {
                return Err(ConfigError::EmptyPattern(watcher.name.clone()));
            }
        }

        Ok(())
    }
}
