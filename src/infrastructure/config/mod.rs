//! Configuration loading
//!
//! Hierarchical configuration using figment:
//! - built-in defaults
//! - one YAML or JSON document
//! - `TRIPWIRE_*` environment overrides
//! - validation of watcher names, urls and patterns

pub mod loader;

pub use loader::{ConfigError, ConfigLoader, DEFAULT_CONFIG_FILE};
