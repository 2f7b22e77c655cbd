//! Tripwire - one-shot page condition watcher
//!
//! Each configured watcher probes a URL for a piece of text, evaluates
//! whether the text's presence matches what it waits for, and on the first
//! match latches a marker and fires its alerts: desktop notifier, SMS, and
//! user actions. Later runs see the marker and stay quiet.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors and the port traits
//! - **Service Layer** (`services`): condition evaluation, action resolution,
//!   dispatch and the per-watcher state machine
//! - **Application Layer** (`application`): the concurrent orchestrator
//! - **Infrastructure Layer** (`infrastructure`): probers, marker files,
//!   shell execution, config and logging
//! - **CLI Layer** (`cli`): `run`, `status` and `validate`
//!
//! # Example
//!
//! ```ignore
//! use tripwire::cli::commands::run::run_once;
//! use tripwire::ConfigLoader;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load_from_file("tripwire.yaml")?;
//!     let summary = run_once(&config).await?;
//!     println!("{} dispatched", summary.dispatched());
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::Orchestrator;
pub use domain::errors::{CommandError, MarkerError, ProbeError, WatchError};
pub use domain::models::{
    ActionPlan, CommandTemplate, Config, DefaultConfig, PhasedActions, RunSummary, WatchOutcome,
    WatcherReport, WatcherSpec,
};
pub use domain::ports::{CommandRunner, MarkerStore, Prober};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{WatcherContext, WatcherInstance};
