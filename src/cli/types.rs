//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "tripwire")]
#[command(about = "Watch pages for a text condition and alert exactly once", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (YAML, or JSON when the extension is .json)
    #[arg(short, long, global = true, env = "TRIPWIRE_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Probe every watcher once and dispatch alerts for newly met conditions
    Run,

    /// Show each watcher's latch state
    Status,

    /// Check the configuration and print the resolved watchers
    Validate,
}
