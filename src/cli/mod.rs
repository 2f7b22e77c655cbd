//! Command-line interface
//!
//! `tripwire [--config PATH] [--json] <run|status|validate>`

pub mod commands;
pub mod display;
pub mod types;

use std::process::ExitCode;

pub use types::{Cli, Commands};

/// Print a fatal error and map it to the process exit code.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ExitCode {
    if json {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("{}", display::action_failure(&format!("{err:#}")));
    }
    ExitCode::FAILURE
}
