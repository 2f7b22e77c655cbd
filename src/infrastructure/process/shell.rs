//! Shell command runner
//!
//! Runs command lines through `sh -c` with captured output, so user actions
//! may use pipes, redirects and quoting exactly as written in configuration.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::errors::CommandError;
use crate::domain::ports::{CommandOutcome, CommandRunner};

/// Runner configuration
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Shell executable
    pub shell: String,
    /// Kill commands that run longer than this; `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            shell: "sh".to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShellCommandRunner {
    config: ShellConfig,
}

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_config(config: ShellConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CommandRunner for ShellCommandRunner {
    async fn run(&self, command: &str) -> Result<CommandOutcome, CommandError> {
        if command.trim().is_empty() {
            return Err(CommandError::Empty);
        }

        let child = Command::new(&self.config.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::Spawn {
                command: command.to_string(),
                reason: e.to_string(),
            })?;

        let waited = child.wait_with_output();
        let output = match self.config.timeout {
            Some(limit) => match timeout(limit, waited).await {
                Ok(output) => output,
                Err(_) => {
                    // The child was dropped with the future and killed.
                    warn!(command, timeout_ms = %limit.as_millis(), "command timed out");
                    return Ok(CommandOutcome {
                        command: command.to_string(),
                        exit_code: None,
                        stdout: String::new(),
                        stderr: format!("timed out after {}ms", limit.as_millis()),
                    });
                }
            },
            None => waited.await,
        }
        .map_err(|e| CommandError::Spawn {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        let outcome = CommandOutcome {
            command: command.to_string(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(command, exit_code = ?outcome.exit_code, "command finished");
        Ok(outcome)
    }
}
