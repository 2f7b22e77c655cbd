//! Command execution port.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::CommandError;

/// Structured result of one external command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutcome {
    pub command: String,
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutcome {
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a shell command line to completion.
    ///
    /// A non-zero exit is not an error here; callers inspect the outcome.
    async fn run(&self, command: &str) -> Result<CommandOutcome, CommandError>;
}
