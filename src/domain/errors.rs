//! Domain errors for the tripwire watcher.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Render an optional exit code the way a shell user would read it.
fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(
        || "no exit code (terminated by signal)".to_string(),
        |c| format!("exit code {c}"),
    )
}

/// Failures reported by a page prober.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Probe timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Probe failed: {0}")]
    Failed(String),
}

/// Failures starting an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Refusing to run an empty command")]
    Empty,

    #[error("Failed to spawn command `{command}`: {reason}")]
    Spawn { command: String, reason: String },
}

/// Failures reading or writing a watcher's latch.
#[derive(Debug, Error)]
pub enum MarkerError {
    #[error("Marker I/O failed for watcher '{name}' at {}: {source}", .path.display())]
    Io {
        name: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything that can go wrong inside a single watcher's run.
///
/// None of these escape the watcher instance; they are logged and folded
/// into that watcher's report.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(transparent)]
    Probe(#[from] ProbeError),

    #[error("Missing setting for \"terminalNotifierPath\"")]
    MissingNotifierConfig,

    #[error("Missing setting for \"smsPath\"")]
    MissingSmsConfig,

    #[error("Command `{command}` failed with {}", describe_exit(.exit_code))]
    CommandExecutionFailure {
        command: String,
        exit_code: Option<i32>,
    },

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error("Failed to write artifact {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failure_message_with_code() {
        let err = WatchError::CommandExecutionFailure {
            command: "false".to_string(),
            exit_code: Some(1),
        };
        assert_eq!(err.to_string(), "Command `false` failed with exit code 1");
    }

    #[test]
    fn test_command_failure_message_without_code() {
        let err = WatchError::CommandExecutionFailure {
            command: "sleep 10".to_string(),
            exit_code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_probe_error_is_transparent() {
        let err: WatchError = ProbeError::Timeout(Duration::from_secs(15)).into();
        assert_eq!(err.to_string(), "Probe timed out after 15000ms");
    }
}
