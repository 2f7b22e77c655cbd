//! Dispatch Service
//!
//! Runs the side effects of a met condition, in order: the desktop notifier,
//! one SMS per recipient, then the resolved action sequence. Every step is
//! independent: a failed or unconfigured step is reported and the remaining
//! steps still run.

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::domain::errors::WatchError;
use crate::domain::models::{DefaultConfig, DispatchStep, StepKind, StepStatus, WatcherSpec};
use crate::domain::ports::CommandRunner;
use crate::services::action_resolver::{self, TemplateVars};

/// Executes dispatch steps through a [`CommandRunner`]
#[derive(Clone)]
pub struct Dispatcher {
    runner: Arc<dyn CommandRunner>,
    defaults: Arc<DefaultConfig>,
}

impl Dispatcher {
    pub fn new(runner: Arc<dyn CommandRunner>, defaults: Arc<DefaultConfig>) -> Self {
        Self { runner, defaults }
    }

    /// Run every side effect for `spec`. `detected` is the raw probe result,
    /// used for the notifier subtitle.
    pub async fn dispatch(&self, spec: &WatcherSpec, detected: bool) -> Vec<DispatchStep> {
        let vars = TemplateVars::for_watcher(spec);
        let actions = action_resolver::resolve(&spec.actions, &self.defaults.actions, &vars);
        debug!(actions = ?actions, "resolved actions");

        let mut steps = Vec::with_capacity(actions.len() + self.defaults.sms.recipients.len() + 1);

        if spec.use_notifier {
            let step = match self.notifier_command(spec, detected) {
                Ok(command) => self.execute(StepKind::Notifier, command).await,
                Err(err) => abandoned(StepKind::Notifier, &err),
            };
            steps.push(step);
        }

        for recipient in &self.defaults.sms.recipients {
            let kind = StepKind::Sms {
                recipient: recipient.clone(),
            };
            let step = match self.sms_command(recipient, &vars) {
                Ok(command) => self.execute(kind, command).await,
                Err(err) => abandoned(kind, &err),
            };
            steps.push(step);
        }

        for (index, command) in actions.into_iter().enumerate() {
            steps.push(self.execute(StepKind::Action { index }, command).await);
        }

        let failed = steps.iter().filter(|s| !s.succeeded()).count();
        if failed > 0 {
            warn!(steps = steps.len(), failed, "dispatch finished with failures");
        } else {
            info!(steps = steps.len(), "dispatch finished");
        }

        steps
    }

    /// The notifier invocation for a met condition.
    pub fn notifier_command(&self, spec: &WatcherSpec, detected: bool) -> Result<String, WatchError> {
        let notifier = &self.defaults.notifier;
        let path = notifier
            .path
            .as_deref()
            .ok_or(WatchError::MissingNotifierConfig)?;

        let vars = TemplateVars::for_watcher(spec);
        let subtitle = if detected {
            format!("Found the text: '{}'", spec.pattern)
        } else {
            format!("Did not find the text: '{}'", spec.pattern)
        };

        Ok([
            path.to_string(),
            format!("-title {}", shell_quote(&vars.substitute(&notifier.title))),
            format!("-subtitle {}", shell_quote(&subtitle)),
            format!("-sound {}", shell_quote(&notifier.sound)),
            format!("-open {}", shell_quote(&spec.url)),
        ]
        .join(" "))
    }

    /// The SMS invocation for one recipient.
    pub fn sms_command(&self, recipient: &str, vars: &TemplateVars<'_>) -> Result<String, WatchError> {
        let sms = &self.defaults.sms;
        let path = sms.path.as_deref().ok_or(WatchError::MissingSmsConfig)?;

        Ok([
            path.to_string(),
            shell_quote(recipient),
            shell_quote(&vars.substitute(&sms.message)),
        ]
        .join(" "))
    }

    async fn execute(&self, kind: StepKind, command: String) -> DispatchStep {
        info!(step = %kind, command = %command, "running");

        let status = match self.runner.run(&command).await {
            Ok(outcome) if outcome.success() => {
                if !outcome.stdout.trim().is_empty() {
                    debug!(step = %kind, output = %outcome.stdout.trim(), "command output");
                }
                StepStatus::Succeeded
            }
            Ok(outcome) => {
                let err = WatchError::CommandExecutionFailure {
                    command: command.clone(),
                    exit_code: outcome.exit_code,
                };
                error!(step = %kind, stderr = %outcome.stderr.trim(), "{err}");
                StepStatus::Failed {
                    reason: err.to_string(),
                }
            }
            Err(err) => {
                let err = WatchError::from(err);
                error!(step = %kind, "{err}");
                StepStatus::Failed {
                    reason: err.to_string(),
                }
            }
        };

        DispatchStep {
            kind,
            command: Some(command),
            status,
        }
    }
}

fn abandoned(kind: StepKind, err: &WatchError) -> DispatchStep {
    error!(step = %kind, "{err}");
    DispatchStep {
        kind,
        command: None,
        status: StepStatus::Failed {
            reason: err.to_string(),
        },
    }
}

/// Double-quote `value` for `sh -c`, escaping the characters that stay
/// special inside double quotes.
pub fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
