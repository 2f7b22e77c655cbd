//! `tripwire run`: one orchestrated pass over every watcher.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

use crate::application::Orchestrator;
use crate::cli::display::{list_table, output, render_list, truncate, CommandOutput};
use crate::domain::models::{Config, RunSummary, WatchOutcome, WatcherReport};
use crate::infrastructure::markers::FileMarkerStore;
use crate::infrastructure::probe::build_prober;
use crate::infrastructure::process::{ShellCommandRunner, ShellConfig};
use crate::services::WatcherContext;

/// Wire the production adapters for `config`.
pub fn build_context(config: &Config) -> Result<WatcherContext> {
    let prober = build_prober(&config.probe).context("Failed to build page prober")?;
    let runner = ShellCommandRunner::with_config(ShellConfig {
        timeout: config.command_timeout_secs.map(Duration::from_secs),
        ..ShellConfig::default()
    });

    Ok(WatcherContext {
        defaults: Arc::new(config.default_config()),
        prober,
        markers: Arc::new(FileMarkerStore::new(&config.data_dir)),
        runner: Arc::new(runner),
    })
}

/// Probe every configured watcher once.
///
/// # Errors
/// Fails only when the data root cannot be created or the adapters cannot be
/// built; per-watcher problems are part of the summary.
pub async fn run_once(config: &Config) -> Result<RunSummary> {
    tokio::fs::create_dir_all(&config.data_dir)
        .await
        .with_context(|| format!("Data directory {} is unusable", config.data_dir.display()))?;

    let orchestrator = Orchestrator::new(build_context(config)?);
    Ok(orchestrator.run(config.watcher_specs()).await)
}

pub async fn execute(config: &Config, json: bool) -> Result<()> {
    let summary = run_once(config).await?;
    output(&RunOutput::from(summary), json);
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub watchers: usize,
    pub dispatched: usize,
    pub failed: usize,
    pub reports: Vec<WatcherReport>,
}

impl From<RunSummary> for RunOutput {
    fn from(summary: RunSummary) -> Self {
        Self {
            watchers: summary.reports.len(),
            dispatched: summary.dispatched(),
            failed: summary.failed(),
            reports: summary.reports,
        }
    }
}

fn detail(outcome: &WatchOutcome) -> String {
    match outcome {
        WatchOutcome::Suppressed => "already found earlier".to_string(),
        WatchOutcome::NotMet { detected: true } => "text present".to_string(),
        WatchOutcome::NotMet { detected: false } => "text absent".to_string(),
        WatchOutcome::ProbeFailed { reason } | WatchOutcome::Failed { reason } => reason.clone(),
        WatchOutcome::Dispatched { steps, .. } => {
            let ok = steps.iter().filter(|s| s.succeeded()).count();
            format!("{ok}/{} steps succeeded", steps.len())
        }
    }
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["name", "outcome", "detail", "screenshot"]);
        for report in &self.reports {
            table.add_row(vec![
                report.name.clone(),
                report.outcome.label().to_string(),
                truncate(&detail(&report.outcome), 60),
                report
                    .screenshot
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ]);
        }

        let mut rendered = render_list("watcher", &table, self.watchers);
        if self.watchers > 0 {
            rendered.push_str(&format!(
                "\n\n{} dispatched, {} failed",
                self.dispatched, self.failed
            ));
        }
        rendered
    }
}
