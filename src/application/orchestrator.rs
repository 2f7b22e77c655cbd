//! Orchestrator
//!
//! Runs every configured watcher concurrently on the tokio runtime and
//! collects one report per watcher. Watchers share nothing mutable: the
//! defaults are behind an `Arc`, and the marker store is partitioned by name.
//!
//! ```text
//!            Orchestrator::run
//!                   │
//!        ┌──────────┼──────────┐   JoinSet, one task per watcher
//!        ▼          ▼          ▼
//!   WatcherInstance ...  WatcherInstance
//!        │                     │
//!        └──── reports (config order) ────┘
//! ```
//!
//! A watcher that errors, or even panics, only affects its own report.

use tokio::task::JoinSet;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::domain::models::{RunSummary, WatchOutcome, WatcherReport, WatcherSpec};
use crate::services::{WatcherContext, WatcherInstance};

pub struct Orchestrator {
    context: WatcherContext,
}

impl Orchestrator {
    pub const fn new(context: WatcherContext) -> Self {
        Self { context }
    }

    /// One pass over all watchers. Completes when every watcher has reached
    /// a terminal state.
    pub async fn run(&self, watchers: Vec<WatcherSpec>) -> RunSummary {
        let span = info_span!("run", run_id = %Uuid::new_v4());
        self.run_all(watchers).instrument(span).await
    }

    async fn run_all(&self, watchers: Vec<WatcherSpec>) -> RunSummary {
        info!(watchers = watchers.len(), "starting run");

        let identities: Vec<(String, String)> = watchers
            .iter()
            .map(|w| (w.name.clone(), w.url.clone()))
            .collect();
        let mut slots: Vec<Option<WatcherReport>> = vec![None; watchers.len()];

        let mut tasks = JoinSet::new();
        for (index, spec) in watchers.into_iter().enumerate() {
            let instance = WatcherInstance::new(spec, &self.context);
            tasks.spawn(
                async move {
                    let report = instance.run().await;
                    (index, report)
                }
                .in_current_span(),
            );
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(err) => error!(error = %err, "watcher task aborted"),
            }
        }

        let reports: Vec<WatcherReport> = slots
            .into_iter()
            .zip(identities)
            .map(|(slot, (name, url))| {
                slot.unwrap_or_else(|| WatcherReport {
                    name,
                    url,
                    outcome: WatchOutcome::Failed {
                        reason: "watcher task aborted before reporting".to_string(),
                    },
                    screenshot: None,
                })
            })
            .collect();

        let summary = RunSummary { reports };
        info!(
            watchers = summary.reports.len(),
            dispatched = summary.dispatched(),
            failed = summary.failed(),
            "run complete"
        );
        summary
    }
}
