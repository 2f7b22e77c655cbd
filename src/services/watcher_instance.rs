//! Watcher Instance
//!
//! One pass of one watcher:
//!
//! ```text
//! INIT -> marker set? -> SUPPRESSED
//! INIT -> CHECKING -> probe failed -> NOT MET
//! CHECKING -> PROBED -> EVALUATED -> CAPTURED -> { MET -> latch -> DISPATCHED ; NOT MET }
//! ```
//!
//! Detection and capture each get the full probe timeout; a capture that
//! fails or overruns drops the screenshot but keeps the verdict.
//!
//! The marker is written before any action runs, so a crash mid-dispatch
//! can never produce a second alert on the next run.

use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, error, info, info_span, warn, Instrument, Span};

use crate::domain::errors::{ProbeError, WatchError};
use crate::domain::models::{Availability, DefaultConfig, WatchOutcome, WatcherReport, WatcherSpec};
use crate::domain::ports::{CommandRunner, MarkerStore, ProbeRequest, ProbeResult, Prober};
use crate::infrastructure::artifacts::ArtifactStore;
use crate::services::condition;
use crate::services::dispatcher::Dispatcher;

/// Collaborators shared by every watcher in a run
#[derive(Clone)]
pub struct WatcherContext {
    pub defaults: Arc<DefaultConfig>,
    pub prober: Arc<dyn Prober>,
    pub markers: Arc<dyn MarkerStore>,
    pub runner: Arc<dyn CommandRunner>,
}

/// A single watcher bound to its collaborators
pub struct WatcherInstance {
    spec: WatcherSpec,
    defaults: Arc<DefaultConfig>,
    prober: Arc<dyn Prober>,
    markers: Arc<dyn MarkerStore>,
    dispatcher: Dispatcher,
    artifacts: ArtifactStore,
    span: Span,
}

impl WatcherInstance {
    pub fn new(spec: WatcherSpec, context: &WatcherContext) -> Self {
        let span = info_span!("watcher", name = %spec.name);
        Self {
            artifacts: ArtifactStore::new(&context.defaults.data_dir),
            dispatcher: Dispatcher::new(Arc::clone(&context.runner), Arc::clone(&context.defaults)),
            defaults: Arc::clone(&context.defaults),
            prober: Arc::clone(&context.prober),
            markers: Arc::clone(&context.markers),
            spec,
            span,
        }
    }

    /// Run one pass. Never fails: every error ends up in the report.
    pub async fn run(&self) -> WatcherReport {
        self.execute().instrument(self.span.clone()).await
    }

    async fn execute(&self) -> WatcherReport {
        let name = self.spec.name.as_str();
        info!(url = %self.spec.url, "checking");

        if let Err(err) = self.artifacts.prepare(name).await {
            warn!(error = %err, "could not create watcher directory");
        }

        match self.markers.exists(name).await {
            Ok(true) => {
                info!("already found; suppressed");
                return self.report(WatchOutcome::Suppressed, None);
            }
            Ok(false) => {}
            Err(err) => {
                error!(error = %err, "could not read marker");
                return self.failed(&err.into());
            }
        }

        let result = match self.probe().await {
            Ok(result) => result,
            Err(err) => {
                let err = WatchError::from(err);
                warn!(error = %err, "probe failed; treating as not met");
                return self.report(
                    WatchOutcome::ProbeFailed {
                        reason: err.to_string(),
                    },
                    None,
                );
            }
        };

        let met = condition::evaluate(result.detected, self.spec.expected_presence);
        let availability = Availability::from_condition(met);

        info!(
            availability = %availability,
            detected = result.detected,
            "text \"{}\" was {}",
            self.spec.pattern,
            if result.detected { "FOUND" } else { "NOT found" }
        );

        let screenshot = self.screenshot(availability).await;

        if !met {
            return self.report(
                WatchOutcome::NotMet {
                    detected: result.detected,
                },
                screenshot,
            );
        }

        if let Err(err) = self.markers.set(name).await {
            error!(error = %err, "could not set marker; abandoning dispatch to avoid repeat alerts");
            let mut report = self.failed(&err.into());
            report.screenshot = screenshot;
            return report;
        }

        let steps = self.dispatcher.dispatch(&self.spec, result.detected).await;
        self.report(
            WatchOutcome::Dispatched {
                detected: result.detected,
                steps,
            },
            screenshot,
        )
    }

    fn request(&self) -> ProbeRequest {
        ProbeRequest {
            url: self.spec.url.clone(),
            pattern: self.spec.pattern.clone(),
            timeout: self.defaults.probe_timeout,
        }
    }

    async fn probe(&self) -> Result<ProbeResult, ProbeError> {
        let request = self.request();
        let limit = request.timeout;
        debug!(prober = self.prober.name(), timeout_ms = %limit.as_millis(), "probing");

        // Dropping the probe future on timeout releases the adapter's resources.
        timeout(limit, self.prober.probe(&request))
            .await
            .unwrap_or(Err(ProbeError::Timeout(limit)))
    }

    /// Capture runs under its own deadline after detection has settled;
    /// any failure here only costs the artifact.
    async fn screenshot(&self, availability: Availability) -> Option<PathBuf> {
        if !self.spec.take_screenshot {
            return None;
        }

        let request = self.request();
        let limit = request.timeout;
        let png = match timeout(limit, self.prober.capture(&request)).await {
            Ok(Ok(Some(png))) => png,
            Ok(Ok(None)) => {
                debug!(prober = self.prober.name(), "prober cannot capture screenshots");
                return None;
            }
            Ok(Err(err)) => {
                warn!(error = %err, "screenshot failed");
                return None;
            }
            Err(_) => {
                warn!(timeout_ms = %limit.as_millis(), "screenshot timed out");
                return None;
            }
        };

        match self
            .artifacts
            .write_screenshot(&self.spec.name, availability, &png)
            .await
        {
            Ok(path) => {
                debug!(path = %path.display(), "screenshot saved");
                Some(path)
            }
            Err(err) => {
                warn!(error = %err, "could not save screenshot");
                None
            }
        }
    }

    fn failed(&self, err: &WatchError) -> WatcherReport {
        self.report(
            WatchOutcome::Failed {
                reason: err.to_string(),
            },
            None,
        )
    }

    fn report(&self, outcome: WatchOutcome, screenshot: Option<PathBuf>) -> WatcherReport {
        WatcherReport {
            name: self.spec.name.clone(),
            url: self.spec.url.clone(),
            outcome,
            screenshot,
        }
    }
}
