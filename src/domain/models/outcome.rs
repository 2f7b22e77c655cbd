//! Per-run results
//!
//! Nothing here is persisted; reports exist for logging and CLI output.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The evaluated condition, as shown in logs and artifact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub const fn from_condition(met: bool) -> Self {
        if met {
            Self::Available
        } else {
            Self::Unavailable
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Unavailable => "UNAVAILABLE",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which side effect a dispatch step performed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    Notifier,
    Sms { recipient: String },
    Action { index: usize },
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Notifier => f.write_str("notifier"),
            Self::Sms { recipient } => write!(f, "sms:{recipient}"),
            Self::Action { index } => write!(f, "action#{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepStatus {
    Succeeded,
    Failed { reason: String },
}

/// One executed (or abandoned) side effect
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchStep {
    #[serde(flatten)]
    pub kind: StepKind,
    /// `None` when the command could not even be built (missing config)
    pub command: Option<String>,
    #[serde(flatten)]
    pub status: StepStatus,
}

impl DispatchStep {
    pub const fn succeeded(&self) -> bool {
        matches!(self.status, StepStatus::Succeeded)
    }
}

/// Terminal state of one watcher's pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WatchOutcome {
    /// Marker already set; nothing probed
    Suppressed,
    /// Probe completed and the condition does not hold
    NotMet { detected: bool },
    /// Probe timed out or errored; treated as not met
    ProbeFailed { reason: String },
    /// Condition met for the first time; marker set and actions run
    Dispatched {
        detected: bool,
        steps: Vec<DispatchStep>,
    },
    /// The run aborted before or during dispatch (marker I/O, task panic)
    Failed { reason: String },
}

impl WatchOutcome {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Suppressed => "suppressed",
            Self::NotMet { .. } => "not met",
            Self::ProbeFailed { .. } => "probe failed",
            Self::Dispatched { .. } => "dispatched",
            Self::Failed { .. } => "failed",
        }
    }

    pub const fn is_met(&self) -> bool {
        matches!(self, Self::Dispatched { .. })
    }
}

/// What one watcher did during a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatcherReport {
    pub name: String,
    pub url: String,
    pub outcome: WatchOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<PathBuf>,
}

/// Reports for every watcher, in configuration order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub reports: Vec<WatcherReport>,
}

impl RunSummary {
    pub fn count(&self, pred: impl Fn(&WatchOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn dispatched(&self) -> usize {
        self.count(WatchOutcome::is_met)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                WatchOutcome::Failed { .. } | WatchOutcome::ProbeFailed { .. }
            )
        })
    }

    pub fn report(&self, name: &str) -> Option<&WatcherReport> {
        self.reports.iter().find(|r| r.name == name)
    }
}
