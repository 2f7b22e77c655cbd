pub mod config;
pub mod outcome;
pub mod watcher;

pub use config::{
    Config, DefaultConfig, LogConfig, LogFormat, NotifierSettings, ProbeConfig, ProbeKind,
    RotationPolicy, SmsSettings, WaitForText, WatcherConfig,
};
pub use outcome::{
    Availability, DispatchStep, RunSummary, StepKind, StepStatus, WatchOutcome, WatcherReport,
};
pub use watcher::{ActionPlan, CommandTemplate, PhasedActions, WatcherSpec};
