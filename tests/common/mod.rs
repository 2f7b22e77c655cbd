//! Common test utilities for integration tests
//!
//! Hand-written port mocks shared across the integration test files.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tripwire::domain::errors::{CommandError, ProbeError};
use tripwire::domain::models::{ActionPlan, CommandTemplate, DefaultConfig, WatcherSpec};
use tripwire::domain::ports::{
    CommandOutcome, CommandRunner, MarkerStore, ProbeRequest, ProbeResult, Prober,
};
use tripwire::services::WatcherContext;

/// What the scripted prober does for one URL
#[derive(Debug, Clone)]
pub enum Script {
    Detected(bool),
    Error(String),
    Hang,
    Panic,
}

/// Prober whose behavior is scripted per URL; unknown URLs report "not detected".
#[derive(Default)]
pub struct ScriptedProber {
    scripts: HashMap<String, Script>,
    calls: AtomicUsize,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, script: Script) -> Self {
        self.scripts.insert(url.to_string(), script);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResult, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.scripts.get(&request.url) {
            Some(Script::Detected(detected)) => Ok(ProbeResult {
                detected: *detected,
            }),
            Some(Script::Error(reason)) => Err(ProbeError::Failed(reason.clone())),
            Some(Script::Hang) => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(ProbeResult::default())
            }
            Some(Script::Panic) => panic!("prober blew up for {}", request.url),
            None => Ok(ProbeResult::default()),
        }
    }

    async fn capture(&self, request: &ProbeRequest) -> Result<Option<Vec<u8>>, ProbeError> {
        Ok(matches!(self.scripts.get(&request.url), Some(Script::Detected(_)))
            .then(|| b"\x89PNG".to_vec()))
    }
}

/// Records every command; commands containing "fail" exit 1.
#[derive(Default, Clone)]
pub struct RecordingRunner {
    commands: Arc<Mutex<Vec<String>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &str) -> Result<CommandOutcome, CommandError> {
        self.commands.lock().unwrap().push(command.to_string());
        Ok(CommandOutcome {
            command: command.to_string(),
            exit_code: Some(i32::from(command.contains("fail"))),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

pub fn watcher(name: &str, expected_presence: bool, actions: &[&str]) -> WatcherSpec {
    WatcherSpec {
        name: name.to_string(),
        url: format!("https://example.com/{name}"),
        pattern: "Fully booked".to_string(),
        expected_presence,
        take_screenshot: false,
        use_notifier: false,
        actions: ActionPlan::OrderedList(actions.iter().copied().map(CommandTemplate::from).collect()),
    }
}

pub fn defaults(data_dir: &Path) -> DefaultConfig {
    let mut defaults = DefaultConfig::default();
    defaults.data_dir = data_dir.to_path_buf();
    defaults.probe_timeout = Duration::from_millis(200);
    defaults
}

pub fn context(
    defaults: DefaultConfig,
    prober: Arc<dyn Prober>,
    markers: Arc<dyn MarkerStore>,
    runner: RecordingRunner,
) -> WatcherContext {
    WatcherContext {
        defaults: Arc::new(defaults),
        prober,
        markers,
        runner: Arc::new(runner),
    }
}

/// Initializes a test-writer subscriber; safe to call from every test.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
