use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use super::watcher::{ActionPlan, CommandTemplate, PhasedActions, WatcherSpec};

/// Main configuration document for tripwire
///
/// Top-level keys are the process-wide defaults; `watchers` lists the targets.
/// Both action dialects are accepted: `defaultActions` (ordered list) or
/// `preAction` / `defaultAction` / `postAction` (three-phase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory holding one sub-directory per watcher
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Per-probe timeout in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Upper bound on each notifier, SMS or action command; unbounded when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,

    /// Default for capturing a screenshot on every probe
    #[serde(default)]
    pub take_screenshot: bool,

    /// Default for invoking the desktop notifier on detection
    #[serde(default, alias = "useNotifier")]
    pub use_terminal_notifier: bool,

    /// Path to the notifier program (terminal-notifier compatible flags)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_notifier_path: Option<String>,

    /// Notifier title; `%NAME%` and `%URL%` are substituted
    #[serde(default = "default_notifier_title")]
    pub notifier_title: String,

    /// Notifier sound name
    #[serde(default = "default_notifier_sound")]
    pub notifier_sound: String,

    /// Path to the SMS sending program, invoked as `<smsPath> <recipient> "<message>"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_path: Option<String>,

    /// Recipients texted on every detection
    #[serde(default)]
    pub send_sms: Vec<String>,

    /// SMS body; `%NAME%` and `%URL%` are substituted
    #[serde(default = "default_sms_message")]
    pub sms_message: String,

    /// Ordered-list dialect defaults
    #[serde(default)]
    pub default_actions: Vec<CommandTemplate>,

    /// Three-phase dialect defaults
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_action: Option<String>,

    /// Page probe backend
    #[serde(default)]
    pub probe: ProbeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,

    /// Watched targets
    #[serde(default)]
    pub watchers: Vec<WatcherConfig>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".private")
}

const fn default_probe_timeout_secs() -> u64 {
    15
}

fn default_notifier_title() -> String {
    "Alert! [%NAME%]".to_string()
}

fn default_notifier_sound() -> String {
    "sosumi".to_string()
}

fn default_sms_message() -> String {
    "Condition met! [%NAME%] %URL%".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            probe_timeout_secs: default_probe_timeout_secs(),
            command_timeout_secs: None,
            take_screenshot: false,
            use_terminal_notifier: false,
            terminal_notifier_path: None,
            notifier_title: default_notifier_title(),
            notifier_sound: default_notifier_sound(),
            sms_path: None,
            send_sms: vec![],
            sms_message: default_sms_message(),
            default_actions: vec![],
            pre_action: None,
            default_action: None,
            post_action: None,
            probe: ProbeConfig::default(),
            logging: LogConfig::default(),
            watchers: vec![],
        }
    }
}

impl Config {
    /// The shared, read-only defaults every watcher instance receives.
    pub fn default_config(&self) -> DefaultConfig {
        DefaultConfig {
            data_dir: self.data_dir.clone(),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            notifier: NotifierSettings {
                path: non_blank(self.terminal_notifier_path.as_deref()),
                title: self.notifier_title.clone(),
                sound: self.notifier_sound.clone(),
            },
            sms: SmsSettings {
                path: non_blank(self.sms_path.as_deref()),
                recipients: self.send_sms.clone(),
                message: self.sms_message.clone(),
            },
            actions: ActionPlan::from_declared(
                &self.default_actions,
                PhasedActions::new(
                    self.pre_action.clone(),
                    self.default_action.clone(),
                    self.post_action.clone(),
                ),
            ),
        }
    }

    /// Resolve every configured watcher against the defaults.
    pub fn watcher_specs(&self) -> Vec<WatcherSpec> {
        self.watchers
            .iter()
            .map(|w| w.to_spec(self.take_screenshot, self.use_terminal_notifier))
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// One watched target as written in configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatcherConfig {
    pub name: String,
    pub url: String,
    pub wait_for_text: WaitForText,

    /// Overrides the default when set; an explicit `false` always wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_screenshot: Option<bool>,

    #[serde(default, alias = "useNotifier", skip_serializing_if = "Option::is_none")]
    pub use_terminal_notifier: Option<bool>,

    #[serde(default)]
    pub actions: Vec<CommandTemplate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_action: Option<String>,
}

/// The text to look for and whether it should be there
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitForText {
    pub text: String,

    /// `true`: met when the text appears. `false`: met when it is gone.
    #[serde(default)]
    pub is_present: bool,
}

impl WatcherConfig {
    /// Resolve flag overrides and the declared action dialect.
    pub fn to_spec(&self, default_screenshot: bool, default_notifier: bool) -> WatcherSpec {
        let phases = PhasedActions::new(
            self.pre_action.clone(),
            self.action.clone(),
            self.post_action.clone(),
        );
        if !self.actions.is_empty() && !phases.is_empty() {
            warn!(
                watcher = %self.name,
                "both `actions` and phased actions declared; using `actions`"
            );
        }

        WatcherSpec {
            name: self.name.clone(),
            url: self.url.clone(),
            pattern: self.wait_for_text.text.clone(),
            expected_presence: self.wait_for_text.is_present,
            take_screenshot: self.take_screenshot.unwrap_or(default_screenshot),
            use_notifier: self.use_terminal_notifier.unwrap_or(default_notifier),
            actions: ActionPlan::from_declared(&self.actions, phases),
        }
    }
}

/// Process-wide settings shared read-only by every watcher instance.
///
/// Screenshot and notifier switches are resolved into each `WatcherSpec`
/// by [`Config::watcher_specs`] and do not appear here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConfig {
    pub data_dir: PathBuf,
    pub probe_timeout: Duration,
    pub notifier: NotifierSettings,
    pub sms: SmsSettings,
    pub actions: ActionPlan,
}

impl Default for DefaultConfig {
    fn default() -> Self {
        Config::default().default_config()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierSettings {
    pub path: Option<String>,
    pub title: String,
    pub sound: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsSettings {
    pub path: Option<String>,
    pub recipients: Vec<String>,
    pub message: String,
}

/// Which prober renders pages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Plain HTTP fetch of the page source
    #[default]
    Http,
    /// Headless Chromium-compatible browser
    Browser,
}

/// Probe backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeConfig {
    #[serde(default)]
    pub kind: ProbeKind,

    /// Browser executable for the `browser` kind
    #[serde(default = "default_browser_path")]
    pub browser_path: String,

    /// Time the browser lets the page settle before dumping the DOM
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

fn default_browser_path() -> String {
    "chromium".to_string()
}

const fn default_settle_ms() -> u64 {
    5000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            kind: ProbeKind::default(),
            browser_path: default_browser_path(),
            settle_ms: default_settle_ms(),
            user_agent: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format (json, pretty)
    #[serde(default = "default_format")]
    pub format: LogFormat,

    /// Directory for log files (optional, if None logs only to stdout)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Enable stdout logging
    #[serde(default = "default_true")]
    pub enable_stdout: bool,

    /// Log rotation policy
    #[serde(default)]
    pub rotation: RotationPolicy,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Daily,
    Hourly,
    #[default]
    Never,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_format(),
            log_dir: None,
            enable_stdout: true,
            rotation: RotationPolicy::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

const fn default_format() -> LogFormat {
    LogFormat::Pretty
}

const fn default_true() -> bool {
    true
}
