//! Watcher domain models
//!
//! A watcher is one URL + text pattern pair watched for a one-shot condition,
//! together with the commands to run the first time the condition holds.

use serde::{Deserialize, Serialize};

/// A single command as written in configuration.
///
/// Either a literal shell line or a list of tokens joined with single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandTemplate {
    Line(String),
    Tokens(Vec<String>),
}

impl CommandTemplate {
    /// The command line before variable substitution.
    pub fn render(&self) -> String {
        match self {
            Self::Line(line) => line.clone(),
            Self::Tokens(tokens) => tokens.join(" "),
        }
    }
}

impl From<&str> for CommandTemplate {
    fn from(line: &str) -> Self {
        Self::Line(line.to_string())
    }
}

/// The three optional slots of the phased action dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PhasedActions {
    pub pre: Option<String>,
    pub main: Option<String>,
    pub post: Option<String>,
}

impl PhasedActions {
    /// Build from raw slots, treating blank strings as undeclared.
    pub fn new(pre: Option<String>, main: Option<String>, post: Option<String>) -> Self {
        let declared = |slot: Option<String>| slot.filter(|s| !s.trim().is_empty());
        Self {
            pre: declared(pre),
            main: declared(main),
            post: declared(post),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pre.is_none() && self.main.is_none() && self.post.is_none()
    }

    /// Fill each undeclared slot from `fallback`, independently.
    pub fn or_phases(&self, fallback: &Self) -> Self {
        Self {
            pre: self.pre.clone().or_else(|| fallback.pre.clone()),
            main: self.main.clone().or_else(|| fallback.main.clone()),
            post: self.post.clone().or_else(|| fallback.post.clone()),
        }
    }

    /// Declared slots in execution order: pre, main, post.
    pub fn ordered(&self) -> Vec<String> {
        [&self.pre, &self.main, &self.post]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}

/// What to run when a watcher's condition is met.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", content = "commands", rename_all = "snake_case")]
pub enum ActionPlan {
    /// Commands executed in declaration order.
    OrderedList(Vec<CommandTemplate>),
    /// Optional pre, main and post commands.
    ThreePhase(PhasedActions),
}

impl Default for ActionPlan {
    fn default() -> Self {
        Self::OrderedList(Vec::new())
    }
}

impl ActionPlan {
    /// Pick the dialect from what a config level declared.
    ///
    /// A non-empty list selects the ordered dialect; otherwise any declared
    /// phase selects the phased one.
    pub fn from_declared(list: &[CommandTemplate], phases: PhasedActions) -> Self {
        if !list.is_empty() {
            Self::OrderedList(list.to_vec())
        } else if !phases.is_empty() {
            Self::ThreePhase(phases)
        } else {
            Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::OrderedList(commands) => commands.is_empty(),
            Self::ThreePhase(phases) => phases.is_empty(),
        }
    }

    /// Unsubstituted command lines in execution order, blanks dropped.
    pub fn command_lines(&self) -> Vec<String> {
        match self {
            Self::OrderedList(commands) => commands
                .iter()
                .map(CommandTemplate::render)
                .filter(|line| !line.trim().is_empty())
                .collect(),
            Self::ThreePhase(phases) => phases.ordered(),
        }
    }
}

/// A fully resolved watcher, immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatcherSpec {
    /// Unique key; also names the marker and artifact directory
    pub name: String,
    pub url: String,
    /// Text searched for on the rendered page
    pub pattern: String,
    /// Whether the condition requires the pattern to be present (true) or absent (false)
    pub expected_presence: bool,
    pub take_screenshot: bool,
    pub use_notifier: bool,
    /// The watcher's own declared actions; defaults are merged at dispatch time
    pub actions: ActionPlan,
}
