//! `tripwire validate`: show what a run would do without probing anything.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::display::{action_success, list_table, output, CommandOutput};
use crate::domain::models::Config;
use crate::services::{resolve, TemplateVars};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedWatcher {
    pub name: String,
    pub url: String,
    pub pattern: String,
    pub expected_presence: bool,
    pub take_screenshot: bool,
    pub use_notifier: bool,
    pub actions: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutput {
    pub config: PathBuf,
    pub sms_recipients: usize,
    pub watchers: Vec<ResolvedWatcher>,
}

pub fn resolve_watchers(config_path: &Path, config: &Config) -> ValidateOutput {
    let defaults = config.default_config();
    let watchers = config
        .watcher_specs()
        .into_iter()
        .map(|spec| {
            let actions = resolve(
                &spec.actions,
                &defaults.actions,
                &TemplateVars::for_watcher(&spec),
            );
            ResolvedWatcher {
                actions,
                name: spec.name,
                url: spec.url,
                pattern: spec.pattern,
                expected_presence: spec.expected_presence,
                take_screenshot: spec.take_screenshot,
                use_notifier: spec.use_notifier,
            }
        })
        .collect();

    ValidateOutput {
        config: config_path.to_path_buf(),
        sms_recipients: defaults.sms.recipients.len(),
        watchers,
    }
}

pub fn execute(config_path: &Path, config: &Config, json: bool) {
    output(&resolve_watchers(config_path, config), json);
}

impl CommandOutput for ValidateOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["name", "condition", "notify", "actions"]);
        for w in &self.watchers {
            let condition = format!(
                "\"{}\" {}",
                w.pattern,
                if w.expected_presence { "appears" } else { "disappears" }
            );
            let notify = match (w.use_notifier, self.sms_recipients) {
                (true, 0) => "notifier".to_string(),
                (true, n) => format!("notifier + {n} sms"),
                (false, 0) => "-".to_string(),
                (false, n) => format!("{n} sms"),
            };
            table.add_row(vec![
                w.name.clone(),
                condition,
                notify,
                w.actions.join("\n"),
            ]);
        }

        let headline = action_success(&format!(
            "{} is valid ({} watchers)",
            self.config.display(),
            self.watchers.len()
        ));
        if self.watchers.is_empty() {
            headline
        } else {
            format!("{headline}\n{table}")
        }
    }
}
