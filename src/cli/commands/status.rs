//! `tripwire status`: latch state per watcher.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::domain::models::Config;
use crate::infrastructure::markers::{FileMarkerStore, MarkerState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatcherStatus {
    pub name: String,
    pub url: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub found_at: Option<DateTime<Utc>>,
    pub marker: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub watchers: Vec<WatcherStatus>,
}

pub async fn collect(config: &Config) -> Result<StatusOutput> {
    let store = FileMarkerStore::new(&config.data_dir);
    let mut watchers = Vec::with_capacity(config.watchers.len());

    for watcher in &config.watchers {
        let state = store
            .state(&watcher.name)
            .await
            .with_context(|| format!("Failed to read marker for {}", watcher.name))?;
        let (found, found_at) = match state {
            MarkerState::Unset => (false, None),
            MarkerState::Set { at } => (true, at),
        };
        watchers.push(WatcherStatus {
            name: watcher.name.clone(),
            url: watcher.url.clone(),
            found,
            found_at,
            marker: store.marker_path(&watcher.name),
        });
    }

    Ok(StatusOutput { watchers })
}

pub async fn execute(config: &Config, json: bool) -> Result<()> {
    output(&collect(config).await?, json);
    Ok(())
}

impl CommandOutput for StatusOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["name", "state", "since", "marker"]);
        for w in &self.watchers {
            table.add_row(vec![
                w.name.clone(),
                if w.found { "found" } else { "armed" }.to_string(),
                w.found_at
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                    .unwrap_or_else(|| "-".to_string()),
                w.marker.display().to_string(),
            ]);
        }
        render_list("watcher", &table, self.watchers.len())
    }
}
