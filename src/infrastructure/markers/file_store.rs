use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::errors::MarkerError;
use crate::domain::ports::MarkerStore;

/// Marker file name inside each watcher directory
pub const MARKER_FILE: &str = "FOUND";

/// What the marker file says about a watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    Unset,
    /// `at` is `None` when the file carries no readable timestamp
    /// (for instance a marker created by hand with `touch`).
    Set { at: Option<DateTime<Utc>> },
}

/// Latches stored as `<root>/<watcher>/FOUND`.
///
/// The file's existence is the latch; its content is an RFC 3339 timestamp
/// kept for `status` output only.
#[derive(Debug, Clone)]
pub struct FileMarkerStore {
    root: PathBuf,
}

impl FileMarkerStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn marker_path(&self, name: &str) -> PathBuf {
        self.root.join(name).join(MARKER_FILE)
    }

    pub async fn state(&self, name: &str) -> Result<MarkerState, MarkerError> {
        let path = self.marker_path(name);
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(MarkerState::Set {
                at: DateTime::parse_from_rfc3339(content.trim())
                    .ok()
                    .map(|t| t.with_timezone(&Utc)),
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(MarkerState::Unset),
            Err(err) => Err(io_error(name, path, err)),
        }
    }
}

fn io_error(name: &str, path: PathBuf, source: io::Error) -> MarkerError {
    MarkerError::Io {
        name: name.to_string(),
        path,
        source,
    }
}

#[async_trait]
impl MarkerStore for FileMarkerStore {
    async fn exists(&self, name: &str) -> Result<bool, MarkerError> {
        let path = self.marker_path(name);
        fs::try_exists(&path)
            .await
            .map_err(|err| io_error(name, path, err))
    }

    async fn set(&self, name: &str) -> Result<(), MarkerError> {
        let path = self.marker_path(name);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|err| io_error(name, dir.to_path_buf(), err))?;
        }

        let created = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await;
        let mut file = match created {
            Ok(file) => file,
            // Keep the first timestamp.
            Err(err) if err.kind() == ErrorKind::AlreadyExists => return Ok(()),
            Err(err) => return Err(io_error(name, path, err)),
        };

        let stamp = format!("{}\n", Utc::now().to_rfc3339());
        let written = async {
            file.write_all(stamp.as_bytes()).await?;
            file.sync_all().await
        };
        written.await.map_err(|err| io_error(name, path.clone(), err))?;

        debug!(path = %path.display(), "marker set");
        Ok(())
    }
}
