//! Per-watcher artifact directories
//!
//! Layout under the data root:
//! ```text
//! <data_dir>/<watcher>/FOUND
//! <data_dir>/<watcher>/<watcher>_AVAILABLE.png
//! <data_dir>/<watcher>/<watcher>_UNAVAILABLE.png
//! ```

use std::io;
use std::path::PathBuf;
use tokio::fs;

use crate::domain::errors::WatchError;
use crate::domain::models::Availability;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn watcher_dir(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Screenshot location, named after the evaluated condition.
    pub fn screenshot_path(&self, name: &str, availability: Availability) -> PathBuf {
        self.watcher_dir(name)
            .join(format!("{name}_{}.png", availability.as_str()))
    }

    /// Create the watcher's directory if it does not exist yet.
    pub async fn prepare(&self, name: &str) -> io::Result<PathBuf> {
        let dir = self.watcher_dir(name);
        fs::create_dir_all(&dir).await?;
        Ok(dir)
    }

    pub async fn write_screenshot(
        &self,
        name: &str,
        availability: Availability,
        png: &[u8],
    ) -> Result<PathBuf, WatchError> {
        let path = self.screenshot_path(name, availability);
        let write = async {
            self.prepare(name).await?;
            fs::write(&path, png).await
        };
        write.await.map_err(|source| WatchError::Artifact {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screenshot_names() {
        let store = ArtifactStore::new("/data");
        assert_eq!(
            store.screenshot_path("clinic-A", Availability::Available),
            PathBuf::from("/data/clinic-A/clinic-A_AVAILABLE.png")
        );
        assert_eq!(
            store.screenshot_path("clinic-A", Availability::Unavailable),
            PathBuf::from("/data/clinic-A/clinic-A_UNAVAILABLE.png")
        );
    }

    #[tokio::test]
    async fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path());

        let path = store
            .write_screenshot("w", Availability::Available, b"png")
            .await
            .unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"png");
        assert!(path.starts_with(dir.path().join("w")));
    }
}
