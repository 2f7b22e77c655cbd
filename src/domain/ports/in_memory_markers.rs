//! In-process marker store.
//!
//! Latches live only as long as the store. Useful for dry runs and tests
//! where nothing should touch the data directory.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::MarkerStore;
use crate::domain::errors::MarkerError;

#[derive(Debug, Clone, Default)]
pub struct InMemoryMarkerStore {
    marked: Arc<Mutex<HashSet<String>>>,
}

impl InMemoryMarkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the given watchers already latched.
    pub fn with_marked<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let marked = names.into_iter().map(Into::into).collect();
        Self {
            marked: Arc::new(Mutex::new(marked)),
        }
    }

    pub fn is_marked(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    /// The set survives a panicking holder: inserts are atomic, so a
    /// poisoned lock still guards a consistent set.
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.marked.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl MarkerStore for InMemoryMarkerStore {
    async fn exists(&self, name: &str) -> Result<bool, MarkerError> {
        Ok(self.is_marked(name))
    }

    async fn set(&self, name: &str) -> Result<(), MarkerError> {
        self.lock().insert(name.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_then_exists() {
        let store = InMemoryMarkerStore::new();
        assert!(!store.exists("a").await.unwrap());
        store.set("a").await.unwrap();
        assert!(store.exists("a").await.unwrap());
        assert!(!store.exists("b").await.unwrap());
    }

    #[tokio::test]
    async fn test_clones_share_latches() {
        let store = InMemoryMarkerStore::with_marked(["a"]);
        let clone = store.clone();
        clone.set("b").await.unwrap();
        assert!(store.is_marked("a"));
        assert!(store.is_marked("b"));
    }

    #[tokio::test]
    async fn test_poisoned_lock_still_latches() {
        let store = InMemoryMarkerStore::with_marked(["a"]);
        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.marked.lock().unwrap();
            panic!("holder panicked");
        })
        .join();
        assert!(store.marked.is_poisoned());

        store.set("b").await.unwrap();

        assert!(store.exists("a").await.unwrap());
        assert!(store.exists("b").await.unwrap(), "set must not be silently dropped");
    }
}
