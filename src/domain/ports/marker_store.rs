//! Durable "already alerted" latch, keyed by watcher name.

use async_trait::async_trait;

use crate::domain::errors::MarkerError;

#[async_trait]
pub trait MarkerStore: Send + Sync {
    /// Whether the watcher has already fired.
    async fn exists(&self, name: &str) -> Result<bool, MarkerError>;

    /// Latch the watcher. Never undone by tripwire itself.
    async fn set(&self, name: &str) -> Result<(), MarkerError>;
}
