//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the async trait interfaces the watcher core needs:
//! - Prober: render a page and test it for a text pattern
//! - CommandRunner: execute notifier, SMS and user action commands
//! - MarkerStore: durable per-watcher "already alerted" latch
//!
//! Infrastructure adapters implement these so the core never touches a
//! browser, a shell or the filesystem directly.

pub mod command_runner;
pub mod in_memory_markers;
pub mod marker_store;
pub mod prober;

pub use command_runner::{CommandOutcome, CommandRunner};
pub use in_memory_markers::InMemoryMarkerStore;
pub use marker_store::MarkerStore;
pub use prober::{ProbeRequest, ProbeResult, Prober};
