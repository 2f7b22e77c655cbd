//! Application layer: runs watchers as a whole.

pub mod orchestrator;

pub use orchestrator::Orchestrator;
