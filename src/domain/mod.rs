//! Domain layer for the tripwire condition watcher
//!
//! This module contains the watcher models, run outcomes, errors, and the
//! port traits the core needs from the outside world.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{CommandError, MarkerError, ProbeError, WatchError};
