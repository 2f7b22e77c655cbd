//! Marker persistence
//!
//! Filesystem-backed latches: one `FOUND` file per watcher directory.

pub mod file_store;

pub use file_store::{FileMarkerStore, MarkerState, MARKER_FILE};
