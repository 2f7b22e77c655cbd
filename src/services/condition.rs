//! Condition evaluation
//!
//! A watcher is "met" when what the probe saw matches what the watcher
//! expects. One rule covers both directions: waiting for text to appear
//! (`expected_presence = true`) and waiting for it to go away
//! (`expected_presence = false`).

/// `true` iff `detected == expected_presence`.
pub const fn evaluate(detected: bool, expected_presence: bool) -> bool {
    detected == expected_presence
}
