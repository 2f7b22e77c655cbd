//! Infrastructure layer module
//!
//! Adapters behind the domain ports and the process plumbing around them:
//! - page probers (HTTP, headless browser)
//! - file-backed latch markers and screenshot artifacts
//! - shell command execution
//! - configuration loading and logging
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod artifacts;
pub mod config;
pub mod logging;
pub mod markers;
pub mod probe;
pub mod process;
