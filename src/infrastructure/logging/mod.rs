//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber: pretty or JSON
//! console output plus an optional rolling JSON log file.

pub mod logger;

pub use logger::{parse_log_level, LoggerImpl, LOG_FILE_NAME};
