//! Page probe port.
//!
//! Rendering a page and testing it for a text pattern is delegated to an
//! adapter. Adapters must release whatever they acquire (browser processes,
//! connections) on every exit path, including when the future is dropped by
//! an outer timeout.
//!
//! Detection and screenshot capture are separate calls so each runs under
//! its own deadline; a slow capture can never hide a detection.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::errors::ProbeError;

/// A single probe attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub pattern: String,
    pub timeout: Duration,
}

/// Outcome of a completed detection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeResult {
    /// Whether the pattern was found in the page text
    pub detected: bool,
}

#[async_trait]
pub trait Prober: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Render `request.url` and report whether `request.pattern` is on it.
    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResult, ProbeError>;

    /// PNG screenshot of `request.url`, or `None` when the adapter cannot
    /// capture one.
    async fn capture(&self, _request: &ProbeRequest) -> Result<Option<Vec<u8>>, ProbeError> {
        Ok(None)
    }
}
