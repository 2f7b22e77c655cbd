//! Headless browser prober
//!
//! Drives a Chromium-compatible binary from the command line: one
//! `--dump-dom` invocation to read the rendered page, and, for screenshots,
//! a separate `--screenshot` invocation. Every browser process is spawned
//! with kill-on-drop, so a call abandoned by a timeout never leaves a
//! renderer behind.

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;
use uuid::Uuid;

use super::html_contains_text;
use crate::domain::errors::ProbeError;
use crate::domain::models::ProbeConfig;
use crate::domain::ports::{ProbeRequest, ProbeResult, Prober};

const WINDOW_SIZE: &str = "1440,2560";

pub struct BrowserProber {
    browser_path: String,
    settle_ms: u64,
    user_agent: Option<String>,
}

/// Screenshot file removed when dropped, whichever way the capture ends.
struct TempScreenshot(PathBuf);

impl TempScreenshot {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("tripwire-{}.png", Uuid::new_v4())))
    }
}

impl Drop for TempScreenshot {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

impl BrowserProber {
    pub fn new(config: &ProbeConfig) -> Self {
        Self {
            browser_path: config.browser_path.clone(),
            settle_ms: config.settle_ms,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Flags shared by every invocation.
    fn base_args(&self) -> Vec<String> {
        let mut args = vec![
            "--headless".to_string(),
            "--disable-gpu".to_string(),
            "--hide-scrollbars".to_string(),
            format!("--virtual-time-budget={}", self.settle_ms),
        ];
        if let Some(ref agent) = self.user_agent {
            args.push(format!("--user-agent={agent}"));
        }
        args
    }

    async fn run_browser(&self, args: Vec<String>, limit: Duration) -> Result<Output, ProbeError> {
        debug!(browser = %self.browser_path, args = ?args, "launching browser");

        let child = Command::new(&self.browser_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ProbeError::Failed(format!("Failed to launch {}: {e}", self.browser_path))
            })?;

        let output = timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| ProbeError::Timeout(limit))?
            .map_err(|e| ProbeError::Failed(format!("Browser I/O failed: {e}")))?;

        if !output.status.success() {
            return Err(ProbeError::Failed(format!(
                "{} exited with {:?}: {}",
                self.browser_path,
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output)
    }

    async fn dump_dom(&self, request: &ProbeRequest) -> Result<String, ProbeError> {
        let mut args = self.base_args();
        args.push("--dump-dom".to_string());
        args.push(request.url.clone());

        let output = self.run_browser(args, request.timeout).await?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Prober for BrowserProber {
    fn name(&self) -> &str {
        "browser"
    }

    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResult, ProbeError> {
        let dom = self.dump_dom(request).await?;
        Ok(ProbeResult {
            detected: html_contains_text(&dom, &request.pattern),
        })
    }

    async fn capture(&self, request: &ProbeRequest) -> Result<Option<Vec<u8>>, ProbeError> {
        let file = TempScreenshot::new();
        let mut args = self.base_args();
        args.push(format!("--window-size={WINDOW_SIZE}"));
        args.push(format!("--screenshot={}", file.0.display()));
        args.push(request.url.clone());

        self.run_browser(args, request.timeout).await?;
        tokio::fs::read(&file.0)
            .await
            .map(Some)
            .map_err(|e| ProbeError::Failed(format!("Failed to read screenshot: {e}")))
    }
}
