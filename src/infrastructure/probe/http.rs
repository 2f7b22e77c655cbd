//! HTTP prober
//!
//! Fetches the raw page with `reqwest` and searches the text of the response
//! body. No JavaScript runs, so this suits server-rendered pages; use the
//! browser prober for anything assembled client-side. Screenshots are not
//! supported.

use async_trait::async_trait;
use std::time::Duration;
use super::html_contains_text;
use crate::domain::errors::ProbeError;
use crate::domain::models::ProbeConfig;
use crate::domain::ports::{ProbeRequest, ProbeResult, Prober};

pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        } else {
            builder = builder.user_agent(concat!("tripwire/", env!("CARGO_PKG_VERSION")));
        }
        let client = builder
            .build()
            .map_err(|e| ProbeError::Failed(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

fn map_error(err: &reqwest::Error, limit: Duration) -> ProbeError {
    if err.is_timeout() {
        ProbeError::Timeout(limit)
    } else {
        ProbeError::Failed(err.to_string())
    }
}

#[async_trait]
impl Prober for HttpProber {
    fn name(&self) -> &str {
        "http"
    }

    async fn probe(&self, request: &ProbeRequest) -> Result<ProbeResult, ProbeError> {
        let response = self
            .client
            .get(&request.url)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|e| map_error(&e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Failed(format!(
                "HTTP {status} from {}",
                request.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| map_error(&e, request.timeout))?;

        Ok(ProbeResult {
            detected: html_contains_text(&body, &request.pattern),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(url: String, pattern: &str) -> ProbeRequest {
        ProbeRequest {
            url,
            pattern: pattern.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_detects_text_in_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/book")
            .with_status(200)
            .with_body("<html><body><h1>Fully booked</h1></body></html>")
            .create_async()
            .await;

        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let result = prober
            .probe(&request(format!("{}/book", server.url()), "Fully booked"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(result.detected);
    }

    #[tokio::test]
    async fn test_script_body_is_not_detected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<p>Slots open</p><script>var banner = 'Fully booked';</script>")
            .create_async()
            .await;

        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let result = prober
            .probe(&request(server.url(), "Fully booked"))
            .await
            .unwrap();

        assert!(!result.detected);
    }

    #[tokio::test]
    async fn test_no_screenshot_support() {
        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let png = prober
            .capture(&request("http://127.0.0.1:9/".to_string(), "x"))
            .await
            .unwrap();
        assert!(png.is_none());
    }

    #[tokio::test]
    async fn test_absent_text() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(200)
            .with_body("Appointments available")
            .create_async()
            .await;

        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let result = prober
            .probe(&request(server.url(), "Fully booked"))
            .await
            .unwrap();

        assert!(!result.detected);
    }

    #[tokio::test]
    async fn test_error_status_is_probe_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/")
            .with_status(503)
            .with_body("Fully booked")
            .create_async()
            .await;

        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let err = prober
            .probe(&request(server.url(), "Fully booked"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProbeError::Failed(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_probe_failure() {
        let prober = HttpProber::new(&ProbeConfig::default()).unwrap();
        let result = prober
            .probe(&request("http://127.0.0.1:9/".to_string(), "x"))
            .await;
        assert!(result.is_err());
    }
}
