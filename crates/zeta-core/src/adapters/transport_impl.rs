//! `reqwest`-backed implementation of [`HttpTransport`].

use crate::adapters::transport::HttpTransport;
use crate::error::{Result, ZetaError};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns `ZetaError::Transport` if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("zeta-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ZetaError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self { http })
    }

    async fn decode(url: &str, resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ZetaError::Transport(format!(
                "{url} returned HTTP {status}: {}",
                text.trim()
            )));
        }

        let text = resp
            .text()
            .await
            .map_err(|e| ZetaError::Transport(format!("{url}: {e}")))?;
        serde_json::from_str(&text)
            .map_err(|e| ZetaError::MalformedResponse(format!("{url} did not return JSON: {e}")))
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        debug!(%url, "POST");
        let resp = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| ZetaError::Transport(format!("{url}: {e}")))?;
        Self::decode(url, resp).await
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        debug!(%url, "GET");
        let resp = self
            .http
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ZetaError::Transport(format!("{url}: {e}")))?;
        Self::decode(url, resp).await
    }
}
