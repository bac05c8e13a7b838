//! HTTP transport trait used by the API adapter.
//!
//! All outbound network I/O of the router goes through `HttpTransport`, so the
//! API adapter can be exercised against canned responses in tests.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::{Value, json};

/// JSON-over-HTTP transport.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs `body` as JSON and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// - `ZetaError::Transport` on connection failure, timeout or a
    ///   non-success status
    /// - `ZetaError::MalformedResponse` if the body is not JSON
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value>;

    /// GETs `url` and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`HttpTransport::post_json`].
    async fn get_json(&self, url: &str) -> Result<Value>;
}

/// Builds a JSON-RPC 2.0 request envelope. Every request uses id 1.
pub fn rpc_request(method: &str, params: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": method,
        "params": params,
        "id": 1,
    })
}
