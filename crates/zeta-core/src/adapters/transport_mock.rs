//! Mock HTTP transport for testing.
//!
//! Responses are routed by JSON-RPC method for RPC posts and by URL for
//! everything else. Every request is recorded.

use crate::adapters::transport::HttpTransport;
use crate::error::{Result, ZetaError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// `"GET"` or `"POST"`.
    pub method: &'static str,
    /// Target URL.
    pub url: String,
    /// JSON body of a POST.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// JSON-RPC method name when the body is an RPC envelope.
    pub fn rpc_method(&self) -> Option<&str> {
        self.body.as_ref()?.get("method")?.as_str()
    }
}

#[derive(Debug, Clone)]
enum Canned {
    Body(Value),
    Fail(String),
}

/// Mock transport with canned responses.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    offline: bool,
}

impl MockTransport {
    /// Creates a transport with no routes; unrouted requests fail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport on which every request fails like a dead network.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Answers the JSON-RPC `method` with `{"result": result}`.
    pub fn respond_rpc(&self, method: &str, result: Value) {
        self.route(
            method,
            Canned::Body(json!({"jsonrpc": "2.0", "id": 1, "result": result})),
        );
    }

    /// Answers the JSON-RPC `method` with an error object.
    pub fn respond_rpc_error(&self, method: &str, code: i64, message: &str) {
        self.route(
            method,
            Canned::Body(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "error": {"code": code, "message": message},
            })),
        );
    }

    /// Answers any request to `url` with `body`.
    pub fn respond(&self, url: &str, body: Value) {
        self.route(url, Canned::Body(body));
    }

    /// Makes requests to `key` (URL or RPC method) fail with a transport error.
    pub fn fail(&self, key: &str, message: &str) {
        self.route(key, Canned::Fail(message.to_string()));
    }

    /// Every request made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests whose JSON-RPC method is `method`.
    pub fn rpc_calls(&self, method: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.rpc_method() == Some(method))
            .collect()
    }

    fn route(&self, key: &str, canned: Canned) {
        self.routes.lock().unwrap().insert(key.to_string(), canned);
    }

    fn answer(&self, request: RecordedRequest) -> Result<Value> {
        let key = request
            .rpc_method()
            .map(str::to_string)
            .unwrap_or_else(|| request.url.clone());
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        if self.offline {
            return Err(ZetaError::Transport(format!("{url}: connection refused")));
        }

        let routes = self.routes.lock().unwrap();
        match routes.get(&key).or_else(|| routes.get(&url)) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Fail(message)) => Err(ZetaError::Transport(message.clone())),
            None => Err(ZetaError::Transport(format!("no mock route for {key}"))),
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        self.answer(RecordedRequest {
            method: "POST",
            url: url.to_string(),
            body: Some(body.clone()),
        })
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        self.answer(RecordedRequest {
            method: "GET",
            url: url.to_string(),
            body: None,
        })
    }
}
