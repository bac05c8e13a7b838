//! MCP server over stdio.
//!
//! One JSON-RPC message per line. Every request is handled on its own task;
//! responses are funneled through a channel to a single writer so lines never
//! interleave. Notifications never produce a response.

use anyhow::Result;
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use zeta_core::ZetaRuntime;

/// Protocol versions this server speaks, preferred first.
pub const PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2024-11-05"];

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

/// Serves MCP on the process's stdin/stdout until stdin closes.
pub async fn serve(runtime: Arc<ZetaRuntime>) -> Result<()> {
    serve_io(runtime, tokio::io::stdin(), tokio::io::stdout()).await?;
    Ok(())
}

/// Serves MCP over arbitrary streams and returns the writer once all
/// in-flight requests have been answered.
pub async fn serve_io<R, W>(runtime: Arc<ZetaRuntime>, reader: R, writer: W) -> Result<W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(writer)
    });

    info!("mcp server listening on stdio");
    let mut lines = BufReader::new(reader).lines();
    let mut tasks = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let runtime = Arc::clone(&runtime);
        let tx = tx.clone();
        tasks.spawn(async move {
            if let Some(response) = handle_line(&runtime, &line).await {
                // The writer only goes away on shutdown.
                let _ = tx.send(response.to_string());
            }
        });

        while let Some(done) = tasks.try_join_next() {
            if let Err(e) = done {
                warn!(error = %e, "request task failed");
            }
        }
    }

    debug!(in_flight = tasks.len(), "stdin closed, draining requests");
    while let Some(done) = tasks.join_next().await {
        if let Err(e) = done {
            warn!(error = %e, "request task failed");
        }
    }
    drop(tx);

    let writer = writer_task.await??;
    info!("mcp server stopped");
    Ok(writer)
}

/// Handles one raw input line.
pub async fn handle_line(runtime: &ZetaRuntime, line: &str) -> Option<Value> {
    let text = line.trim();
    if text.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(text) {
        Ok(message) => handle_message(runtime, &message).await,
        Err(e) => Some(error_response(Value::Null, PARSE_ERROR, format!("parse error: {e}"))),
    }
}

/// Handles one decoded JSON-RPC message.
pub async fn handle_message(runtime: &ZetaRuntime, message: &Value) -> Option<Value> {
    if !message.is_object() {
        return Some(error_response(
            Value::Null,
            INVALID_REQUEST,
            "expected a JSON-RPC object".to_string(),
        ));
    }

    let method = message
        .get("method")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let params = message.get("params").cloned().unwrap_or(Value::Null);

    let Some(id) = message.get("id").cloned() else {
        debug!(%method, "notification");
        return None;
    };

    let outcome = match method {
        "initialize" => Ok(initialize(&params)),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(tools_list(runtime)),
        "tools/call" => tools_call(runtime, &params).await,
        _ => Err((METHOD_NOT_FOUND, format!("method not found: {method}"))),
    };

    Some(match outcome {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err((code, message)) => error_response(id, code, message),
    })
}

fn initialize(params: &Value) -> Value {
    let requested = params
        .get("protocolVersion")
        .and_then(Value::as_str)
        .unwrap_or(PROTOCOL_VERSIONS[0]);
    let version = PROTOCOL_VERSIONS
        .iter()
        .find(|v| **v == requested)
        .unwrap_or(&PROTOCOL_VERSIONS[0]);

    json!({
        "protocolVersion": version,
        "serverInfo": { "name": "zeta-mcp", "version": env!("CARGO_PKG_VERSION") },
        "capabilities": { "tools": {} },
    })
}

fn tools_list(runtime: &ZetaRuntime) -> Value {
    let tools: Vec<Value> = runtime.catalog().iter().map(|spec| spec.to_mcp()).collect();
    json!({ "tools": tools })
}

async fn tools_call(runtime: &ZetaRuntime, params: &Value) -> Result<Value, (i64, String)> {
    let name = params
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| (INVALID_PARAMS, "tools/call requires a tool name".to_string()))?;
    let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

    Ok(runtime.dispatch(name, &arguments).await.to_value())
}

fn error_response(id: Value, code: i64, message: String) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}
