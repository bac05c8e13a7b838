//! Tool dispatcher.
//!
//! The dispatcher is the error boundary of the router: every outcome of a
//! tool call, including unknown tools and invalid arguments, becomes a
//! [`ToolResult`].

use crate::args::ValidatedArgs;
use crate::catalog::Catalog;
use crate::error::{Result, ZetaError};
use crate::router::{CommandRouter, Via};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};
use zeta_fmt::{FormatContext, FormatEngine, ResultFormatter};

/// Uniform outcome of a tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolResult {
    /// Text shown to the caller.
    pub text: String,
    /// `true` when `text` describes a failure.
    pub is_error: bool,
}

#[derive(Serialize)]
struct TextContent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Serialize)]
struct WireResult<'a> {
    content: [TextContent<'a>; 1],
    #[serde(rename = "isError", skip_serializing_if = "std::ops::Not::not")]
    is_error: bool,
}

impl ToolResult {
    /// A successful result.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// An error result with the `"Error: "` prefix.
    pub fn error(error: &ZetaError) -> Self {
        Self {
            text: format!("Error: {error}"),
            is_error: true,
        }
    }

    /// MCP `CallToolResult` representation.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for ToolResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        WireResult {
            content: [TextContent {
                kind: "text",
                text: &self.text,
            }],
            is_error: self.is_error,
        }
        .serialize(serializer)
    }
}

/// Validates tool calls, routes them and formats the outcome.
#[derive(Debug, Clone)]
pub struct ToolDispatcher {
    catalog: Arc<Catalog>,
    router: CommandRouter,
    formatter: Arc<ResultFormatter>,
    default_network: Option<String>,
}

impl ToolDispatcher {
    /// Creates a dispatcher.
    pub fn new(catalog: Catalog, router: CommandRouter, formatter: ResultFormatter) -> Self {
        Self {
            catalog: Arc::new(catalog),
            router,
            formatter: Arc::new(formatter),
            default_network: None,
        }
    }

    /// Network filled into commands whose tool takes `network` when the
    /// caller leaves it out, so the API and CLI paths target the same chain.
    #[must_use]
    pub fn with_default_network(mut self, network: impl Into<String>) -> Self {
        self.default_network = Some(network.into());
        self
    }

    /// The tool catalog served by this dispatcher.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The router used for execution.
    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    /// Executes the tool `name` with JSON `arguments`. Never fails.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> ToolResult {
        match self.try_dispatch(name, arguments).await {
            Ok(text) => ToolResult::success(text),
            Err(e) => {
                debug!(tool = %name, error = %e, "tool call failed");
                ToolResult::error(&e)
            }
        }
    }

    async fn try_dispatch(&self, name: &str, arguments: &Value) -> Result<String> {
        let spec = self
            .catalog
            .get(name)
            .ok_or_else(|| ZetaError::UnknownTool(name.to_string()))?;
        let mut args = ValidatedArgs::validate(spec, arguments)?;
        if let Some(network) = &self.default_network {
            args.fill_default("network", network);
        }
        let command = args.to_command();

        // Arguments may carry key material; only the verb is logged.
        info!(tool = %name, verb = %command.verb, "dispatching tool call");
        let routed = self.router.route(&command).await?;
        match routed.via {
            Via::Api => Ok(self.format(name, routed.payload)),
            Via::Cli => Ok(routed.payload),
        }
    }

    /// Renders an API payload through the tool's template. Payloads that are
    /// not JSON objects, or that the template cannot render, are returned
    /// unchanged.
    fn format(&self, tool: &str, payload: String) -> String {
        if !self.formatter.has_template(tool) {
            return payload;
        }
        let data = match serde_json::from_str::<Value>(&payload) {
            Ok(data @ Value::Object(_)) => data,
            _ => return payload,
        };

        match self.formatter.render(tool, &FormatContext::new(tool, data)) {
            Ok(text) => text,
            Err(e) => {
                warn!(%tool, error = %e, "result template failed, returning raw payload");
                payload
            }
        }
    }
}
