//! Context structures for result rendering.

use serde::Serialize;
use serde_json::Value;

/// Data made available to result templates.
///
/// Templates see three top-level names: `tool`, the tool that produced the
/// payload; `network`, when the call targeted a specific network; and
/// `data`, the parsed JSON payload. For convenience the fields of an object
/// payload are also flattened to the top level, so a template can write
/// `{{ balance }}` instead of `{{ data.balance }}`.
///
/// # Examples
///
/// ```
/// use zeta_fmt::FormatContext;
/// use serde_json::json;
///
/// let context = FormatContext::new("get_fees", json!({ "gasPriceGwei": "10.000000" }))
///     .with_network("testnet");
/// assert_eq!(context.tool, "get_fees");
/// assert_eq!(context.network.as_deref(), Some("testnet"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct FormatContext {
    /// Name of the tool whose result is being rendered.
    pub tool: String,

    /// Network the call targeted (if known).
    pub network: Option<String>,

    /// The structured payload.
    pub data: Value,

    #[serde(flatten)]
    fields: serde_json::Map<String, Value>,
}

impl FormatContext {
    /// Creates a context for `tool` wrapping `data`.
    #[must_use]
    pub fn new(tool: impl Into<String>, data: Value) -> Self {
        let mut fields = match &data {
            Value::Object(map) => map.clone(),
            _ => serde_json::Map::new(),
        };
        // The explicit fields win over payload keys of the same name.
        for reserved in ["tool", "network", "data"] {
            fields.remove(reserved);
        }
        let network = data
            .get("network")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            tool: tool.into(),
            network,
            data,
            fields,
        }
    }

    /// Sets the network for this context.
    #[must_use]
    pub fn with_network(mut self, network: impl Into<String>) -> Self {
        self.network = Some(network.into());
        self
    }
}
