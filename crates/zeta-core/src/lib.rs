//! Zeta Core - command execution router for ZetaChain tools.
//!
//! This crate decides how a named blockchain tool call is carried out: via a
//! direct network API call, via the local `zetachain` CLI, or via a static
//! fallback for read-only list queries.
//!
//! # Architecture
//!
//! - [`config`]: Layered configuration (defaults, TOML file, environment)
//! - [`context`]: One-time environment detection into an [`ExecutionContext`]
//! - [`adapters`]: API, CLI and HTTP transport adapters with mocks
//! - [`router`]: API-first routing with local CLI fallback
//! - [`catalog`] and [`args`]: Declarative tool table and argument validation
//! - [`dispatcher`]: Error boundary producing [`ToolResult`]s
//! - [`runtime`]: Wires everything together
//!
//! # Example
//!
//! ```
//! use zeta_core::{Catalog, ValidatedArgs};
//! use serde_json::json;
//!
//! let catalog = Catalog::builtin();
//! let spec = catalog.get("get_balances").unwrap();
//! let command = ValidatedArgs::validate(spec, &json!({ "address": "0xabc" }))?.to_command();
//!
//! assert_eq!(command.tokens(), ["query", "balances", "--address", "0xabc"]);
//! # Ok::<(), zeta_core::ZetaError>(())
//! ```

pub mod adapters;
pub mod args;
pub mod catalog;
pub mod command;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod fallback;
pub mod router;
pub mod runtime;
pub mod units;

// Re-export core types for convenience
pub use adapters::AdapterRegistry;
pub use args::{ArgValue, ValidatedArgs};
pub use catalog::{Catalog, ToolSpec};
pub use command::AbstractCommand;
pub use config::{EnvOverrides, NetworkConfig, ZetaConfig};
pub use context::{EnvironmentDetector, ExecutionContext, RemoteReason};
pub use dispatcher::{ToolDispatcher, ToolResult};
pub use error::{Result, ZetaError};
pub use router::{CommandRouter, Routed, Via};
pub use runtime::ZetaRuntime;
