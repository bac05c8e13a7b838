//! Result formatting crate for the ZetaChain MCP server.
//!
//! This crate turns the structured payloads produced by tool executions into
//! human-readable text using minijinja templates. Built-in templates are
//! embedded in the binary; an optional override directory lets operators
//! replace any of them without rebuilding.
//!
//! # Examples
//!
//! ```
//! use zeta_fmt::{FormatContext, FormatEngine, ResultFormatter};
//! use serde_json::json;
//!
//! let formatter = ResultFormatter::builtin();
//! let context = FormatContext::new("get_balances", json!({
//!     "address": "0x1111111111111111111111111111111111111111",
//!     "network": "testnet",
//!     "balance": "1.000000",
//!     "symbol": "ZETA",
//! }));
//!
//! let text = formatter.render("get_balances", &context)?;
//! assert!(text.contains("1.000000 ZETA"));
//! # Ok::<(), zeta_fmt::FormatError>(())
//! ```

pub mod builtin;
pub mod context;
pub mod engine;
pub mod error;
pub mod manager;

// Re-export public types for convenience
pub use context::FormatContext;
pub use engine::FormatEngine;
pub use error::{FormatError, Result};
pub use manager::ResultFormatter;
