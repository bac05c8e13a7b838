//! Executor adapters and their registry.
//!
//! Each adapter is a trait with a real implementation (`*_impl`) and a
//! recording mock (`*_mock`). The router only ever sees the traits.

pub mod api;
pub mod api_impl;
pub mod api_mock;
pub mod cli;
pub mod cli_impl;
pub mod cli_mock;
pub mod transport;
pub mod transport_impl;
pub mod transport_mock;

use std::sync::Arc;

/// The pair of executors a router chooses between.
///
/// Adapters are shared trait objects so that one registry can serve many
/// concurrent requests, and so tests can keep a handle on their mocks.
#[derive(Clone)]
pub struct AdapterRegistry {
    /// Direct network API adapter.
    pub api: Arc<dyn api::ApiAdapter>,

    /// Local CLI adapter.
    pub cli: Arc<dyn cli::CliAdapter>,
}

impl AdapterRegistry {
    /// Creates a registry with the provided adapters.
    pub fn new(api: Arc<dyn api::ApiAdapter>, cli: Arc<dyn cli::CliAdapter>) -> Self {
        Self { api, cli }
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("api", &"Arc<dyn ApiAdapter>")
            .field("cli", &"Arc<dyn CliAdapter>")
            .finish()
    }
}
