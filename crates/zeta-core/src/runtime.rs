//! Runtime for the ZetaChain tool router.
//!
//! This module provides the `ZetaRuntime` struct which detects the execution
//! environment once, builds the adapters, and wires the router, catalog and
//! result formatter into a dispatcher.

use crate::adapters::AdapterRegistry;
use crate::adapters::api_impl::RpcApiAdapter;
use crate::adapters::cli::Prober;
use crate::adapters::cli_impl::{ProcessCliAdapter, ProcessProber};
use crate::adapters::transport::HttpTransport;
use crate::adapters::transport_impl::ReqwestTransport;
use crate::catalog::Catalog;
use crate::config::ZetaConfig;
use crate::context::{EnvironmentDetector, ExecutionContext};
use crate::dispatcher::{ToolDispatcher, ToolResult};
use crate::error::Result;
use crate::router::CommandRouter;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use zeta_fmt::ResultFormatter;

/// Fully wired router runtime.
///
/// # Examples
///
/// ```no_run
/// use zeta_core::{ZetaConfig, ZetaRuntime};
/// use serde_json::json;
///
/// # async fn run() -> zeta_core::Result<()> {
/// let runtime = ZetaRuntime::new(ZetaConfig::default()).await?;
/// let result = runtime.dispatch("list_chains", &json!({ "network": "testnet" })).await;
/// println!("{}", result.text);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZetaRuntime {
    /// Router configuration.
    pub config: ZetaConfig,

    /// Context established at startup.
    pub context: ExecutionContext,

    dispatcher: ToolDispatcher,
}

impl ZetaRuntime {
    /// Creates a runtime with the standard adapters.
    ///
    /// Environment detection runs here, probing for the CLI if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub async fn new(config: ZetaConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(Duration::from_millis(config.http.timeout_ms))?;
        let prober = ProcessProber::new(Duration::from_secs(config.cli.probe_timeout_secs));
        Ok(Self::with_parts(config, Arc::new(transport), &prober).await)
    }

    /// Creates a runtime over a custom transport and prober.
    pub async fn with_parts(
        config: ZetaConfig,
        transport: Arc<dyn HttpTransport>,
        prober: &dyn Prober,
    ) -> Self {
        let context = EnvironmentDetector::new(&config, prober).establish().await;

        let adapters = AdapterRegistry::new(
            Arc::new(RpcApiAdapter::new(config.clone(), transport)),
            Arc::new(ProcessCliAdapter::new(
                context.executor().cloned(),
                Duration::from_secs(config.cli.timeout_secs),
            )),
        );
        let router = CommandRouter::new(context.clone(), adapters);
        let dispatcher = ToolDispatcher::new(Catalog::builtin(), router, Self::formatter(&config))
            .with_default_network(config.network.clone());

        Self {
            config,
            context,
            dispatcher,
        }
    }

    /// Builds the result formatter, honouring `templates_dir` when it exists.
    fn formatter(config: &ZetaConfig) -> ResultFormatter {
        let Some(dir) = &config.templates_dir else {
            return ResultFormatter::builtin();
        };
        match ResultFormatter::with_overrides(dir.clone()) {
            Ok(formatter) => formatter,
            Err(e) => {
                warn!(error = %e, "template overrides unavailable, using built-in templates");
                ResultFormatter::builtin()
            }
        }
    }

    /// The dispatcher serving tool calls.
    pub fn dispatcher(&self) -> &ToolDispatcher {
        &self.dispatcher
    }

    /// The tool catalog.
    pub fn catalog(&self) -> &Catalog {
        self.dispatcher.catalog()
    }

    /// Executes one tool call.
    pub async fn dispatch(&self, name: &str, arguments: &Value) -> ToolResult {
        self.dispatcher.dispatch(name, arguments).await
    }
}
