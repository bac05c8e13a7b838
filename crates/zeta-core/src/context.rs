//! Environment detection and the execution context it produces.
//!
//! Detection runs once at startup. The resulting [`ExecutionContext`] is
//! read-only afterwards and is handed to the router explicitly.

use crate::adapters::cli::{Prober, ResolvedExecutor};
use crate::config::ZetaConfig;
use std::fmt;
use tracing::{debug, info};

/// Why the process runs without a local CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReason {
    /// Test or CI mode is set.
    TestMode,
    /// Remote deployment declared through configuration.
    Declared,
    /// A hosting platform marker was found.
    Hosted(String),
    /// Neither a global install nor the package runner answered.
    CliNotFound,
}

impl fmt::Display for RemoteReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TestMode => write!(f, "test mode"),
            Self::Declared => write!(f, "remote deployment declared"),
            Self::Hosted(marker) => write!(f, "hosting platform detected ({marker})"),
            Self::CliNotFound => write!(f, "zetachain CLI not found"),
        }
    }
}

/// Where tool calls may be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionContext {
    /// A working CLI is available through `executor`.
    Local(ResolvedExecutor),
    /// Only network APIs are reachable.
    Remote(RemoteReason),
}

impl ExecutionContext {
    /// Returns `true` for remote/demo environments.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote(_))
    }

    /// The resolved CLI executor of a local context.
    pub fn executor(&self) -> Option<&ResolvedExecutor> {
        match self {
            Self::Local(executor) => Some(executor),
            Self::Remote(_) => None,
        }
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(executor) => write!(f, "local ({executor})"),
            Self::Remote(reason) => write!(f, "remote ({reason})"),
        }
    }
}

/// Decides between local and remote execution.
///
/// The decision order is fixed and the first match wins:
///
/// 1. test/CI mode
/// 2. declared remote deployment or hosting platform marker
/// 3. explicit CLI path (trusted without probing)
/// 4. `zetachain --version` probe
/// 5. `npx -y zetachain --version` probe
/// 6. remote
pub struct EnvironmentDetector<'a> {
    config: &'a ZetaConfig,
    prober: &'a dyn Prober,
}

impl<'a> EnvironmentDetector<'a> {
    /// Creates a detector over `config` using `prober` for availability checks.
    pub fn new(config: &'a ZetaConfig, prober: &'a dyn Prober) -> Self {
        Self { config, prober }
    }

    /// Returns `true` if the environment is remote.
    pub async fn detect(&self) -> bool {
        self.establish().await.is_remote()
    }

    /// Runs the full decision and returns the execution context.
    pub async fn establish(&self) -> ExecutionContext {
        let context = self.decide().await;
        info!(%context, "execution context established");
        context
    }

    async fn decide(&self) -> ExecutionContext {
        let env = &self.config.environment;
        if env.test_mode {
            return ExecutionContext::Remote(RemoteReason::TestMode);
        }
        if env.remote {
            return ExecutionContext::Remote(RemoteReason::Declared);
        }
        if let Some(marker) = &env.deployment {
            return ExecutionContext::Remote(RemoteReason::Hosted(marker.clone()));
        }

        let cli = &self.config.cli;
        if let Some(path) = &cli.path {
            return ExecutionContext::Local(ResolvedExecutor::Explicit(path.clone()));
        }

        let version = vec!["--version".to_string()];
        if self.prober.probe(&cli.program, &version).await {
            return ExecutionContext::Local(ResolvedExecutor::Global(cli.program.clone()));
        }
        debug!(program = %cli.program, "no global cli installation");

        let runner_args = vec!["-y".to_string(), cli.package.clone(), "--version".to_string()];
        if self.prober.probe(&cli.runner, &runner_args).await {
            return ExecutionContext::Local(ResolvedExecutor::PackageRunner {
                runner: cli.runner.clone(),
                package: cli.package.clone(),
            });
        }
        debug!(runner = %cli.runner, "package runner unavailable");

        ExecutionContext::Remote(RemoteReason::CliNotFound)
    }
}

impl fmt::Debug for EnvironmentDetector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentDetector")
            .field("environment", &self.config.environment)
            .field("prober", &"&dyn Prober")
            .finish()
    }
}
