//! Command execution router.
//!
//! The router tries the network API first. When the API path fails it either
//! falls back to the local CLI (exactly once) or, in a remote context,
//! surfaces the API error. Output of the two paths is never combined, and the
//! caller is told which path produced it.

use crate::adapters::AdapterRegistry;
use crate::command::AbstractCommand;
use crate::context::ExecutionContext;
use crate::error::{Result, ZetaError};
use tracing::{debug, info};

/// Which adapter produced a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Via {
    /// Structured JSON from the network API.
    Api,
    /// Raw stdout of the local CLI.
    Cli,
}

/// Payload of a routed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub payload: String,
    pub via: Via,
}

/// Routes abstract commands to the API or CLI adapter.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    context: ExecutionContext,
    adapters: AdapterRegistry,
}

impl CommandRouter {
    /// Creates a router for a fixed execution context.
    pub fn new(context: ExecutionContext, adapters: AdapterRegistry) -> Self {
        Self { context, adapters }
    }

    /// The context this router was built for.
    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    /// Executes `command` and returns a single payload tagged with its source.
    ///
    /// # Errors
    ///
    /// In a remote context, the API adapter's error. In a local context, the
    /// CLI adapter's error when both paths fail.
    pub async fn route(&self, command: &AbstractCommand) -> Result<Routed> {
        let api_error = match self.adapters.api.execute(command).await {
            Ok(payload) => {
                debug!(verb = %command.verb, "served by network api");
                return Ok(Routed {
                    payload,
                    via: Via::Api,
                });
            }
            Err(e) => e,
        };

        if self.context.is_remote() {
            debug!(verb = %command.verb, error = %api_error, "api failed in remote context");
            return Err(api_error);
        }

        match &api_error {
            ZetaError::UnsupportedOperation(_) => {
                debug!(verb = %command.verb, "no api implementation, using cli");
            }
            other => info!(verb = %command.verb, error = %other, "api failed, falling back to cli"),
        }

        let output = self.adapters.cli.execute(command).await?;
        Ok(Routed {
            payload: output.stdout,
            via: Via::Cli,
        })
    }
}
