//! Network API adapter trait.
//!
//! The API adapter serves a bounded allow-list of verbs with direct network
//! calls. Every other verb fails with `ZetaError::UnsupportedOperation`, which
//! the router treats like any other API failure.

use crate::command::{AbstractCommand, verbs};
use crate::error::Result;
use async_trait::async_trait;

/// Verbs with a direct network API implementation.
pub const API_VERBS: &[&str] = &[
    verbs::LIST_CHAINS,
    verbs::LIST_TOKENS,
    verbs::BALANCES,
    verbs::FEES,
    verbs::FAUCET,
    verbs::STATUS,
];

/// API adapter trait.
#[async_trait]
pub trait ApiAdapter: Send + Sync {
    /// Executes `command` against the network API and returns a JSON payload.
    ///
    /// # Errors
    ///
    /// - `ZetaError::UnsupportedOperation` if the verb (or this particular
    ///   form of it) has no API implementation
    /// - `ZetaError::Transport`, `ZetaError::Rpc` or
    ///   `ZetaError::MalformedResponse` when the network call fails
    async fn execute(&self, command: &AbstractCommand) -> Result<String>;

    /// Returns `true` if `verb` is on the allow-list.
    fn supports(&self, verb: &str) -> bool {
        API_VERBS.contains(&verb)
    }
}
