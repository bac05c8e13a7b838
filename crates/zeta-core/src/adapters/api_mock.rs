//! Mock API adapter for testing.

use crate::adapters::api::ApiAdapter;
use crate::command::AbstractCommand;
use crate::error::{Result, ZetaError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum Reply {
    Payload(String),
    Transport(String),
}

/// Mock API adapter for testing.
///
/// Verbs without a configured reply fail with
/// `ZetaError::UnsupportedOperation`, like verbs outside the real adapter's
/// allow-list.
#[derive(Debug, Clone, Default)]
pub struct MockApiAdapter {
    replies: Arc<Mutex<HashMap<String, Reply>>>,
    history: Arc<Mutex<Vec<AbstractCommand>>>,
}

impl MockApiAdapter {
    /// Creates a mock that supports nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `verb` with `payload`.
    pub fn set_payload(&self, verb: &str, payload: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(verb.to_string(), Reply::Payload(payload.to_string()));
    }

    /// Makes `verb` fail with a transport error.
    pub fn set_transport_error(&self, verb: &str, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(verb.to_string(), Reply::Transport(message.to_string()));
    }

    /// Returns every executed command, in order.
    pub fn get_history(&self) -> Vec<AbstractCommand> {
        self.history.lock().unwrap().clone()
    }

    /// Total number of executed commands.
    pub fn total_calls(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

#[async_trait]
impl ApiAdapter for MockApiAdapter {
    async fn execute(&self, command: &AbstractCommand) -> Result<String> {
        self.history.lock().unwrap().push(command.clone());

        match self.replies.lock().unwrap().get(&command.verb) {
            Some(Reply::Payload(payload)) => Ok(payload.clone()),
            Some(Reply::Transport(message)) => Err(ZetaError::Transport(message.clone())),
            None => Err(ZetaError::UnsupportedOperation(command.verb.clone())),
        }
    }

    fn supports(&self, verb: &str) -> bool {
        self.replies.lock().unwrap().contains_key(verb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_api_replies() {
        let api = MockApiAdapter::new();
        api.set_payload("query balances", r#"{"balance":"1.000000"}"#);
        api.set_transport_error("query fees", "timeout");

        let ok = api
            .execute(&AbstractCommand::new("query balances"))
            .await
            .unwrap();
        assert!(ok.contains("1.000000"));

        let err = api
            .execute(&AbstractCommand::new("query fees"))
            .await
            .unwrap_err();
        assert!(err.is_transport_failure());

        let err = api
            .execute(&AbstractCommand::new("accounts list"))
            .await
            .unwrap_err();
        assert!(matches!(err, ZetaError::UnsupportedOperation(_)));

        assert_eq!(api.total_calls(), 3);
        assert!(api.supports("query balances"));
        assert!(!api.supports("accounts list"));
    }
}
