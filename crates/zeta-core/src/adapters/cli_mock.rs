//! Mock CLI adapter and prober for testing.
//!
//! The mocks allow predefined outputs per command and record every call, so
//! tests can assert how often (and with what arguments) the CLI path ran.

use crate::adapters::cli::{CliAdapter, CommandOutput, Prober};
use crate::command::AbstractCommand;
use crate::error::{Result, ZetaError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock CLI adapter for testing.
///
/// Outputs are keyed by verb. A configured output with a non-zero exit code
/// is turned into `ZetaError::NonZeroExit`, like the real adapter does.
///
/// # Examples
///
/// ```
/// use zeta_core::adapters::cli::{CliAdapter, CommandOutput};
/// use zeta_core::adapters::cli_mock::MockCliAdapter;
/// use zeta_core::AbstractCommand;
///
/// # tokio_test_block(async {
/// let cli = MockCliAdapter::new();
/// cli.set_stdout("accounts list", "alice  0xabc");
///
/// let output = cli.execute(&AbstractCommand::new("accounts list")).await.unwrap();
/// assert_eq!(output.stdout, "alice  0xabc");
/// assert_eq!(cli.call_count("accounts list"), 1);
/// # });
/// # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockCliAdapter {
    /// Pre-programmed outputs (verb -> output)
    outputs: Arc<Mutex<HashMap<String, CommandOutput>>>,
    /// History of executed commands
    history: Arc<Mutex<Vec<AbstractCommand>>>,
    /// Default output for unknown verbs
    default_output: Arc<Mutex<Option<CommandOutput>>>,
}

impl MockCliAdapter {
    /// Creates a new mock with no pre-programmed outputs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock that succeeds with empty output for every command.
    pub fn with_success() -> Self {
        let adapter = Self::new();
        adapter.set_default_output(CommandOutput {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        });
        adapter
    }

    /// Sets the output for a specific verb.
    pub fn set_output(&self, verb: &str, output: CommandOutput) {
        self.outputs.lock().unwrap().insert(verb.to_string(), output);
    }

    /// Sets a successful output with the given stdout for `verb`.
    pub fn set_stdout(&self, verb: &str, stdout: &str) {
        self.set_output(
            verb,
            CommandOutput {
                exit_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
    }

    /// Sets the default output for unknown verbs.
    pub fn set_default_output(&self, output: CommandOutput) {
        *self.default_output.lock().unwrap() = Some(output);
    }

    /// Returns every executed command, in order.
    pub fn get_history(&self) -> Vec<AbstractCommand> {
        self.history.lock().unwrap().clone()
    }

    /// Returns the number of times `verb` was executed.
    pub fn call_count(&self, verb: &str) -> usize {
        self.history
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.verb == verb)
            .count()
    }

    /// Total number of executed commands.
    pub fn total_calls(&self) -> usize {
        self.history.lock().unwrap().len()
    }
}

#[async_trait]
impl CliAdapter for MockCliAdapter {
    async fn execute(&self, command: &AbstractCommand) -> Result<CommandOutput> {
        self.history.lock().unwrap().push(command.clone());

        let configured = self
            .outputs
            .lock()
            .unwrap()
            .get(&command.verb)
            .cloned()
            .or_else(|| self.default_output.lock().unwrap().clone());

        match configured {
            Some(output) if output.success() => Ok(output),
            Some(output) => Err(ZetaError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr,
            }),
            None => Err(ZetaError::Spawn {
                program: "mock".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no output configured for command: {command}"),
                ),
            }),
        }
    }
}

/// Mock prober answering from a fixed set of available programs.
#[derive(Debug, Clone, Default)]
pub struct MockProber {
    available: Arc<Mutex<HashSet<String>>>,
    calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
}

impl MockProber {
    /// Creates a prober for which nothing is available.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a prober for which every listed program probes successfully.
    pub fn with_available<I, S>(programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prober = Self::new();
        prober
            .available
            .lock()
            .unwrap()
            .extend(programs.into_iter().map(Into::into));
        prober
    }

    /// Every probe made so far as `(program, args)`.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Prober for MockProber {
    async fn probe(&self, program: &str, args: &[String]) -> bool {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        self.available.lock().unwrap().contains(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_cli_records_history() {
        let cli = MockCliAdapter::with_success();

        cli.execute(&AbstractCommand::new("accounts list")).await.unwrap();
        cli.execute(&AbstractCommand::new("localnet stop")).await.unwrap();
        cli.execute(&AbstractCommand::new("accounts list")).await.unwrap();

        assert_eq!(cli.total_calls(), 3);
        assert_eq!(cli.call_count("accounts list"), 2);
        assert_eq!(cli.get_history()[1].verb, "localnet stop");
    }

    #[tokio::test]
    async fn test_mock_cli_failure_output() {
        let cli = MockCliAdapter::new();
        cli.set_output(
            "evm deposit",
            CommandOutput {
                exit_code: 1,
                stdout: String::new(),
                stderr: "insufficient funds".to_string(),
            },
        );

        let err = cli.execute(&AbstractCommand::new("evm deposit")).await.unwrap_err();
        assert!(matches!(err, ZetaError::NonZeroExit { code: 1, .. }));
    }

    #[tokio::test]
    async fn test_mock_cli_unconfigured() {
        let cli = MockCliAdapter::new();
        assert!(cli.execute(&AbstractCommand::new("anything")).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_prober() {
        let prober = MockProber::with_available(["zetachain"]);

        assert!(prober.probe("zetachain", &["--version".into()]).await);
        assert!(!prober.probe("npx", &[]).await);
        assert_eq!(prober.calls().len(), 2);
        assert_eq!(prober.calls()[0].1, ["--version"]);
    }
}
