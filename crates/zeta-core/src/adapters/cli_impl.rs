//! Subprocess-backed CLI adapter and prober.
//!
//! Both run the external CLI through `tokio::process::Command` under a hard
//! timeout. Children are killed when their future is dropped, so a timed-out
//! invocation never outlives the call.

use crate::adapters::cli::{CliAdapter, CommandOutput, Prober, ResolvedExecutor};
use crate::command::AbstractCommand;
use crate::error::{Result, ZetaError};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// CLI adapter that spawns the resolved executable.
#[derive(Debug, Clone)]
pub struct ProcessCliAdapter {
    executor: Option<ResolvedExecutor>,
    timeout: Duration,
}

impl ProcessCliAdapter {
    /// Creates an adapter for `executor`; `None` makes every call fail with
    /// `ZetaError::CliUnavailable`.
    pub fn new(executor: Option<ResolvedExecutor>, timeout: Duration) -> Self {
        Self { executor, timeout }
    }

    /// The executor this adapter invokes.
    pub fn executor(&self) -> Option<&ResolvedExecutor> {
        self.executor.as_ref()
    }
}

#[async_trait]
impl CliAdapter for ProcessCliAdapter {
    async fn execute(&self, command: &AbstractCommand) -> Result<CommandOutput> {
        let executor = self.executor.as_ref().ok_or(ZetaError::CliUnavailable)?;
        let (program, args) = executor.invocation(command);
        debug!(%program, ?args, "spawning cli");

        let child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| ZetaError::Spawn {
                program: program.clone(),
                source,
            })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => return Err(ZetaError::CliTimeout(self.timeout.as_secs())),
        };

        let result = CommandOutput {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(exit_code = result.exit_code, "cli finished");

        if !result.success() {
            return Err(ZetaError::NonZeroExit {
                code: result.exit_code,
                stderr: result.stderr.trim().to_string(),
            });
        }
        Ok(result)
    }
}

/// Prober that runs the program with all stdio discarded.
#[derive(Debug, Clone)]
pub struct ProcessProber {
    timeout: Duration,
}

impl ProcessProber {
    /// Creates a prober with a per-probe timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl Prober for ProcessProber {
    async fn probe(&self, program: &str, args: &[String]) -> bool {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match timeout(self.timeout, status).await {
            Ok(Ok(status)) => status.success(),
            Ok(Err(e)) => {
                debug!(%program, error = %e, "probe could not start");
                false
            }
            Err(_) => {
                debug!(%program, "probe timed out");
                false
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sh_adapter(timeout: Duration) -> ProcessCliAdapter {
        ProcessCliAdapter::new(
            Some(ResolvedExecutor::Explicit(PathBuf::from("/bin/sh"))),
            timeout,
        )
    }

    #[tokio::test]
    async fn test_collects_stdout_on_success() {
        let adapter = sh_adapter(Duration::from_secs(10));
        let command = AbstractCommand::with_args("-c", ["echo hello; echo note >&2"]);

        let output = adapter.execute(&command).await.unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "note");
    }

    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        let adapter = sh_adapter(Duration::from_secs(10));
        let command = AbstractCommand::with_args("-c", ["echo partial; echo 'bad input' >&2; exit 3"]);

        match adapter.execute(&command).await.unwrap_err() {
            ZetaError::NonZeroExit { code, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "bad input");
            }
            other => panic!("expected NonZeroExit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_executable_is_spawn_error() {
        let adapter = ProcessCliAdapter::new(
            Some(ResolvedExecutor::Explicit(PathBuf::from(
                "/nonexistent/zetachain-cli",
            ))),
            Duration::from_secs(10),
        );

        let err = adapter
            .execute(&AbstractCommand::new("accounts list"))
            .await
            .unwrap_err();
        assert!(matches!(err, ZetaError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_process() {
        let adapter = sh_adapter(Duration::from_millis(200));
        let command = AbstractCommand::with_args("-c", ["sleep 5"]);

        let err = adapter.execute(&command).await.unwrap_err();
        assert!(matches!(err, ZetaError::CliTimeout(_)));
    }

    #[tokio::test]
    async fn test_unresolved_executor() {
        let adapter = ProcessCliAdapter::new(None, Duration::from_secs(1));
        let err = adapter
            .execute(&AbstractCommand::new("accounts list"))
            .await
            .unwrap_err();
        assert!(matches!(err, ZetaError::CliUnavailable));
    }

    #[tokio::test]
    async fn test_probe_results() {
        let prober = ProcessProber::new(Duration::from_secs(5));

        assert!(prober.probe("/bin/sh", &["-c".into(), "exit 0".into()]).await);
        assert!(!prober.probe("/bin/sh", &["-c".into(), "exit 1".into()]).await);
        assert!(!prober.probe("/nonexistent/binary", &[]).await);
    }

    #[tokio::test]
    async fn test_probe_timeout() {
        let prober = ProcessProber::new(Duration::from_millis(200));
        assert!(!prober.probe("/bin/sh", &["-c".into(), "sleep 5".into()]).await);
    }
}
