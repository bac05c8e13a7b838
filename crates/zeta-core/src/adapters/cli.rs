//! CLI adapter trait and executor resolution types.
//!
//! This module defines the `CliAdapter` trait for running the external
//! `zetachain` CLI, allowing for both real subprocess execution and mock
//! implementations for testing.

use crate::command::AbstractCommand;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;

/// Output of a finished CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code from the command (0 indicates success).
    pub exit_code: i32,

    /// Standard output from the command.
    pub stdout: String,

    /// Standard error output from the command.
    pub stderr: String,
}

impl CommandOutput {
    /// Checks if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// How the CLI is invoked, decided once per process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedExecutor {
    /// Explicit executable path from configuration.
    Explicit(PathBuf),

    /// Globally installed executable found on `PATH`.
    Global(String),

    /// Run through a package runner, e.g. `npx -y zetachain`.
    PackageRunner {
        /// Runner executable.
        runner: String,
        /// Package to run.
        package: String,
    },
}

impl ResolvedExecutor {
    /// Program and argument list for running `command`.
    pub fn invocation(&self, command: &AbstractCommand) -> (String, Vec<String>) {
        match self {
            Self::Explicit(path) => (path.to_string_lossy().into_owned(), command.tokens()),
            Self::Global(program) => (program.clone(), command.tokens()),
            Self::PackageRunner { runner, package } => {
                let mut args = vec!["-y".to_string(), package.clone()];
                args.extend(command.tokens());
                (runner.clone(), args)
            }
        }
    }
}

impl fmt::Display for ResolvedExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) => write!(f, "explicit path {}", path.display()),
            Self::Global(program) => write!(f, "global install '{program}'"),
            Self::PackageRunner { runner, package } => write!(f, "{runner} -y {package}"),
        }
    }
}

/// CLI adapter trait.
///
/// Runs an abstract command through the external CLI. Implementations resolve
/// with the full output on exit code zero and fail otherwise.
#[async_trait]
pub trait CliAdapter: Send + Sync {
    /// Executes `command` and waits for the process to close.
    ///
    /// # Errors
    ///
    /// - `ZetaError::Spawn` if the process cannot be created
    /// - `ZetaError::NonZeroExit` (with captured stderr) on a non-zero exit
    /// - `ZetaError::CliTimeout` if the process does not finish in time
    /// - `ZetaError::CliUnavailable` if no executor was resolved
    async fn execute(&self, command: &AbstractCommand) -> Result<CommandOutput>;
}

/// Silent availability check for an executable.
///
/// A probe runs `program args…` with all output discarded and reports
/// whether it exited successfully. Failure is an expected answer, never an
/// error.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Returns `true` if the program ran and exited with status zero.
    async fn probe(&self, program: &str, args: &[String]) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_per_executor() {
        let command = AbstractCommand::new("accounts list").arg("--json");

        let (program, args) = ResolvedExecutor::Explicit(PathBuf::from("/usr/local/bin/zeta"))
            .invocation(&command);
        assert_eq!(program, "/usr/local/bin/zeta");
        assert_eq!(args, ["accounts", "list", "--json"]);

        let (program, args) = ResolvedExecutor::Global("zetachain".into()).invocation(&command);
        assert_eq!(program, "zetachain");
        assert_eq!(args, ["accounts", "list", "--json"]);

        let (program, args) = ResolvedExecutor::PackageRunner {
            runner: "npx".into(),
            package: "zetachain".into(),
        }
        .invocation(&command);
        assert_eq!(program, "npx");
        assert_eq!(args, ["-y", "zetachain", "accounts", "list", "--json"]);
    }

    #[test]
    fn test_command_output_success() {
        let output = CommandOutput {
            exit_code: 0,
            stdout: "output".to_string(),
            stderr: String::new(),
        };
        assert!(output.success());

        let output = CommandOutput {
            exit_code: 1,
            ..output
        };
        assert!(!output.success());
    }
}
