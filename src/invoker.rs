//! External toolchain invocation.
//!
//! The runner only ever talks to the [`Invoker`] trait. [`ToolchainInvoker`]
//! spawns the real binary and blocks until it exits; [`DryRunInvoker`]
//! records what would have run.

use crate::matrix::InvocationDescriptor;
use serde::Serialize;
use std::process::Command;

/// Result of one toolchain process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunOutcome {
    pub descriptor: InvocationDescriptor,
    /// Exit code, `None` when the process was terminated by a signal.
    pub status: Option<i32>,
    pub succeeded: bool,
}

impl RunOutcome {
    pub fn from_status(descriptor: &InvocationDescriptor, status: Option<i32>) -> Self {
        Self {
            descriptor: descriptor.clone(),
            status,
            succeeded: status == Some(0),
        }
    }

    /// Human-readable exit status for failure messages.
    pub fn status_label(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Error type for invocation failures that are not a process exit status.
#[derive(Debug)]
pub enum InvokeError {
    /// The toolchain binary could not be started
    Spawn {
        program: String,
        source: std::io::Error,
    },
}

impl std::fmt::Display for InvokeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvokeError::Spawn { program, source } => {
                write!(f, "Failed to start '{}': {}", program, source)
            }
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Spawn { source, .. } => Some(source),
        }
    }
}

/// Executes one descriptor, blocking until the process terminates.
pub trait Invoker {
    fn invoke(&mut self, descriptor: &InvocationDescriptor) -> Result<RunOutcome, InvokeError>;
}

/// Environment variable controlling how many random cases property tests try.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationEnv {
    pub var: String,
    pub value: u64,
}

impl Default for IterationEnv {
    fn default() -> Self {
        Self {
            var: "QUICKCHECK_TESTS".to_string(),
            value: 100_000,
        }
    }
}

/// Spawns `<program> <descriptor args>` with inherited stdio.
pub struct ToolchainInvoker {
    program: String,
    iterations: Option<IterationEnv>,
}

impl ToolchainInvoker {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            iterations: None,
        }
    }

    /// Fixes the iteration variable for every process this invoker spawns.
    pub fn with_iterations(mut self, iterations: Option<IterationEnv>) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builds the command without running it.
    pub fn command(&self, descriptor: &InvocationDescriptor) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(descriptor.args());
        if let Some(env) = &self.iterations {
            cmd.env(&env.var, env.value.to_string());
        }
        cmd
    }
}

impl Invoker for ToolchainInvoker {
    fn invoke(&mut self, descriptor: &InvocationDescriptor) -> Result<RunOutcome, InvokeError> {
        let status = self
            .command(descriptor)
            .status()
            .map_err(|source| InvokeError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(RunOutcome::from_status(descriptor, status.code()))
    }
}

/// Succeeds without spawning anything, remembering each descriptor.
#[derive(Default)]
pub struct DryRunInvoker {
    pub seen: Vec<InvocationDescriptor>,
}

impl Invoker for DryRunInvoker {
    fn invoke(&mut self, descriptor: &InvocationDescriptor) -> Result<RunOutcome, InvokeError> {
        self.seen.push(descriptor.clone());
        Ok(RunOutcome::from_status(descriptor, Some(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{Configuration, sequence};

    #[test]
    fn test_outcome_from_status() {
        let [check, _, _] = sequence("dxr", &Configuration::AllFeatures, 0, 2);
        assert!(RunOutcome::from_status(&check, Some(0)).succeeded);
        assert!(!RunOutcome::from_status(&check, Some(101)).succeeded);

        let killed = RunOutcome::from_status(&check, None);
        assert!(!killed.succeeded);
        assert_eq!(killed.status_label(), "terminated by signal");
    }

    #[test]
    fn test_command_carries_args_and_env() {
        let [_, lint, _] = sequence("dxr", &Configuration::NoFeatures, 1, 2);
        let invoker = ToolchainInvoker::new("cargo").with_iterations(Some(IterationEnv::default()));
        let cmd = invoker.command(&lint);

        assert_eq!(cmd.get_program(), "cargo");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec!["clippy", "--package", "dxr", "--all-targets", "--no-default-features"]
        );

        let envs: Vec<_> = cmd.get_envs().collect();
        assert_eq!(envs.len(), 1);
        assert_eq!(envs[0].0, "QUICKCHECK_TESTS");
        assert_eq!(envs[0].1.unwrap(), "100000");
    }

    #[test]
    fn test_command_without_iterations_sets_no_env() {
        let [check, _, _] = sequence("dxr", &Configuration::AllFeatures, 0, 2);
        let cmd = ToolchainInvoker::new("cargo").command(&check);
        assert_eq!(cmd.get_envs().count(), 0);
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let [check, _, _] = sequence("dxr", &Configuration::AllFeatures, 0, 2);
        let mut invoker = ToolchainInvoker::new("featmatrix-no-such-toolchain-binary");
        let err = invoker.invoke(&check).unwrap_err();
        assert!(err.to_string().contains("featmatrix-no-such-toolchain-binary"));
    }

    #[test]
    fn test_dry_run_records() {
        let mut invoker = DryRunInvoker::default();
        for descriptor in sequence("dxr", &Configuration::AllFeatures, 0, 2) {
            assert!(invoker.invoke(&descriptor).unwrap().succeeded);
        }
        assert_eq!(invoker.seen.len(), 3);
    }
}
