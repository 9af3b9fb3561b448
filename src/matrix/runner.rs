use super::invocation::{InvocationDescriptor, sequence};
use super::plan::{Configuration, plan_configurations};
use super::powerset::PlanError;
use crate::config::ModuleConfig;
use crate::invoker::{InvokeError, Invoker, RunOutcome};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

/// What happens to a module's remaining work after a failed invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop the module at the first failure.
    #[default]
    AbortModule,
    /// Skip the rest of the failing configuration, keep going with the next.
    SkipConfiguration,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::AbortModule => f.write_str("abort-module"),
            FailurePolicy::SkipConfiguration => f.write_str("skip-configuration"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    /// Every planned invocation ran and succeeded.
    Passed,
    /// Stopped at the first failure.
    Aborted,
    /// Ran to the end with at least one failed configuration.
    Partial,
    /// Ran to the end and no configuration passed.
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub status: ModuleStatus,
    pub executed: usize,
    pub planned: usize,
    pub failures: Vec<RunOutcome>,
}

impl ModuleReport {
    pub fn passed(&self) -> bool {
        self.status == ModuleStatus::Passed
    }
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub modules: Vec<ModuleReport>,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.modules.iter().all(ModuleReport::passed)
    }

    pub fn executed(&self) -> usize {
        self.modules.iter().map(|m| m.executed).sum()
    }

    pub fn planned(&self) -> usize {
        self.modules.iter().map(|m| m.planned).sum()
    }
}

/// Error type for conditions that end a run before its matrix is exhausted
#[derive(Debug)]
pub enum RunError {
    /// A module's inventory cannot be enumerated
    Plan { module: String, source: PlanError },
    /// The toolchain could not be started
    Invoke(InvokeError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Plan { module, source } => write!(f, "Module '{}': {}", module, source),
            RunError::Invoke(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Plan { source, .. } => Some(source),
            RunError::Invoke(e) => Some(e),
        }
    }
}

impl From<InvokeError> for RunError {
    fn from(e: InvokeError) -> Self {
        RunError::Invoke(e)
    }
}

/// Plans `module`, attaching its name to a planning error.
pub fn plan_module(module: &ModuleConfig) -> Result<Vec<Configuration>, RunError> {
    plan_configurations(&module.features).map_err(|source| RunError::Plan {
        module: module.name.clone(),
        source,
    })
}

/// Drives modules, configurations and verbs in order through an [`Invoker`].
pub struct MatrixRunner<I> {
    invoker: I,
    toolchain: String,
    policy: FailurePolicy,
}

impl<I: Invoker> MatrixRunner<I> {
    /// `toolchain` is only used to label progress lines.
    pub fn new(invoker: I, toolchain: impl Into<String>) -> Self {
        Self {
            invoker,
            toolchain: toolchain.into(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn into_invoker(self) -> I {
        self.invoker
    }

    /// Runs every module in order. A failing module never stops the next one.
    /// Every module is planned before the first dispatch, so an inventory that
    /// cannot be enumerated fails the run without invoking anything.
    pub fn run<'a>(
        &mut self,
        modules: impl IntoIterator<Item = &'a ModuleConfig>,
    ) -> Result<RunSummary, RunError> {
        let start = Instant::now();
        let planned = modules
            .into_iter()
            .map(|module| plan_module(module).map(|plan| (module, plan)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut summary = RunSummary::default();
        for (module, configurations) in planned {
            let report = self.run_planned(&module.name, &configurations)?;
            summary.modules.push(report);
        }

        summary.elapsed = start.elapsed();
        Ok(summary)
    }

    pub fn run_module(&mut self, module: &ModuleConfig) -> Result<ModuleReport, RunError> {
        let configurations = plan_module(module)?;
        Ok(self.run_planned(&module.name, &configurations)?)
    }

    fn run_planned(
        &mut self,
        name: &str,
        configurations: &[Configuration],
    ) -> Result<ModuleReport, InvokeError> {
        let total = configurations.len();
        let mut passed_configurations = 0;

        let mut report = ModuleReport {
            name: name.to_string(),
            status: ModuleStatus::Passed,
            executed: 0,
            planned: total.saturating_mul(3),
            failures: Vec::new(),
        };

        for (index, configuration) in configurations.iter().enumerate() {
            let descriptors = sequence(name, configuration, index, total);

            match self.run_configuration(&descriptors, &mut report.executed)? {
                ControlFlow::Continue(()) => passed_configurations += 1,
                ControlFlow::Break(failure) => {
                    report.failures.push(failure);
                    if self.policy == FailurePolicy::AbortModule {
                        report.status = ModuleStatus::Aborted;
                        return Ok(report);
                    }
                }
            }
        }

        if !report.failures.is_empty() {
            report.status = if passed_configurations == 0 {
                ModuleStatus::Failed
            } else {
                ModuleStatus::Partial
            };
        }
        Ok(report)
    }

    /// Breaks with the first failing outcome; later verbs are not dispatched.
    fn run_configuration(
        &mut self,
        descriptors: &[InvocationDescriptor],
        executed: &mut usize,
    ) -> Result<ControlFlow<RunOutcome>, InvokeError> {
        for descriptor in descriptors {
            println!("{}", descriptor.progress_line(&self.toolchain).cyan());

            let outcome = self.invoker.invoke(descriptor)?;
            *executed += 1;

            if !outcome.succeeded {
                println!(
                    "{} [{}] {} {} failed ({})",
                    "x".red(),
                    descriptor.module,
                    self.toolchain,
                    descriptor.verb,
                    outcome.status_label()
                );
                return Ok(ControlFlow::Break(outcome));
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
